//! Featured Products Provider
//!
//! Lists the products the assistant may promote.

use super::{ProviderContext, ProviderResult};
use crate::catalog::FEATURED_PRODUCTS;
use crate::suggestion::format_usd;

/// Provider for the featured product rotation.
pub struct FeaturedProductsProvider;

impl FeaturedProductsProvider {
    /// Returns the provider name.
    pub fn name(&self) -> &'static str {
        "featured-products"
    }

    /// Returns the provider description.
    pub fn description(&self) -> &'static str {
        "Lists the featured products the storefront assistant may suggest."
    }

    /// Gets the provider data. The room id, when known, is echoed back so
    /// hosts can match the listing to the conversation that asked for it.
    pub fn get(&self, context: &ProviderContext) -> ProviderResult {
        let lines: Vec<String> = FEATURED_PRODUCTS
            .iter()
            .map(|p| format!("- {} ({}) {}", p.name, p.category, format_usd(p.price_cents)))
            .collect();
        let products: Vec<_> = FEATURED_PRODUCTS
            .iter()
            .map(|p| {
                serde_json::json!({
                    "name": p.name,
                    "category": p.category,
                    "price": format_usd(p.price_cents),
                    "path": p.path(),
                })
            })
            .collect();

        ProviderResult {
            text: format!("# Featured products\n{}", lines.join("\n")),
            values: serde_json::json!({
                "featuredCount": FEATURED_PRODUCTS.len(),
                "roomId": context.room_id,
            }),
            data: serde_json::json!({
                "products": products
            }),
        }
    }
}
