//! Storefront chat providers
//!
//! Provides context data for storefront conversations.

mod featured_products;

pub use featured_products::FeaturedProductsProvider;

use serde_json::Value;

/// Where a provider is being asked from.
#[derive(Debug, Clone, Default)]
pub struct ProviderContext {
    /// Conversation the host is building context for, if it sent one.
    pub room_id: Option<String>,
}

/// Provider result structure
#[derive(Debug, Clone)]
pub struct ProviderResult {
    /// Human-readable text
    pub text: String,
    /// Key-value pairs
    pub values: Value,
    /// Structured data
    pub data: Value,
}

/// Returns all available providers.
pub fn get_providers() -> Vec<FeaturedProductsProvider> {
    vec![FeaturedProductsProvider]
}
