//! Promotional suggestions attached to replies on a fixed cadence.
//!
//! Selection is deterministic: one cursor walks the featured products and a
//! second, independent cursor walks the presentation styles. Both wrap.

#![allow(missing_docs)]

use tracing::debug;

use crate::catalog::FEATURED_PRODUCTS;
use crate::types::{FeaturedProduct, ProductSummary, Suggestion, SuggestionStyle};

/// Label shown on card-style suggestions.
pub const CARD_CTA_LABEL: &str = "View product";

const CARD_BLURB: &str = "While we chat, here's something other shoppers have been loving.";

/// Formats an amount in cents as en-US dollars, e.g. `$1,249.00`.
pub fn format_usd(cents: u64) -> String {
    let dollars = (cents / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${}.{:02}", grouped, cents % 100)
}

fn summarize(product: &FeaturedProduct) -> ProductSummary {
    ProductSummary {
        name: product.name.to_string(),
        slug: product.slug.to_string(),
        category: product.category.to_string(),
        price: product.price_cents as f64 / 100.0,
        formatted_price: format_usd(product.price_cents),
        image: product.image.to_string(),
        tagline: product.tagline.to_string(),
        path: product.path(),
    }
}

/// Builds the payload for one product in one style.
pub fn build_suggestion(product: &FeaturedProduct, style: SuggestionStyle) -> Suggestion {
    let summary = summarize(product);
    match style {
        SuggestionStyle::Highlight => Suggestion {
            blurb: format!(
                "Have you seen the [{}]({})? It's {} and {}.",
                summary.name, summary.path, summary.formatted_price, summary.tagline
            ),
            product: summary,
            style,
            cta_label: None,
            auto_navigate: false,
            navigate_to: None,
        },
        SuggestionStyle::Card => Suggestion {
            product: summary,
            style,
            blurb: CARD_BLURB.to_string(),
            cta_label: Some(CARD_CTA_LABEL.to_string()),
            auto_navigate: false,
            navigate_to: None,
        },
        SuggestionStyle::Navigate => Suggestion {
            blurb: format!(
                "I've opened the {} page for you so you can take a look while we talk.",
                summary.name
            ),
            navigate_to: Some(summary.path.clone()),
            product: summary,
            style,
            cta_label: None,
            auto_navigate: true,
        },
    }
}

/// Round-robin selection state.
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    products: Vec<FeaturedProduct>,
    product_cursor: usize,
    style_cursor: usize,
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new(FEATURED_PRODUCTS.to_vec())
    }
}

impl SuggestionEngine {
    pub fn new(products: Vec<FeaturedProduct>) -> Self {
        Self {
            products,
            product_cursor: 0,
            style_cursor: 0,
        }
    }

    pub fn products(&self) -> &[FeaturedProduct] {
        &self.products
    }

    /// Advances both cursors and builds the next suggestion. `None` only when
    /// there are no products to offer.
    pub fn next_suggestion(&mut self) -> Option<Suggestion> {
        if self.products.is_empty() {
            return None;
        }
        let product = self.products[self.product_cursor];
        let style = SuggestionStyle::ALL[self.style_cursor];
        self.product_cursor = (self.product_cursor + 1) % self.products.len();
        self.style_cursor = (self.style_cursor + 1) % SuggestionStyle::ALL.len();

        debug!(product = product.slug, %style, "Building suggestion");
        Some(build_suggestion(&product, style))
    }

    /// Rewinds both cursors.
    pub fn reset(&mut self) {
        self.product_cursor = 0;
        self.style_cursor = 0;
    }
}
