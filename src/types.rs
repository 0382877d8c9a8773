#![allow(missing_docs)]

use std::fmt;

use serde::{Deserialize, Serialize};

/// What the responder hands back for one utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            suggestion: None,
        }
    }
}

/// How the chat surface should present a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionStyle {
    /// Inline link in the blurb.
    Highlight,
    /// Product card built by the surface from the payload.
    Card,
    /// Surface should open `navigate_to` on its own.
    Navigate,
}

impl SuggestionStyle {
    /// Rotation order.
    pub const ALL: [SuggestionStyle; 3] = [Self::Highlight, Self::Card, Self::Navigate];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Highlight => "highlight",
            Self::Card => "card",
            Self::Navigate => "navigate",
        }
    }
}

impl fmt::Display for SuggestionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry eligible for promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeaturedProduct {
    pub name: &'static str,
    pub slug: &'static str,
    pub category: &'static str,
    pub price_cents: u64,
    pub image: &'static str,
    pub tagline: &'static str,
}

impl FeaturedProduct {
    /// Storefront route for the product page.
    pub fn path(&self) -> String {
        format!("/{}/{}", self.category, self.slug)
    }
}

/// Product fields carried on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub name: String,
    pub slug: String,
    pub category: String,
    pub price: f64,
    pub formatted_price: String,
    pub image: String,
    pub tagline: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub product: ProductSummary,
    pub style: SuggestionStyle,
    pub blurb: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_label: Option<String>,
    #[serde(default)]
    pub auto_navigate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigate_to: Option<String>,
}
