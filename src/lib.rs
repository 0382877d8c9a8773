//! # Storefront Chat Plugin
//!
//! A scripted shopping assistant for the KeyCraft keyboard storefront. Each
//! shopper message is matched against an ordered list of case-insensitive
//! patterns; the first match picks a canned reply, echoing captured text back
//! with pronouns reflected ("I need my cable" becomes "... your cable").
//!
//! ## Features
//!
//! - First-match rule table with `$N` capture templates
//! - Pronoun reflection (e.g., "I am" → "you are")
//! - Product suggestions on every third reply, rotating products and styles
//! - Per-conversation state through [`ResponderPool`]
//!
//! ## Example
//!
//! ```rust
//! use elizaos_plugin_storefront_chat::{FixedPicker, Responder};
//!
//! let responder = Responder::builder().picker(FixedPicker(0)).build();
//! let reply = responder.respond("I need a quiet keyboard");
//! assert_eq!(reply.text, "Why do you need a quiet keyboard?");
//! assert!(reply.suggestion.is_none());
//! ```

#![warn(missing_docs)]

pub mod actions;
pub mod catalog;
pub mod config;
pub mod error;
pub mod interop;
pub mod patterns;
pub mod providers;
pub mod reflection;
pub mod responder;
pub mod rules;
pub mod sessions;
pub mod suggestion;
pub mod types;

pub use config::ResponderConfig;
pub use error::{ResponderError, Result};
pub use reflection::reflect;
pub use responder::{respond, Responder, ResponderBuilder};
pub use rules::{FixedPicker, RngPicker, Rule, RuleSet, TemplatePicker};
pub use sessions::ResponderPool;
pub use suggestion::{format_usd, SuggestionEngine};
pub use types::{FeaturedProduct, ProductSummary, Reply, Suggestion, SuggestionStyle};
