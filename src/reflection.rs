//! Pronoun reflection for echoed user text.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

/// First/second person swaps, keyed by lowercase word.
pub const REFLECTIONS: &[(&str, &str)] = &[
    ("am", "are"),
    ("i'm", "you are"),
    ("i", "you"),
    ("me", "you"),
    ("my", "your"),
    ("mine", "yours"),
    ("you", "I"),
    ("your", "my"),
    ("yours", "mine"),
    ("are", "am"),
];

lazy_static! {
    static ref TABLE: HashMap<&'static str, &'static str> = REFLECTIONS.iter().copied().collect();
    // Alternating runs of word and non-word characters, i.e. the pieces
    // between consecutive word boundaries.
    static ref BOUNDARY_TOKEN: Regex = Regex::new(r"\w+|\W+").expect("token regex is valid");
}

/// Looks up the reflected form of a single token, case-insensitively.
pub fn reflect_word(token: &str) -> Option<&'static str> {
    TABLE.get(token.to_lowercase().as_str()).copied()
}

/// Reflects pronouns in a captured fragment.
///
/// The fragment is split at word boundaries; every token whose lowercase form
/// appears in [`REFLECTIONS`] is swapped, everything else (punctuation and
/// whitespace included) is kept verbatim.
///
/// ```rust
/// use elizaos_plugin_storefront_chat::reflect;
///
/// assert_eq!(reflect("i am happy"), "you are happy");
/// assert_eq!(reflect("my order, please"), "your order, please");
/// ```
pub fn reflect(fragment: &str) -> String {
    BOUNDARY_TOKEN
        .find_iter(fragment)
        .map(|m| reflect_word(m.as_str()).unwrap_or(m.as_str()))
        .collect()
}
