//! Storefront chat actions
//!
//! Provides action implementations for the storefront assistant.

mod storefront_chat;

pub use storefront_chat::StorefrontChatAction;

use serde_json::Value;

/// Action result structure
#[derive(Debug, Clone)]
pub struct ActionResult {
    /// Whether the action succeeded
    pub success: bool,
    /// Response text
    pub text: Option<String>,
    /// Structured payload, e.g. an attached suggestion
    pub data: Option<Value>,
    /// Error message if failed
    pub error: Option<String>,
}

/// Action example for documentation
pub struct ActionExample {
    /// Example input
    pub input: String,
    /// Example output
    pub output: String,
}

/// Returns all available actions.
pub fn get_actions() -> Vec<StorefrontChatAction> {
    vec![StorefrontChatAction]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_actions() {
        let actions = get_actions();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].name(), "storefront-chat");
    }
}
