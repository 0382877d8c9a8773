//! Storefront chat action
//!
//! Answers a shopper's message with the scripted responder.

use super::{ActionExample, ActionResult};
use crate::responder::{respond, Responder};
use crate::types::Reply;

/// Action that replies to a shopper and may attach a product suggestion.
pub struct StorefrontChatAction;

impl StorefrontChatAction {
    /// Returns the action name.
    pub fn name(&self) -> &'static str {
        "storefront-chat"
    }

    /// Returns action aliases.
    pub fn similes(&self) -> Vec<&'static str> {
        vec!["SHOP_ASSISTANT", "STORE_CHAT", "KEYCRAFT_CHAT"]
    }

    /// Returns the action description.
    pub fn description(&self) -> &'static str {
        "Reply to a shopper using scripted pattern matching, occasionally suggesting a featured product."
    }

    /// Validates whether this action should handle the message.
    pub fn validate(&self, _message_text: &str) -> bool {
        true
    }

    /// Handles the action with the process-wide responder.
    ///
    /// Blank input is not an error: the responder answers it with its fixed
    /// prompt.
    pub fn handler(&self, user_input: &str) -> ActionResult {
        from_reply(respond(user_input))
    }

    /// Handles the action with a caller-owned responder (one per conversation).
    pub fn handler_for(&self, responder: &Responder, user_input: &str) -> ActionResult {
        from_reply(responder.respond(user_input))
    }

    /// Returns action examples.
    pub fn examples(&self) -> Vec<ActionExample> {
        vec![
            ActionExample {
                input: "I need a quiet keyboard".to_string(),
                output: "Why do you need a quiet keyboard?".to_string(),
            },
            ActionExample {
                input: "Where is my order?".to_string(),
                output: "Are you asking about a recent order?".to_string(),
            },
        ]
    }
}

fn from_reply(reply: Reply) -> ActionResult {
    let data = reply
        .suggestion
        .as_ref()
        .and_then(|s| serde_json::to_value(s).ok())
        .map(|suggestion| serde_json::json!({ "suggestion": suggestion }));

    ActionResult {
        success: true,
        text: Some(reply.text),
        data,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_EMPTY_PROMPT;
    use crate::rules::FixedPicker;

    #[test]
    fn test_action_metadata() {
        let action = StorefrontChatAction;
        assert_eq!(action.name(), "storefront-chat");
        assert!(action.similes().contains(&"SHOP_ASSISTANT"));
        assert!(action.description().contains("shopper"));
    }

    #[test]
    fn test_validate_always_true() {
        let action = StorefrontChatAction;
        assert!(action.validate("hello"));
        assert!(action.validate(""));
    }

    #[test]
    fn test_handler_empty_input() {
        let result = StorefrontChatAction.handler("  ");
        assert!(result.success);
        assert_eq!(result.text.as_deref(), Some(DEFAULT_EMPTY_PROMPT));
        assert!(result.data.is_none());
        assert!(result.error.is_none());
    }

    #[test]
    fn test_handler_empty_input_does_not_advance_cadence() {
        let responder = Responder::builder().picker(FixedPicker(0)).build();
        let action = StorefrontChatAction;
        for _ in 0..5 {
            assert!(action.handler_for(&responder, "").success);
        }
        assert_eq!(responder.call_count(), 0);
    }

    #[test]
    fn test_handler_valid_input() {
        let result = StorefrontChatAction.handler("Do you have linear switches?");
        assert!(result.success);
        assert!(!result.text.unwrap().is_empty());
    }

    #[test]
    fn test_handler_attaches_suggestion_data() {
        let responder = Responder::builder().picker(FixedPicker(0)).build();
        let action = StorefrontChatAction;
        assert!(action.handler_for(&responder, "hi").data.is_none());
        assert!(action.handler_for(&responder, "hi").data.is_none());
        let third = action.handler_for(&responder, "hi");
        let data = third.data.expect("third reply carries a suggestion");
        assert_eq!(data["suggestion"]["style"], "highlight");
    }

    #[test]
    fn test_examples() {
        assert_eq!(StorefrontChatAction.examples().len(), 2);
    }
}
