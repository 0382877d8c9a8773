//! Default rule table for the storefront assistant.
//!
//! Plain data only; compiled into a [`RuleSet`](crate::rules::RuleSet) by
//! [`default_rule_set`](crate::rules::default_rule_set). Order matters: the
//! first matching entry wins and the last entry is the catch-all.

/// A rule as written in the table, before compilation.
#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    /// Case-insensitive pattern, matched anywhere in the input.
    pub pattern: &'static str,
    /// Response templates; `$N` refers to capture group N.
    pub responses: &'static [&'static str],
}

/// Built-in rules, highest precedence first.
pub const DEFAULT_RULES: &[RuleSpec] = &[
    RuleSpec {
        pattern: r"\b(?:i need|i want|i would like)\b\s*(.*)",
        responses: &[
            "Why do you need $1?",
            "Would having $1 really solve your concerns?",
            "What would it mean if you got $1?",
        ],
    },
    RuleSpec {
        pattern: r"\b(?:i feel|i am feeling)\b",
        responses: &[
            "What makes you feel that way?",
            "Do these feelings surprise you?",
            "How long have you been feeling this?",
        ],
    },
    RuleSpec {
        pattern: r"\b(i am|i'm) (.*)",
        responses: &[
            "How does being $2 make you feel?",
            "Why do you say you are $2?",
            "Do you want to be $2?",
        ],
    },
    RuleSpec {
        pattern: r"\bbecause\b",
        responses: &[
            "Is that the real reason?",
            "What other reasons come to mind?",
            "Does that reason feel satisfying to you?",
        ],
    },
    RuleSpec {
        pattern: r"\b(?:yes|yeah|yep)\b",
        responses: &[
            "I see. Can you elaborate?",
            "What else comes to mind?",
            "Under what circumstances would that change?",
        ],
    },
    RuleSpec {
        pattern: r"\bno\b",
        responses: &[
            "Why not?",
            "What would make you say yes?",
            "Can you explain that a bit more?",
        ],
    },
    RuleSpec {
        pattern: r"\b(?:customer support|support|help)\b",
        responses: &[
            "What kind of support are you looking for?",
            "Can you describe the issue you are facing with your order?",
            "Have you checked the order status page in your account?",
        ],
    },
    RuleSpec {
        pattern: r"\b(?:order|shipping|delivery)\b",
        responses: &[
            "Are you asking about a recent order?",
            "When was the order placed?",
        ],
    },
    RuleSpec {
        pattern: r"\b(?:price|cost|expensive|cheap)\b",
        responses: &[
            "What price range did you have in mind?",
            "Is your concern about the total cost or shipping fees?",
        ],
    },
    RuleSpec {
        pattern: r"\b(?:can you|could you|would you)\b\s*(.*)",
        responses: &[
            "What makes you think I can $1?",
            "How would you feel if I could $1?",
        ],
    },
    RuleSpec {
        pattern: r"\bwhy\b",
        responses: &[
            "What do you think?",
            "Why do you ask?",
            "Does the reason matter to you?",
        ],
    },
    RuleSpec {
        pattern: r"\b(.*)\b",
        responses: &[
            "Can you tell me more about $1?",
            "How does that relate to your shopping goals?",
            "What else would you like to explore?",
        ],
    },
];
