#![allow(missing_docs)]

use thiserror::Error;

/// Errors raised while building rules or loading configuration.
///
/// Producing a reply never fails; these only surface at construction time.
#[derive(Error, Debug)]
pub enum ResponderError {
    #[error("Invalid rule pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Rule `{0}` has no response templates")]
    EmptyResponses(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ResponderError>;
