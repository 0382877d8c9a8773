#![allow(missing_docs)]

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::{ResponderError, Result};

pub const DEFAULT_EMPTY_PROMPT: &str = "Please share what is on your mind about shopping today.";
pub const DEFAULT_FALLBACK_REPLY: &str = "How can I assist you with your shopping experience?";
pub const DEFAULT_SUGGESTION_INTERVAL: u64 = 3;
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponderConfig {
    pub suggestions_enabled: bool,
    /// A suggestion rides along on every `suggestion_interval`-th reply.
    pub suggestion_interval: u64,
    pub empty_prompt: String,
    pub fallback_reply: String,
    /// Live conversations a pool keeps before evicting the least recently used.
    pub max_sessions: usize,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            suggestions_enabled: true,
            suggestion_interval: DEFAULT_SUGGESTION_INTERVAL,
            empty_prompt: DEFAULT_EMPTY_PROMPT.to_string(),
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

impl ResponderConfig {
    pub fn builder() -> ResponderConfigBuilder {
        ResponderConfigBuilder::default()
    }

    pub fn from_env() -> Result<Self> {
        let suggestions_enabled = env::var("STOREFRONT_CHAT_SUGGESTIONS_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        let suggestion_interval = match env::var("STOREFRONT_CHAT_SUGGESTION_INTERVAL") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ResponderError::Config(format!(
                    "STOREFRONT_CHAT_SUGGESTION_INTERVAL must be a positive integer: {}",
                    e
                ))
            })?,
            Err(_) => DEFAULT_SUGGESTION_INTERVAL,
        };

        let max_sessions = match env::var("STOREFRONT_CHAT_MAX_SESSIONS") {
            Ok(raw) => raw.trim().parse::<usize>().map_err(|e| {
                ResponderError::Config(format!(
                    "STOREFRONT_CHAT_MAX_SESSIONS must be a positive integer: {}",
                    e
                ))
            })?,
            Err(_) => DEFAULT_MAX_SESSIONS,
        };

        let config = Self {
            suggestions_enabled,
            suggestion_interval,
            max_sessions,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses the JSON accepted by the plugin `init` entry point.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.suggestion_interval == 0 {
            return Err(ResponderError::Config(
                "suggestion interval must be at least 1".to_string(),
            ));
        }
        if self.max_sessions == 0 {
            return Err(ResponderError::Config(
                "max sessions must be at least 1".to_string(),
            ));
        }
        if self.empty_prompt.trim().is_empty() || self.fallback_reply.trim().is_empty() {
            return Err(ResponderError::Config(
                "fixed replies must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct ResponderConfigBuilder {
    suggestions_enabled: Option<bool>,
    suggestion_interval: Option<u64>,
    empty_prompt: Option<String>,
    fallback_reply: Option<String>,
    max_sessions: Option<usize>,
}

impl ResponderConfigBuilder {
    pub fn suggestions_enabled(mut self, enabled: bool) -> Self {
        self.suggestions_enabled = Some(enabled);
        self
    }

    pub fn suggestion_interval(mut self, interval: u64) -> Self {
        self.suggestion_interval = Some(interval);
        self
    }

    pub fn empty_prompt<S: Into<String>>(mut self, prompt: S) -> Self {
        self.empty_prompt = Some(prompt.into());
        self
    }

    pub fn fallback_reply<S: Into<String>>(mut self, reply: S) -> Self {
        self.fallback_reply = Some(reply.into());
        self
    }

    pub fn max_sessions(mut self, max: usize) -> Self {
        self.max_sessions = Some(max);
        self
    }

    pub fn build(self) -> Result<ResponderConfig> {
        let defaults = ResponderConfig::default();
        let config = ResponderConfig {
            suggestions_enabled: self
                .suggestions_enabled
                .unwrap_or(defaults.suggestions_enabled),
            suggestion_interval: self
                .suggestion_interval
                .unwrap_or(defaults.suggestion_interval),
            empty_prompt: self.empty_prompt.unwrap_or(defaults.empty_prompt),
            fallback_reply: self.fallback_reply.unwrap_or(defaults.fallback_reply),
            max_sessions: self.max_sessions.unwrap_or(defaults.max_sessions),
        };
        config.validate()?;
        Ok(config)
    }
}
