//! The responder: rule matching, templated replies and suggestion cadence.

#![allow(missing_docs)]

use std::sync::{Arc, Mutex, MutexGuard};

use lazy_static::lazy_static;
use tracing::{debug, info, warn};

use crate::config::ResponderConfig;
use crate::rules::{default_rule_set, expand_template, RngPicker, RuleSet, TemplatePicker};
use crate::suggestion::SuggestionEngine;
use crate::types::{FeaturedProduct, Reply};

lazy_static! {
    static ref DEFAULT_RULES: Arc<RuleSet> = Arc::new(default_rule_set());
}

/// The built-in rule set, compiled once and shared.
pub fn shared_default_rules() -> Arc<RuleSet> {
    Arc::clone(&DEFAULT_RULES)
}

struct SessionState {
    calls: u64,
    suggestions: SuggestionEngine,
    picker: Box<dyn TemplatePicker>,
}

/// A single conversation's responder.
///
/// Everything except the call counter, the suggestion cursors and the
/// template picker is immutable; those live behind one lock so a shared
/// instance can be called from several threads.
pub struct Responder {
    config: ResponderConfig,
    rules: Arc<RuleSet>,
    state: Mutex<SessionState>,
}

impl Default for Responder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Responder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Responder")
            .field("config", &self.config)
            .field("rules", &self.rules.len())
            .field("calls", &self.call_count())
            .finish()
    }
}

impl Responder {
    /// Default rules, default config, entropy-seeded template choice.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn with_config(config: ResponderConfig) -> Self {
        Self::builder().config(config).build()
    }

    pub fn builder() -> ResponderBuilder {
        ResponderBuilder::default()
    }

    pub fn config(&self) -> &ResponderConfig {
        &self.config
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Non-empty calls answered so far.
    pub fn call_count(&self) -> u64 {
        self.lock().calls
    }

    /// Produces the reply for one utterance. Never fails.
    pub fn respond(&self, input: &str) -> Reply {
        let cleaned = input.trim();
        if cleaned.is_empty() {
            return Reply::text(self.config.empty_prompt.as_str());
        }

        let mut state = self.lock();
        state.calls += 1;

        let text = match self.rules.find(cleaned) {
            Some((idx, rule, captures)) => {
                let templates = rule.responses();
                let choice = state.picker.pick(templates.len()) % templates.len();
                debug!(rule = idx, template = choice, "Matched rule");
                let expanded = expand_template(&templates[choice], &captures);
                if expanded.trim().is_empty() {
                    self.config.fallback_reply.clone()
                } else {
                    expanded
                }
            }
            None => {
                warn!("No rule matched input, using fallback reply");
                self.config.fallback_reply.clone()
            }
        };

        let suggestion = if self.config.suggestions_enabled
            && state.calls.checked_rem(self.config.suggestion_interval) == Some(0)
        {
            state.suggestions.next_suggestion()
        } else {
            None
        };

        Reply { text, suggestion }
    }

    /// Zeroes the call counter and rewinds the suggestion cursors.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.calls = 0;
        state.suggestions.reset();
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        // Counters stay consistent even if a holder panicked.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Assembles a [`Responder`] from optional parts.
#[derive(Default)]
pub struct ResponderBuilder {
    config: Option<ResponderConfig>,
    rules: Option<Arc<RuleSet>>,
    picker: Option<Box<dyn TemplatePicker>>,
    products: Option<Vec<FeaturedProduct>>,
}

impl ResponderBuilder {
    pub fn config(mut self, config: ResponderConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn rules(mut self, rules: impl Into<Arc<RuleSet>>) -> Self {
        self.rules = Some(rules.into());
        self
    }

    pub fn picker<P: TemplatePicker + 'static>(mut self, picker: P) -> Self {
        self.picker = Some(Box::new(picker));
        self
    }

    pub fn products(mut self, products: Vec<FeaturedProduct>) -> Self {
        self.products = Some(products);
        self
    }

    pub fn build(self) -> Responder {
        let config = self.config.unwrap_or_default();
        let rules = self.rules.unwrap_or_else(shared_default_rules);
        let suggestions = self
            .products
            .map(SuggestionEngine::new)
            .unwrap_or_default();
        let picker: Box<dyn TemplatePicker> = match self.picker {
            Some(picker) => picker,
            None => Box::new(RngPicker::from_entropy()),
        };

        info!(
            rules = rules.len(),
            suggestions_enabled = config.suggestions_enabled,
            interval = config.suggestion_interval,
            "Storefront responder initialized"
        );

        Responder {
            config,
            rules,
            state: Mutex::new(SessionState {
                calls: 0,
                suggestions,
                picker,
            }),
        }
    }
}

lazy_static! {
    static ref SHARED: Responder = Responder::new();
}

/// Answers using the process-wide responder.
///
/// Counters and cursors are shared by every caller of this function; hosts
/// serving several conversations should use a [`ResponderPool`](crate::ResponderPool)
/// or one [`Responder`] per conversation instead.
pub fn respond(input: &str) -> Reply {
    SHARED.respond(input)
}
