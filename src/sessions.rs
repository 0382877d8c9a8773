//! One responder per conversation for hosts that serve many chats at once.

#![allow(missing_docs)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::config::ResponderConfig;
use crate::responder::{shared_default_rules, Responder};
use crate::rules::RuleSet;
use crate::types::Reply;

struct Session {
    responder: Arc<Responder>,
    last_used: u64,
}

#[derive(Default)]
struct SessionTable {
    entries: HashMap<String, Session>,
    clock: u64,
}

impl SessionTable {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn evict_least_recent(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, session)| session.last_used)
            .map(|(id, _)| id.clone());
        if let Some(id) = oldest {
            debug!(conversation_id = %id, "Evicting idle chat session");
            self.entries.remove(&id);
        }
    }
}

/// Lazily creates a [`Responder`] for each conversation id so that call
/// counters and suggestion cursors never leak between conversations.
///
/// At most `config.max_sessions` conversations are kept. Opening one more
/// evicts the conversation that was used least recently.
pub struct ResponderPool {
    config: ResponderConfig,
    rules: Arc<RuleSet>,
    sessions: Mutex<SessionTable>,
}

impl Default for ResponderPool {
    fn default() -> Self {
        Self::new(ResponderConfig::default())
    }
}

impl ResponderPool {
    pub fn new(config: ResponderConfig) -> Self {
        Self::with_rules(config, shared_default_rules())
    }

    pub fn with_rules(config: ResponderConfig, rules: Arc<RuleSet>) -> Self {
        Self {
            config,
            rules,
            sessions: Mutex::new(SessionTable::default()),
        }
    }

    pub fn config(&self) -> &ResponderConfig {
        &self.config
    }

    /// Returns the conversation's responder, creating it on first use.
    pub fn session(&self, conversation_id: &str) -> Arc<Responder> {
        let mut table = self.lock();
        let now = table.tick();
        if let Some(existing) = table.entries.get_mut(conversation_id) {
            existing.last_used = now;
            return Arc::clone(&existing.responder);
        }

        while table.entries.len() >= self.config.max_sessions.max(1) {
            table.evict_least_recent();
        }

        debug!(conversation_id, "Starting chat session");
        let responder = Arc::new(
            Responder::builder()
                .config(self.config.clone())
                .rules(Arc::clone(&self.rules))
                .build(),
        );
        table.entries.insert(
            conversation_id.to_string(),
            Session {
                responder: Arc::clone(&responder),
                last_used: now,
            },
        );
        responder
    }

    pub fn respond(&self, conversation_id: &str, input: &str) -> Reply {
        // The pool lock is released before the responder runs.
        self.session(conversation_id).respond(input)
    }

    /// Drops a conversation's state. Returns whether it existed.
    pub fn end_session(&self, conversation_id: &str) -> bool {
        let removed = self.lock().entries.remove(conversation_id).is_some();
        if removed {
            debug!(conversation_id, "Ended chat session");
        }
        removed
    }

    pub fn contains(&self, conversation_id: &str) -> bool {
        self.lock().entries.contains_key(conversation_id)
    }

    pub fn session_count(&self) -> usize {
        self.lock().entries.len()
    }

    fn lock(&self) -> MutexGuard<'_, SessionTable> {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }
}
