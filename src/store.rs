//! Per-session storage of the active sweep rule.
//!
//! A [`RuleStore`] is a single replaceable slot with two observable states:
//! unset (reads return [`SweepRule::default`]) and set (reads return the last
//! written rule). [`SessionRules`] hands out one store per session so that
//! sessions never observe each other's rule.

use crate::error::Result;
use crate::rule::{RuleSubmission, SweepRule};
use log::{info, warn};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Holds the active rule for one session.
///
/// Writes replace the whole rule under a lock, so readers never see a
/// threshold from one submission paired with the frequency of another.
/// Concurrent writers are last-write-wins.
#[derive(Debug, Default)]
pub struct RuleStore {
    slot: RwLock<Option<SweepRule>>,
}

impl RuleStore {
    /// Creates an unset store.
    pub fn new() -> Self {
        RuleStore {
            slot: RwLock::new(None),
        }
    }

    /// Returns the last rule set, or the default rule if none has been set.
    pub fn get_active_rule(&self) -> SweepRule {
        let slot = self.slot.read().unwrap_or_else(|e| e.into_inner());
        slot.unwrap_or_default()
    }

    /// Validates raw rule input and makes it the active rule.
    ///
    /// On a validation error the previously stored rule is left untouched.
    pub fn set_rule(&self, threshold: &str, frequency: &str) -> Result<()> {
        let rule = match RuleSubmission::new(threshold, frequency).validate() {
            Ok(rule) => rule,
            Err(e) => {
                warn!("Rejected rule submission: {}", e);
                return Err(e);
            }
        };
        self.replace(rule);
        Ok(())
    }

    /// Stores an already validated rule.
    pub fn replace(&self, rule: SweepRule) {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(rule);
        info!(
            "Active rule set: threshold {}, frequency {}",
            rule.threshold,
            rule.frequency
                .map(|f| f.to_string())
                .unwrap_or_else(|| "none".to_string())
        );
    }

    /// Returns `true` once any rule has been stored.
    pub fn is_set(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }
}

/// Registry of rule stores keyed by session identifier.
#[derive(Debug, Default)]
pub struct SessionRules {
    sessions: RwLock<HashMap<String, Arc<RuleStore>>>,
}

impl SessionRules {
    pub fn new() -> Self {
        SessionRules::default()
    }

    /// Returns the store for `session_id`, creating an unset one on first use.
    pub fn store(&self, session_id: &str) -> Arc<RuleStore> {
        if let Some(store) = self
            .sessions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(session_id)
        {
            return Arc::clone(store);
        }

        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        Arc::clone(
            sessions
                .entry(session_id.to_string())
                .or_insert_with(|| Arc::new(RuleStore::new())),
        )
    }

    /// Discards the session's rule. Returns `true` if the session existed.
    pub fn end_session(&self, session_id: &str) -> bool {
        self.sessions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(session_id)
            .is_some()
    }

    /// Number of sessions currently holding a store.
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
