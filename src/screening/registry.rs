use std::collections::BTreeMap;
use std::sync::Mutex;

use super::domain::PayerId;
use super::rule::Ruleset;

/// Storage abstraction for payer rulesets so the screening service can be
/// exercised against memory in tests and a database in deployments.
///
/// `fetch` hands back an owned snapshot: a batch of evaluations works off the
/// copy it fetched and never observes rules changing mid-batch.
pub trait RulesetStore: Send + Sync {
    fn fetch(&self, payer_id: &PayerId) -> Result<Option<Ruleset>, RegistryError>;
    fn upsert(&self, ruleset: Ruleset) -> Result<(), RegistryError>;
    fn payers(&self) -> Result<Vec<PayerId>, RegistryError>;
}

/// Error enumeration for ruleset storage failures.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("ruleset store unavailable: {0}")]
    Unavailable(String),
}

/// Mutex-guarded in-memory store, keyed by payer.
#[derive(Default)]
pub struct InMemoryRulesetStore {
    rulesets: Mutex<BTreeMap<PayerId, Ruleset>>,
}

impl InMemoryRulesetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RulesetStore for InMemoryRulesetStore {
    fn fetch(&self, payer_id: &PayerId) -> Result<Option<Ruleset>, RegistryError> {
        let guard = self
            .rulesets
            .lock()
            .map_err(|_| RegistryError::Unavailable("ruleset store mutex poisoned".to_string()))?;
        Ok(guard.get(payer_id).cloned())
    }

    fn upsert(&self, ruleset: Ruleset) -> Result<(), RegistryError> {
        let mut guard = self
            .rulesets
            .lock()
            .map_err(|_| RegistryError::Unavailable("ruleset store mutex poisoned".to_string()))?;
        guard.insert(ruleset.payer_id().clone(), ruleset);
        Ok(())
    }

    fn payers(&self) -> Result<Vec<PayerId>, RegistryError> {
        let guard = self
            .rulesets
            .lock()
            .map_err(|_| RegistryError::Unavailable("ruleset store mutex poisoned".to_string()))?;
        Ok(guard.keys().cloned().collect())
    }
}
