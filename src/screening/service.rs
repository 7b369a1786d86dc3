use std::sync::Arc;

use tracing::info;

use super::domain::{ClaimSnapshot, PayerId};
use super::evaluation::{ActionPrecedence, RuleEngine, RuleEvaluationResult};
use super::registry::{RegistryError, RulesetStore};
use super::rule::{RuleInput, Ruleset, RulesetError};
use super::validation::{validate_rule, RuleValidationError};

/// Facade composing rule validation, the ruleset store, and the engine.
///
/// The rules-management screen loads authored rules through [`load_rules`];
/// the submission gate and denial screens screen claims through [`screen`].
///
/// [`load_rules`]: ClaimScreeningService::load_rules
/// [`screen`]: ClaimScreeningService::screen
pub struct ClaimScreeningService<S> {
    store: Arc<S>,
    engine: RuleEngine,
}

impl<S> ClaimScreeningService<S>
where
    S: RulesetStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self::with_precedence(store, ActionPrecedence::default())
    }

    pub fn with_precedence(store: Arc<S>, precedence: ActionPrecedence) -> Self {
        Self {
            store,
            engine: RuleEngine::new(precedence),
        }
    }

    /// Validate a batch of authored rules and merge them into the payer's
    /// ruleset. The first invalid input aborts the batch before anything is
    /// stored, so a live ruleset only ever contains well-formed rules.
    pub fn load_rules(
        &self,
        payer_id: &PayerId,
        inputs: Vec<RuleInput>,
    ) -> Result<usize, ScreeningError> {
        let mut validated = Vec::with_capacity(inputs.len());
        for input in inputs {
            validated.push(validate_rule(input)?);
        }

        let mut ruleset = self
            .store
            .fetch(payer_id)?
            .unwrap_or_else(|| Ruleset::new(payer_id.clone()));

        let added = validated.len();
        for rule in validated {
            ruleset.insert(rule)?;
        }
        self.store.upsert(ruleset)?;

        info!(payer = %payer_id.0, added, "payer ruleset updated");
        Ok(added)
    }

    /// Screen a claim against its payer's ruleset. A payer with no stored
    /// ruleset screens against an empty one, which resolves to the
    /// default-allow policy.
    pub fn screen(&self, claim: &ClaimSnapshot) -> Result<RuleEvaluationResult, ScreeningError> {
        let ruleset = self
            .store
            .fetch(&claim.payer_id)?
            .unwrap_or_else(|| Ruleset::new(claim.payer_id.clone()));
        Ok(self.engine.evaluate_claim(claim, &ruleset))
    }
}

/// Error raised by the screening service.
#[derive(Debug, thiserror::Error)]
pub enum ScreeningError {
    #[error(transparent)]
    Validation(#[from] RuleValidationError),
    #[error(transparent)]
    Ruleset(#[from] RulesetError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
