//! Claim screening against payer-specific rulesets.
//!
//! The module is split the same way the billing workflow is: `domain` carries
//! the claim-side snapshot types, `rule` the authored rule model, `validation`
//! the authoring-time shape checks, `evaluation` the pure engine, and
//! `service` the facade that ties a [`RulesetStore`] to the engine so callers
//! can screen a claim with one call.

pub mod domain;
pub(crate) mod evaluation;
pub mod registry;
pub mod rule;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{ClaimId, ClaimSnapshot, FieldKind, FieldValue, PayerId, RuleField};
pub use evaluation::{
    ActionPrecedence, MatchedRule, RuleEngine, RuleEvaluationResult, RuleSkipReason, SkippedRule,
};
pub use registry::{InMemoryRulesetStore, RegistryError, RulesetStore};
pub use rule::{Rule, RuleAction, RuleId, RuleInput, RuleOperator, RuleValue, Ruleset, RulesetError};
pub use service::{ClaimScreeningService, ScreeningError};
pub use validation::{validate_rule, RuleValidationError};
