//! Deterministic payer rule evaluation for medical billing claims.
//!
//! The billing front end hands the engine a read-only [`screening::ClaimSnapshot`]
//! and the payer's [`screening::Ruleset`]; the engine returns a single
//! [`screening::RuleEvaluationResult`] naming every triggered rule and one
//! resolved final action. The library owns no persistence, transport, or UI:
//! claims arrive from the claim-entry screens, rules arrive from the
//! payer-rules screen, and the result is handed straight back to the caller.

pub mod screening;

pub use screening::{
    ClaimScreeningService, ClaimSnapshot, InMemoryRulesetStore, Rule, RuleAction,
    RuleEvaluationResult, RuleEngine, RuleField, RuleInput, RuleOperator, Ruleset, RulesetStore,
    ScreeningError,
};
