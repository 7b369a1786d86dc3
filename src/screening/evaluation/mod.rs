mod condition;
mod config;
mod policy;

pub use config::ActionPrecedence;
pub use policy::{MatchedRule, RuleEvaluationResult, RuleSkipReason, SkippedRule};

use tracing::{debug, warn};

use super::domain::ClaimSnapshot;
use super::rule::{RuleOperator, Ruleset};
use condition::IncompatibleOperator;

/// Stateless engine that screens claim snapshots against a payer's ruleset.
pub struct RuleEngine {
    precedence: ActionPrecedence,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(ActionPrecedence::default())
    }
}

impl RuleEngine {
    pub fn new(precedence: ActionPrecedence) -> Self {
        Self { precedence }
    }

    /// Evaluate every active, in-force rule against the claim and reduce the
    /// matches to a single final action.
    ///
    /// Deterministic over its inputs, allocates a fresh result per call, and
    /// never fails for a single bad rule: rules whose field the snapshot
    /// cannot supply, or whose operator is structurally wrong for the field,
    /// are recorded as skips and the evaluation continues. With no matches
    /// the claim is allowed; absence of a rule never blocks a claim.
    pub fn evaluate_claim(&self, claim: &ClaimSnapshot, ruleset: &Ruleset) -> RuleEvaluationResult {
        let mut matched_rules = Vec::new();
        let mut skipped_rules = Vec::new();

        for rule in ruleset.rules() {
            if !rule.is_active || !rule.in_force_on(claim.service_date) {
                continue;
            }

            let outcome = match claim.field_value(rule.field) {
                Some(field_value) => condition::evaluate(field_value, rule.operator, &rule.value),
                // Presence operators evaluate meaningfully against an absent
                // field; everything else is a skip, not a failure.
                None => match rule.operator {
                    RuleOperator::Required => Ok(false),
                    RuleOperator::Optional => Ok(true),
                    _ => {
                        debug!(
                            rule = %rule.id.0,
                            field = rule.field.label(),
                            "claim snapshot does not supply field; rule skipped"
                        );
                        skipped_rules.push(SkippedRule {
                            rule_id: rule.id.clone(),
                            reason: RuleSkipReason::FieldNotApplicable,
                        });
                        continue;
                    }
                },
            };

            match outcome {
                Ok(true) => matched_rules.push(MatchedRule {
                    rule_id: rule.id.clone(),
                    field: rule.field,
                    operator: rule.operator,
                    action: rule.action,
                }),
                Ok(false) => {}
                Err(IncompatibleOperator) => {
                    warn!(
                        rule = %rule.id.0,
                        field = rule.field.label(),
                        operator = rule.operator.label(),
                        "operator incompatible with field; rule skipped"
                    );
                    skipped_rules.push(SkippedRule {
                        rule_id: rule.id.clone(),
                        reason: RuleSkipReason::IncompatibleOperator,
                    });
                }
            }
        }

        let final_action = self
            .precedence
            .resolve(matched_rules.iter().map(|matched| matched.action));

        RuleEvaluationResult {
            claim_id: claim.claim_id.clone(),
            matched_rules,
            skipped_rules,
            final_action,
        }
    }
}
