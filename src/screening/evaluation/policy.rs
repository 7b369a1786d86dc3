use serde::{Deserialize, Serialize};

use crate::screening::domain::{ClaimId, RuleField};
use crate::screening::rule::{RuleAction, RuleId, RuleOperator};

/// One rule that triggered during an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedRule {
    pub rule_id: RuleId,
    pub field: RuleField,
    pub operator: RuleOperator,
    pub action: RuleAction,
}

impl MatchedRule {
    pub fn reason(&self) -> String {
        format!(
            "rule {}: {} {} triggers {}",
            self.rule_id.0,
            self.field.label(),
            self.operator.label(),
            self.action.label()
        )
    }
}

/// Why a rule was set aside instead of evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleSkipReason {
    /// The claim snapshot cannot supply the field the rule references.
    FieldNotApplicable,
    /// The operator is structurally wrong for the field's kind.
    IncompatibleOperator,
}

/// A rule recorded in the result without contributing a match. One bad rule
/// never aborts the evaluation of a claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRule {
    pub rule_id: RuleId,
    pub reason: RuleSkipReason,
}

/// Outcome of screening one claim against one payer's ruleset.
///
/// Created fresh per call and handed straight back to the caller; the engine
/// keeps no history. Matched and skipped rules appear in ruleset insertion
/// order, so identical inputs serialize identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleEvaluationResult {
    pub claim_id: ClaimId,
    pub matched_rules: Vec<MatchedRule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_rules: Vec<SkippedRule>,
    pub final_action: RuleAction,
}

impl RuleEvaluationResult {
    pub fn summary(&self) -> String {
        if self.matched_rules.is_empty() {
            return format!("{}: no payer rules matched", self.final_action.label());
        }
        let reasons: Vec<String> = self
            .matched_rules
            .iter()
            .map(MatchedRule::reason)
            .collect();
        format!("{}: {}", self.final_action.label(), reasons.join("; "))
    }
}
