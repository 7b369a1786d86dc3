use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{PayerId, RuleField};

/// Identifier wrapper for authored payer rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleId(pub String);

/// Conditional operators available to rule authors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleOperator {
    Equals,
    NotEquals,
    In,
    NotIn,
    StartsWith,
    EndsWith,
    Contains,
    Between,
    LessThan,
    GreaterThan,
    Required,
    Optional,
}

impl RuleOperator {
    pub const fn label(self) -> &'static str {
        match self {
            RuleOperator::Equals => "equals",
            RuleOperator::NotEquals => "notEquals",
            RuleOperator::In => "in",
            RuleOperator::NotIn => "notIn",
            RuleOperator::StartsWith => "startsWith",
            RuleOperator::EndsWith => "endsWith",
            RuleOperator::Contains => "contains",
            RuleOperator::Between => "between",
            RuleOperator::LessThan => "lessThan",
            RuleOperator::GreaterThan => "greaterThan",
            RuleOperator::Required => "required",
            RuleOperator::Optional => "optional",
        }
    }
}

/// Outcome a rule contributes when it matches a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleAction {
    Allow,
    Deny,
    RequirePriorAuth,
    RequireModifier,
    RequireSpecificity,
    RequireVerification,
    FlagForReview,
    AutoAdjust,
}

impl RuleAction {
    pub const fn label(self) -> &'static str {
        match self {
            RuleAction::Allow => "allow",
            RuleAction::Deny => "deny",
            RuleAction::RequirePriorAuth => "requirePriorAuth",
            RuleAction::RequireModifier => "requireModifier",
            RuleAction::RequireSpecificity => "requireSpecificity",
            RuleAction::RequireVerification => "requireVerification",
            RuleAction::FlagForReview => "flagForReview",
            RuleAction::AutoAdjust => "autoAdjust",
        }
    }

    pub(crate) const ALL: [RuleAction; 8] = [
        RuleAction::Deny,
        RuleAction::RequirePriorAuth,
        RuleAction::RequireVerification,
        RuleAction::RequireSpecificity,
        RuleAction::RequireModifier,
        RuleAction::FlagForReview,
        RuleAction::AutoAdjust,
        RuleAction::Allow,
    ];
}

/// Raw rule exactly as authored in the payer-rules screen, prior to validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleInput {
    pub id: RuleId,
    pub payer_id: PayerId,
    pub field: RuleField,
    pub operator: RuleOperator,
    #[serde(default)]
    pub value: String,
    pub action: RuleAction,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,
}

const fn default_active() -> bool {
    true
}

/// Typed payload of a validated rule. The shape is fixed by the operator and
/// the field kind at validation time, so evaluation never re-parses strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleValue {
    None,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    List(Vec<String>),
    NumberRange { lo: f64, hi: f64 },
    DateRange { lo: NaiveDate, hi: NaiveDate },
}

/// A validated payer rule. Only [`validate_rule`](super::validation::validate_rule)
/// produces these, so every rule inside a [`Ruleset`] is well-formed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: RuleId,
    pub payer_id: PayerId,
    pub field: RuleField,
    pub operator: RuleOperator,
    pub value: RuleValue,
    pub action: RuleAction,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,
}

impl Rule {
    /// A rule is in force for service dates within `[effective, expiration)`,
    /// open-ended wherever a bound is absent.
    pub fn in_force_on(&self, service_date: NaiveDate) -> bool {
        let started = self
            .effective_date
            .map_or(true, |effective| service_date >= effective);
        let not_expired = self
            .expiration_date
            .map_or(true, |expiration| service_date < expiration);
        started && not_expired
    }
}

/// Insertion-ordered collection of one payer's rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ruleset {
    payer_id: PayerId,
    rules: Vec<Rule>,
}

impl Ruleset {
    pub fn new(payer_id: PayerId) -> Self {
        Self {
            payer_id,
            rules: Vec::new(),
        }
    }

    pub fn payer_id(&self) -> &PayerId {
        &self.payer_id
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Add a validated rule, enforcing payer scoping and `(payer, id)` uniqueness.
    pub fn insert(&mut self, rule: Rule) -> Result<(), RulesetError> {
        if rule.payer_id != self.payer_id {
            return Err(RulesetError::PayerMismatch {
                expected: self.payer_id.clone(),
                found: rule.payer_id,
            });
        }
        if self.rules.iter().any(|existing| existing.id == rule.id) {
            return Err(RulesetError::DuplicateRule(rule.id));
        }
        self.rules.push(rule);
        Ok(())
    }
}

/// Invariant violations raised when assembling a ruleset.
#[derive(Debug, thiserror::Error)]
pub enum RulesetError {
    #[error("rule {0:?} already present in this payer's ruleset")]
    DuplicateRule(RuleId),
    #[error("rule belongs to payer {found:?} but the ruleset is scoped to {expected:?}")]
    PayerMismatch { expected: PayerId, found: PayerId },
}
