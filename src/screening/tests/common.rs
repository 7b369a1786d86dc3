use std::sync::Arc;

use chrono::NaiveDate;

use crate::screening::domain::{ClaimId, ClaimSnapshot, PayerId, RuleField};
use crate::screening::evaluation::{RuleEngine, RuleEvaluationResult};
use crate::screening::registry::{InMemoryRulesetStore, RegistryError, RulesetStore};
use crate::screening::rule::{Rule, RuleAction, RuleId, RuleInput, RuleOperator, Ruleset};
use crate::screening::service::ClaimScreeningService;
use crate::screening::validation::validate_rule;

pub(super) fn payer() -> PayerId {
    PayerId("BCBS".to_string())
}

pub(super) fn service_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
}

pub(super) fn claim() -> ClaimSnapshot {
    ClaimSnapshot {
        claim_id: ClaimId("clm-1001".to_string()),
        payer_id: payer(),
        cpt_codes: vec!["99215".to_string(), "99213".to_string()],
        icd_codes: vec!["E11.9".to_string(), "I10".to_string()],
        modifiers: vec!["25".to_string()],
        visit_count: Some(3),
        coverage_status: Some("active".to_string()),
        patient_age: Some(47),
        service_date: service_date(),
    }
}

pub(super) fn rule_input(
    id: &str,
    field: RuleField,
    operator: RuleOperator,
    value: &str,
    action: RuleAction,
) -> RuleInput {
    RuleInput {
        id: RuleId(id.to_string()),
        payer_id: payer(),
        field,
        operator,
        value: value.to_string(),
        action,
        is_active: true,
        effective_date: None,
        expiration_date: None,
    }
}

pub(super) fn rule(
    id: &str,
    field: RuleField,
    operator: RuleOperator,
    value: &str,
    action: RuleAction,
) -> Rule {
    validate_rule(rule_input(id, field, operator, value, action)).expect("rule validates")
}

pub(super) fn ruleset_of(rules: Vec<Rule>) -> Ruleset {
    let mut ruleset = Ruleset::new(payer());
    for rule in rules {
        ruleset.insert(rule).expect("unique rule id");
    }
    ruleset
}

pub(super) fn evaluate(claim: &ClaimSnapshot, rules: Vec<Rule>) -> RuleEvaluationResult {
    RuleEngine::default().evaluate_claim(claim, &ruleset_of(rules))
}

pub(super) fn build_service() -> (
    ClaimScreeningService<InMemoryRulesetStore>,
    Arc<InMemoryRulesetStore>,
) {
    let store = Arc::new(InMemoryRulesetStore::new());
    let service = ClaimScreeningService::new(store.clone());
    (service, store)
}

pub(super) struct UnavailableStore;

impl RulesetStore for UnavailableStore {
    fn fetch(&self, _payer_id: &PayerId) -> Result<Option<Ruleset>, RegistryError> {
        Err(RegistryError::Unavailable("store offline".to_string()))
    }

    fn upsert(&self, _ruleset: Ruleset) -> Result<(), RegistryError> {
        Err(RegistryError::Unavailable("store offline".to_string()))
    }

    fn payers(&self) -> Result<Vec<PayerId>, RegistryError> {
        Err(RegistryError::Unavailable("store offline".to_string()))
    }
}
