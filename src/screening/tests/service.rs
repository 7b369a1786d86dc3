use std::sync::Arc;

use super::common::*;
use crate::screening::domain::{PayerId, RuleField};
use crate::screening::registry::RulesetStore;
use crate::screening::rule::{RuleAction, RuleOperator, RulesetError};
use crate::screening::service::{ClaimScreeningService, ScreeningError};

#[test]
fn load_rules_stores_validated_ruleset() {
    let (service, store) = build_service();

    let added = service
        .load_rules(
            &payer(),
            vec![rule_input(
                "r-1",
                RuleField::CptCode,
                RuleOperator::In,
                "99215,99216,99217",
                RuleAction::RequirePriorAuth,
            )],
        )
        .expect("rules load");

    assert_eq!(added, 1);
    let stored = store.fetch(&payer()).expect("fetch").expect("ruleset");
    assert_eq!(stored.len(), 1);
}

#[test]
fn load_rules_rejects_batch_on_first_malformed_input() {
    let (service, store) = build_service();

    let result = service.load_rules(
        &payer(),
        vec![
            rule_input(
                "r-1",
                RuleField::CptCode,
                RuleOperator::In,
                "99215",
                RuleAction::Deny,
            ),
            rule_input(
                "r-2",
                RuleField::VisitCount,
                RuleOperator::Between,
                "abc",
                RuleAction::FlagForReview,
            ),
        ],
    );

    match result {
        Err(ScreeningError::Validation(_)) => {}
        other => panic!("expected validation error, got {other:?}"),
    }
    // Nothing partial is stored.
    assert!(store.fetch(&payer()).expect("fetch").is_none());
}

#[test]
fn load_rules_rejects_duplicate_ids() {
    let (service, _store) = build_service();

    service
        .load_rules(
            &payer(),
            vec![rule_input(
                "r-1",
                RuleField::CptCode,
                RuleOperator::In,
                "99215",
                RuleAction::Deny,
            )],
        )
        .expect("first load");

    let result = service.load_rules(
        &payer(),
        vec![rule_input(
            "r-1",
            RuleField::Modifier,
            RuleOperator::Required,
            "",
            RuleAction::RequireModifier,
        )],
    );

    match result {
        Err(ScreeningError::Ruleset(RulesetError::DuplicateRule(id))) => {
            assert_eq!(id.0, "r-1");
        }
        other => panic!("expected duplicate rule error, got {other:?}"),
    }
}

#[test]
fn screen_resolves_prior_auth_for_matching_claim() {
    let (service, _store) = build_service();

    service
        .load_rules(
            &payer(),
            vec![rule_input(
                "r-1",
                RuleField::CptCode,
                RuleOperator::In,
                "99215,99216,99217",
                RuleAction::RequirePriorAuth,
            )],
        )
        .expect("rules load");

    let outcome = service.screen(&claim()).expect("screen");

    assert_eq!(outcome.final_action, RuleAction::RequirePriorAuth);
    assert_eq!(outcome.matched_rules.len(), 1);
    assert_eq!(outcome.matched_rules[0].rule_id.0, "r-1");
}

#[test]
fn unknown_payer_screens_to_default_allow() {
    let (service, _store) = build_service();

    let mut snapshot = claim();
    snapshot.payer_id = PayerId("AETNA".to_string());
    let outcome = service.screen(&snapshot).expect("screen");

    assert_eq!(outcome.final_action, RuleAction::Allow);
    assert!(outcome.matched_rules.is_empty());
}

#[test]
fn store_failures_surface_as_registry_errors() {
    let service = ClaimScreeningService::new(Arc::new(UnavailableStore));

    match service.screen(&claim()) {
        Err(ScreeningError::Registry(_)) => {}
        other => panic!("expected registry error, got {other:?}"),
    }
}
