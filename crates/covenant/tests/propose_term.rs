//! End-to-end exercise of the term proposal flow through the facade
//! surface: template and rule administration, proposal, rejection shapes,
//! and the open-interval policy.

use covenant::prelude::*;
use serde_json::json;
use std::str::FromStr;

fn day(s: &str) -> Date {
    Date::parse(s).unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn text_template(db: &Db, code: &str) -> TermTemplate {
    service::templates::create(
        db,
        TermTemplate::new(code, "Payment Terms", TermCategory::Financial, DataType::Text),
    )
    .unwrap()
}

fn proposal(template: &TermTemplate, value: Value, effective: &str) -> TermProposal {
    TermProposal::new(
        Id::generate(),
        template.term_template_id,
        value,
        day(effective),
    )
}

#[test]
fn the_full_happy_path() {
    let db = Db::new();
    let template = text_template(&db, "PAYMENT_TERMS");

    service::rules::create(
        &db,
        ValidationRule::new(
            template.term_template_id,
            ValidationType::Regex,
            json!({"pattern": "^NET[0-9]{2}$"}),
        ),
    )
    .unwrap();
    service::rules::create(
        &db,
        ValidationRule::new(
            template.term_template_id,
            ValidationType::List,
            json!({"values": ["NET30", "NET60", "NET90"]}),
        ),
    )
    .unwrap();

    let term = service::terms::propose(
        &db,
        LifecyclePolicy::default(),
        proposal(&template, Value::Text("NET30".into()), "2025-06-01"),
    )
    .unwrap();

    assert!(term.is_active);
    assert!(term.is_open());

    let current = service::terms::current(
        &db,
        term.contract_id,
        template.term_template_id,
        day("2025-07-01"),
    )
    .unwrap()
    .expect("the new term must be current");
    assert_eq!(current.term_id, term.term_id);
}

#[test]
fn every_failing_rule_is_reported_in_one_round_trip() {
    let db = Db::new();
    let template = text_template(&db, "PAYMENT_TERMS");

    service::rules::create(
        &db,
        ValidationRule::new(
            template.term_template_id,
            ValidationType::Regex,
            json!({"pattern": "^NET[0-9]{2}$"}),
        ),
    )
    .unwrap();
    service::rules::create(
        &db,
        ValidationRule::new(
            template.term_template_id,
            ValidationType::Length,
            json!({"minLength": 10, "maxLength": 50}),
        ),
    )
    .unwrap();

    let result = service::terms::propose(
        &db,
        LifecyclePolicy::default(),
        proposal(&template, Value::Text("bogus".into()), "2025-06-01"),
    );

    let err: Error = result.unwrap_err().into();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.failures.len(), 2, "no short-circuiting");
    assert!(db.terms().unwrap().is_empty(), "nothing may be persisted");
}

#[test]
fn date_ordering_is_rejected_before_rules_run() {
    let db = Db::new();
    let template = text_template(&db, "PAYMENT_TERMS");

    // a rule the candidate would fail: if rules ran first this would be a
    // Validation error, not a Rejected one
    service::rules::create(
        &db,
        ValidationRule::new(
            template.term_template_id,
            ValidationType::List,
            json!({"values": ["NET30"]}),
        ),
    )
    .unwrap();

    let mut p = proposal(&template, Value::Text("NET99".into()), "2025-06-01");
    p.expiration_date = Some(day("2025-01-01"));

    let err: Error = service::terms::propose(&db, LifecyclePolicy::default(), p)
        .unwrap_err()
        .into();
    assert_eq!(err.kind, ErrorKind::Rejected);
    assert!(err.message.contains("2025-01-01"));
}

#[test]
fn broken_criteria_surface_as_config_errors() {
    let db = Db::new();
    let template = text_template(&db, "PAYMENT_TERMS");

    // the rule service refuses malformed criteria outright
    let refused = service::rules::create(
        &db,
        ValidationRule::new(
            template.term_template_id,
            ValidationType::Range,
            json!({"pattern": "^a$"}),
        ),
    );
    let err: Error = refused.unwrap_err().into();
    assert_eq!(err.kind, ErrorKind::Config);
    assert_eq!(err.origin, ErrorOrigin::Criteria);
}

#[test]
fn inactive_templates_reject_unless_overridden() {
    let db = Db::new();
    let template = text_template(&db, "PAYMENT_TERMS");

    let mut retired = template.clone();
    retired.is_active = false;
    service::templates::update(&db, template.term_template_id, retired).unwrap();

    let err: Error =
        service::terms::propose(
            &db,
            LifecyclePolicy::default(),
            proposal(&template, Value::Text("NET30".into()), "2025-06-01"),
        )
        .unwrap_err()
        .into();
    assert_eq!(err.kind, ErrorKind::Rejected);

    let mut p = proposal(&template, Value::Text("NET30".into()), "2025-06-01");
    p.admin_override = true;
    assert!(service::terms::propose(&db, LifecyclePolicy::default(), p).is_ok());
}

#[test]
fn numeric_range_end_to_end() {
    let db = Db::new();
    let template = service::templates::create(
        &db,
        TermTemplate::new(
            "DISCOUNT_PCT",
            "Discount Percentage",
            TermCategory::Financial,
            DataType::Numeric,
        ),
    )
    .unwrap();

    service::rules::create(
        &db,
        ValidationRule::new(
            template.term_template_id,
            ValidationType::Range,
            json!({"min": 0, "max": 100}),
        ),
    )
    .unwrap();

    for ok in ["0", "100", "12.5"] {
        let p = proposal(&template, Value::Decimal(dec(ok)), "2025-06-01");
        assert!(
            service::terms::propose(&db, LifecyclePolicy::default(), p).is_ok(),
            "{ok} must be accepted"
        );
    }

    let p = proposal(&template, Value::Decimal(dec("150")), "2025-06-01");
    let err: Error = service::terms::propose(&db, LifecyclePolicy::default(), p)
        .unwrap_err()
        .into();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.failures.len(), 1);
    assert!(err.failures[0].message.contains("100"));
}

#[test]
fn open_interval_policy_is_enforced_at_the_store() {
    let db = Db::new();
    let template = text_template(&db, "PAYMENT_TERMS");
    let contract_id = Id::generate();

    let mut first = proposal(&template, Value::Text("NET30".into()), "2025-01-01");
    first.contract_id = contract_id;
    let predecessor =
        service::terms::propose(&db, LifecyclePolicy::default(), first).unwrap();

    // default policy: a second open-ended term for the pair is a conflict
    let mut second = proposal(&template, Value::Text("NET60".into()), "2025-06-01");
    second.contract_id = contract_id;
    let err: Error = service::terms::propose(&db, LifecyclePolicy::default(), second)
        .unwrap_err()
        .into();
    assert_eq!(err.kind, ErrorKind::Conflict);

    // superseding policy: the predecessor is deactivated, never mutated
    // in its value
    let mut second = proposal(&template, Value::Text("NET60".into()), "2025-06-01");
    second.contract_id = contract_id;
    let successor =
        service::terms::propose(&db, LifecyclePolicy::superseding(), second).unwrap();

    let old = service::terms::get(&db, predecessor.term_id).unwrap();
    assert!(!old.is_active);
    assert_eq!(old.value, Value::Text("NET30".into()));
    assert!(service::terms::get(&db, successor.term_id).unwrap().is_active);
}

#[test]
fn template_deletion_cascades_to_rules_but_not_terms() {
    let db = Db::new();
    let template = text_template(&db, "PAYMENT_TERMS");

    service::rules::create(
        &db,
        ValidationRule::new(
            template.term_template_id,
            ValidationType::Required,
            json!({"required": true}),
        ),
    )
    .unwrap();

    let term = service::terms::propose(
        &db,
        LifecyclePolicy::default(),
        proposal(&template, Value::Text("NET30".into()), "2025-06-01"),
    )
    .unwrap();

    service::templates::delete(&db, template.term_template_id).unwrap();

    assert!(db.rules().unwrap().is_empty(), "rules cascade");
    assert!(
        service::terms::get(&db, term.term_id).is_ok(),
        "terms keep their history"
    );
}
