use crate::{
    db::{Db, Page, Query},
    lifecycle::{self, LifecyclePolicy, ProposeError, RejectionReason, TermProposal},
    model::{Contract, DynamicTerm, EntityKind, TermTemplate},
    service::{self, ServiceError},
    types::{Date, Id, Timestamp},
    validate::validate_value,
};
use log::{debug, warn};

pub fn filter(db: &Db, query: &Query) -> Result<Page<DynamicTerm>, ServiceError> {
    Ok(query.run(&*db.terms()?)?)
}

/// Set a contract's term: run the full lifecycle (date ordering, template
/// activity, rule validation) and persist the new row only on a clean
/// verdict. The open-interval invariant (at most one active row without an
/// expiration per contract/template pair) is enforced here, not left to
/// caller discipline.
pub fn propose(
    db: &Db,
    policy: LifecyclePolicy,
    proposal: TermProposal,
) -> Result<DynamicTerm, ServiceError> {
    let template = db.templates()?.try_get(proposal.term_template_id)?.clone();
    let rules = service::rules::for_template(db, template.term_template_id)?;
    let now = Timestamp::now();

    let term = match lifecycle::propose_term(&template, &rules, proposal, now) {
        Ok(term) => term,
        Err(err) => {
            warn!("term proposal rejected: {err}");
            return Err(err.into());
        }
    };

    let mut terms = db.terms_mut()?;
    let open: Vec<Id<DynamicTerm>> = terms
        .iter()
        .filter(|t| {
            t.contract_id == term.contract_id
                && t.term_template_id == term.term_template_id
                && t.is_open()
        })
        .map(EntityKind::id)
        .collect();

    if term.is_open() && !open.is_empty() {
        if policy.auto_supersede {
            for id in &open {
                let mut superseded = terms.try_get(*id)?.clone();
                superseded.is_active = false;
                superseded.audit.stamp_updated(now);
                terms.replace(superseded)?;
                debug!("superseded open term {id}");
            }
        } else {
            let rejection = RejectionReason::OpenTermExists { existing: open[0] };
            warn!("term proposal rejected: {rejection}");

            return Err(ServiceError::Propose(rejection.into()));
        }
    }

    terms.insert(term.clone())?;
    debug!(
        "created dynamic term {} for contract {}",
        term.term_id, term.contract_id
    );

    Ok(term)
}

pub fn get(db: &Db, id: Id<DynamicTerm>) -> Result<DynamicTerm, ServiceError> {
    Ok(db.terms()?.try_get(id)?.clone())
}

/// Amend a term row. The amended row is re-validated against its template's
/// rules and the same date and open-interval invariants as a new proposal.
pub fn update(
    db: &Db,
    id: Id<DynamicTerm>,
    mut term: DynamicTerm,
) -> Result<DynamicTerm, ServiceError> {
    term.term_id = id;

    if let Some(expiration) = term.expiration_date {
        if expiration < term.effective_date {
            return Err(ServiceError::Propose(
                RejectionReason::DatesOutOfOrder {
                    effective: term.effective_date,
                    expiration,
                }
                .into(),
            ));
        }
    }

    let template = db.templates()?.try_get(term.term_template_id)?.clone();
    let rules = service::rules::for_template(db, template.term_template_id)?;

    let verdict = validate_value(&template, &rules, &term.value)
        .map_err(|err| ServiceError::Propose(ProposeError::Config(err)))?;
    if !verdict.is_valid() {
        warn!("term amendment rejected: {verdict}");

        return Err(ServiceError::Propose(
            RejectionReason::Invalid(verdict).into(),
        ));
    }

    let mut terms = db.terms_mut()?;

    if term.is_open() {
        let conflicting = terms.iter().find(|t| {
            t.term_id != id
                && t.contract_id == term.contract_id
                && t.term_template_id == term.term_template_id
                && t.is_open()
        });
        if let Some(existing) = conflicting {
            return Err(ServiceError::Propose(
                RejectionReason::OpenTermExists {
                    existing: existing.term_id,
                }
                .into(),
            ));
        }
    }

    let updated = service::replace_existing(&mut terms, id, term, Timestamp::now())?;
    debug!("updated dynamic term {id}");

    Ok(updated)
}

pub fn delete(db: &Db, id: Id<DynamicTerm>) -> Result<(), ServiceError> {
    db.terms_mut()?.remove(id)?;
    debug!("deleted dynamic term {id}");

    Ok(())
}

/// The current value of a (contract, template) pair as of a given day:
/// latest effective date wins, newest row breaking ties.
pub fn current(
    db: &Db,
    contract_id: Id<Contract>,
    template_id: Id<TermTemplate>,
    as_of: Date,
) -> Result<Option<DynamicTerm>, ServiceError> {
    let terms = db.terms()?;
    let current = terms
        .iter()
        .filter(|t| {
            t.contract_id == contract_id
                && t.term_template_id == template_id
                && t.is_effective(as_of)
        })
        .max_by_key(|t| (t.effective_date, t.term_id))
        .cloned();

    Ok(current)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{TermCategory, ValidationRule, ValidationType},
        service::{rules, templates},
        value::{DataType, Value},
    };
    use serde_json::json;

    fn day(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn seeded_template(db: &Db, data_type: DataType) -> TermTemplate {
        templates::create(
            db,
            TermTemplate::new(
                "PAYMENT_TERMS",
                "Payment Terms",
                TermCategory::Financial,
                data_type,
            ),
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
    fn valid_proposal_is_persisted() {
        let db = Db::new();
        let template = seeded_template(&db, DataType::Text);
        rules::create(
            &db,
            ValidationRule::new(
                template.term_template_id,
                ValidationType::List,
                json!({"values": ["NET30", "NET60"]}),
            ),
        )
        .unwrap();

        let term = propose(
            &db,
            LifecyclePolicy::default(),
            proposal(&template, Value::Text("NET30".into()), "2025-06-01"),
        )
        .unwrap();

        assert_eq!(get(&db, term.term_id).unwrap(), term);
    }

    #[test]
    fn invalid_proposal_persists_nothing() {
        let db = Db::new();
        let template = seeded_template(&db, DataType::Text);
        rules::create(
            &db,
            ValidationRule::new(
                template.term_template_id,
                ValidationType::List,
                json!({"values": ["NET30", "NET60"]}),
            ),
        )
        .unwrap();

        let result = propose(
            &db,
            LifecyclePolicy::default(),
            proposal(&template, Value::Text("NET45".into()), "2025-06-01"),
        );

        assert!(matches!(
            result,
            Err(ServiceError::Propose(ProposeError::Rejected(
                RejectionReason::Invalid(_)
            )))
        ));
        assert!(db.terms().unwrap().is_empty());
    }

    #[test]
    fn missing_template_is_not_found() {
        let db = Db::new();
        let ghost = TermTemplate::new("GHOST", "Ghost", TermCategory::Other, DataType::Text);

        let result = propose(
            &db,
            LifecyclePolicy::default(),
            proposal(&ghost, Value::Text("x".into()), "2025-06-01"),
        );
        assert!(matches!(result, Err(ServiceError::Store(_))));
    }

    #[test]
    fn second_open_term_conflicts_by_default() {
        let db = Db::new();
        let template = seeded_template(&db, DataType::Text);
        let contract_id = Id::generate();

        let mut first = proposal(&template, Value::Text("NET30".into()), "2025-01-01");
        first.contract_id = contract_id;
        propose(&db, LifecyclePolicy::default(), first).unwrap();

        let mut second = proposal(&template, Value::Text("NET60".into()), "2025-06-01");
        second.contract_id = contract_id;
        let result = propose(&db, LifecyclePolicy::default(), second);

        assert!(matches!(
            result,
            Err(ServiceError::Propose(ProposeError::Rejected(
                RejectionReason::OpenTermExists { .. }
            )))
        ));
    }

    #[test]
    fn auto_supersede_deactivates_the_predecessor() {
        let db = Db::new();
        let template = seeded_template(&db, DataType::Text);
        let contract_id = Id::generate();

        let mut first = proposal(&template, Value::Text("NET30".into()), "2025-01-01");
        first.contract_id = contract_id;
        let predecessor = propose(&db, LifecyclePolicy::default(), first).unwrap();

        let mut second = proposal(&template, Value::Text("NET60".into()), "2025-06-01");
        second.contract_id = contract_id;
        let successor = propose(&db, LifecyclePolicy::superseding(), second).unwrap();

        let old = get(&db, predecessor.term_id).unwrap();
        assert!(!old.is_active, "predecessor must be deactivated");
        assert!(get(&db, successor.term_id).unwrap().is_active);
    }

    #[test]
    fn closed_terms_do_not_conflict() {
        let db = Db::new();
        let template = seeded_template(&db, DataType::Text);
        let contract_id = Id::generate();

        let mut first = proposal(&template, Value::Text("NET30".into()), "2025-01-01");
        first.contract_id = contract_id;
        first.expiration_date = Some(day("2025-05-31"));
        propose(&db, LifecyclePolicy::default(), first).unwrap();

        let mut second = proposal(&template, Value::Text("NET60".into()), "2025-06-01");
        second.contract_id = contract_id;
        assert!(propose(&db, LifecyclePolicy::default(), second).is_ok());
    }

    #[test]
    fn current_picks_latest_effective() {
        let db = Db::new();
        let template = seeded_template(&db, DataType::Text);
        let contract_id = Id::generate();

        let mut early = proposal(&template, Value::Text("NET30".into()), "2025-01-01");
        early.contract_id = contract_id;
        early.expiration_date = Some(day("2025-12-31"));
        propose(&db, LifecyclePolicy::default(), early).unwrap();

        let mut late = proposal(&template, Value::Text("NET60".into()), "2025-06-01");
        late.contract_id = contract_id;
        late.expiration_date = Some(day("2025-12-31"));
        propose(&db, LifecyclePolicy::default(), late).unwrap();

        let current = current(&db, contract_id, template.term_template_id, day("2025-07-01"))
            .unwrap()
            .expect("a term must be effective");
        assert_eq!(current.value, Value::Text("NET60".into()));

        // before the later term takes effect, the earlier one still rules
        let current = super::current(
            &db,
            contract_id,
            template.term_template_id,
            day("2025-03-01"),
        )
        .unwrap()
        .expect("a term must be effective");
        assert_eq!(current.value, Value::Text("NET30".into()));
    }

    #[test]
    fn amendment_revalidates_and_keeps_invariants() {
        let db = Db::new();
        let template = seeded_template(&db, DataType::Text);
        rules::create(
            &db,
            ValidationRule::new(
                template.term_template_id,
                ValidationType::List,
                json!({"values": ["NET30", "NET60"]}),
            ),
        )
        .unwrap();

        let term = propose(
            &db,
            LifecyclePolicy::default(),
            proposal(&template, Value::Text("NET30".into()), "2025-01-01"),
        )
        .unwrap();

        // value outside the list is rejected on amendment too
        let mut bad = term.clone();
        bad.value = Value::Text("NET45".into());
        assert!(matches!(
            update(&db, term.term_id, bad),
            Err(ServiceError::Propose(ProposeError::Rejected(
                RejectionReason::Invalid(_)
            )))
        ));

        // inverted dates are rejected
        let mut inverted = term.clone();
        inverted.expiration_date = Some(day("2024-01-01"));
        assert!(matches!(
            update(&db, term.term_id, inverted),
            Err(ServiceError::Propose(ProposeError::Rejected(
                RejectionReason::DatesOutOfOrder { .. }
            )))
        ));

        // a clean amendment goes through
        let mut good = term.clone();
        good.value = Value::Text("NET60".into());
        let updated = update(&db, term.term_id, good).unwrap();
        assert_eq!(updated.value, Value::Text("NET60".into()));
        assert_eq!(updated.audit.created_at, term.audit.created_at);
    }
}
