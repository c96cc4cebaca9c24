use crate::{
    db::{Db, Page, Query},
    model::{TermTemplate, ValidationRule},
    service::{self, ServiceError},
    types::{Id, Timestamp},
    validate::RuleCriteria,
};
use log::debug;

const MAX_ERROR_MESSAGE: usize = 500;

pub fn filter(db: &Db, query: &Query) -> Result<Page<ValidationRule>, ServiceError> {
    Ok(query.run(&*db.rules()?)?)
}

/// Rules for one template, in creation order. This is the set the
/// orchestrator evaluates.
pub fn for_template(
    db: &Db,
    template_id: Id<TermTemplate>,
) -> Result<Vec<ValidationRule>, ServiceError> {
    let store = db.rules()?;
    let rules = store
        .iter()
        .filter(|r| r.term_template_id == template_id)
        .cloned()
        .collect();

    Ok(rules)
}

/// Create a rule. The template must exist and the criteria must decode for
/// the declared validation type, so a broken rule never reaches storage.
pub fn create(db: &Db, rule: ValidationRule) -> Result<ValidationRule, ServiceError> {
    validate(db, &rule)?;

    let mut store = db.rules_mut()?;
    let created = service::insert_new(&mut store, rule, Timestamp::now())?;
    debug!(
        "created {} rule {} on template {}",
        created.validation_type, created.validation_rule_id, created.term_template_id
    );

    Ok(created)
}

pub fn get(db: &Db, id: Id<ValidationRule>) -> Result<ValidationRule, ServiceError> {
    Ok(db.rules()?.try_get(id)?.clone())
}

pub fn update(
    db: &Db,
    id: Id<ValidationRule>,
    mut rule: ValidationRule,
) -> Result<ValidationRule, ServiceError> {
    validate(db, &rule)?;
    rule.validation_rule_id = id;

    let mut store = db.rules_mut()?;
    let updated = service::replace_existing(&mut store, id, rule, Timestamp::now())?;
    debug!("updated validation rule {id}");

    Ok(updated)
}

pub fn delete(db: &Db, id: Id<ValidationRule>) -> Result<(), ServiceError> {
    db.rules_mut()?.remove(id)?;
    debug!("deleted validation rule {id}");

    Ok(())
}

fn validate(db: &Db, rule: &ValidationRule) -> Result<(), ServiceError> {
    db.templates()?.try_get(rule.term_template_id)?;
    RuleCriteria::decode(rule.validation_type, &rule.criteria)?;
    service::check_len(
        "error_message",
        rule.error_message.as_deref(),
        MAX_ERROR_MESSAGE,
    )?;

    Ok(())
}

///
/// TESTS
///
