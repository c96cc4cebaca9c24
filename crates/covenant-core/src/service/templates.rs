use crate::{
    db::{Db, Page, Query},
    model::{EntityKind, TermTemplate},
    service::{self, InputError, ServiceError},
    types::{Id, Timestamp},
};
use log::debug;

pub fn filter(db: &Db, query: &Query) -> Result<Page<TermTemplate>, ServiceError> {
    Ok(query.run(&*db.templates()?)?)
}

/// Create a template. `code` must be non-empty and unique; it never changes
/// again after this point.
pub fn create(db: &Db, template: TermTemplate) -> Result<TermTemplate, ServiceError> {
    if template.code.trim().is_empty() {
        return Err(InputError::Empty { field: "code" }.into());
    }

    let mut store = db.templates_mut()?;
    if store.iter().any(|t| t.code == template.code) {
        return Err(InputError::DuplicateCode {
            code: template.code,
        }
        .into());
    }

    let created = service::insert_new(&mut store, template, Timestamp::now())?;
    debug!(
        "created term template {} ({})",
        created.code, created.term_template_id
    );

    Ok(created)
}

pub fn get(db: &Db, id: Id<TermTemplate>) -> Result<TermTemplate, ServiceError> {
    Ok(db.templates()?.try_get(id)?.clone())
}

/// Look a template up by its unique code.
pub fn get_by_code(db: &Db, code: &str) -> Result<TermTemplate, ServiceError> {
    let store = db.templates()?;
    let found = store.iter().find(|t| t.code == code).cloned();

    found.ok_or_else(|| {
        crate::db::StoreError::CodeNotFound {
            entity: TermTemplate::PATH,
            code: code.to_string(),
        }
        .into()
    })
}

pub fn update(
    db: &Db,
    id: Id<TermTemplate>,
    mut template: TermTemplate,
) -> Result<TermTemplate, ServiceError> {
    template.term_template_id = id;

    let mut store = db.templates_mut()?;
    if store.try_get(id)?.code != template.code {
        return Err(InputError::ImmutableCode.into());
    }

    let updated = service::replace_existing(&mut store, id, template, Timestamp::now())?;
    debug!("updated term template {id}");

    Ok(updated)
}

/// Delete a template and cascade-delete its validation rules. Dynamic terms
/// referencing the template keep their history.
pub fn delete(db: &Db, id: Id<TermTemplate>) -> Result<(), ServiceError> {
    db.templates_mut()?.remove(id)?;

    let mut rules = db.rules_mut()?;
    let doomed: Vec<_> = rules
        .iter()
        .filter(|r| r.term_template_id == id)
        .map(EntityKind::id)
        .collect();
    let cascade = doomed.len();
    for rule_id in doomed {
        rules.remove(rule_id)?;
    }

    debug!("deleted term template {id} and {cascade} rule(s)");

    Ok(())
}

///
/// TESTS
///
