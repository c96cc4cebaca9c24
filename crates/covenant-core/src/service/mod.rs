pub mod contracts;
pub mod documents;
pub mod events;
pub mod parties;
pub mod risk_assessments;
pub mod rules;
pub mod status_history;
pub mod templates;
pub mod terms;

use crate::{
    db::{QueryError, Store, StoreError},
    lifecycle::ProposeError,
    model::EntityKind,
    types::{Decimal, Id, Timestamp},
    validate::CriteriaError,
};
use thiserror::Error as ThisError;

///
/// InputError
/// Wire-contract constraint violations, checked before any store call.
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum InputError {
    #[error("template code {code:?} is already in use")]
    DuplicateCode { code: String },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("template code is immutable once created")]
    ImmutableCode,

    #[error("risk score {score} must be between 0 and 100")]
    ScoreOutOfRange { score: Decimal },

    #[error("{field} must not exceed {max} characters (got {len})")]
    TooLong {
        field: &'static str,
        max: usize,
        len: usize,
    },
}

///
/// ServiceError
///

#[derive(Debug, ThisError)]
pub enum ServiceError {
    #[error(transparent)]
    Criteria(#[from] CriteriaError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Propose(#[from] ProposeError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub(crate) fn check_len(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), InputError> {
    match value {
        Some(s) if s.chars().count() > max => Err(InputError::TooLong {
            field,
            max,
            len: s.chars().count(),
        }),
        _ => Ok(()),
    }
}

/// Stamp and insert a freshly built row.
pub(crate) fn insert_new<E: EntityKind>(
    store: &mut Store<E>,
    mut entity: E,
    now: Timestamp,
) -> Result<E, StoreError> {
    entity.audit_mut().stamp_created(now);
    store.insert(entity.clone())?;

    Ok(entity)
}

/// Replace an existing row, preserving its creation stamp. The caller has
/// already forced the identity onto the replacement.
pub(crate) fn replace_existing<E: EntityKind>(
    store: &mut Store<E>,
    id: Id<E>,
    mut entity: E,
    now: Timestamp,
) -> Result<E, StoreError> {
    let created_at = store.try_get(id)?.audit().created_at;

    entity.audit_mut().created_at = created_at;
    entity.audit_mut().stamp_updated(now);
    store.replace(entity.clone())?;

    Ok(entity)
}
