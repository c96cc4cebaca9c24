use crate::{
    db::filter::{FilterExpr, QueryError},
    model::{EntityKind, FieldValues},
    types::{Id, Ulid},
};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// StoreError
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("code {code:?} not found (entity {entity})")]
    CodeNotFound { entity: &'static str, code: String },

    #[error("key {key} already exists (entity {entity})")]
    KeyExists { entity: &'static str, key: Ulid },

    #[error("key {key} not found (entity {entity})")]
    NotFound { entity: &'static str, key: Ulid },

    #[error("store unavailable (entity {entity})")]
    Unavailable { entity: &'static str },
}

///
/// Store
///
/// Ordered in-memory rows for one entity type, keyed by ULID so iteration
/// follows creation order. Stands in for the relational table behind the
/// excluded persistence driver; everything above it only sees this surface.
///

#[derive(Debug)]
pub struct Store<E: EntityKind> {
    rows: BTreeMap<Ulid, E>,
}

impl<E: EntityKind> Store<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> u64 {
        self.rows.len() as u64
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: Id<E>) -> bool {
        self.rows.contains_key(&id.key())
    }

    /// Insert a new row. The key must not already exist.
    pub fn insert(&mut self, entity: E) -> Result<(), StoreError> {
        let key = entity.id().key();

        if self.rows.contains_key(&key) {
            return Err(StoreError::KeyExists {
                entity: E::PATH,
                key,
            });
        }
        self.rows.insert(key, entity);

        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: Id<E>) -> Option<&E> {
        self.rows.get(&id.key())
    }

    /// Like `get`, but a missing row is an error.
    pub fn try_get(&self, id: Id<E>) -> Result<&E, StoreError> {
        self.get(id).ok_or(StoreError::NotFound {
            entity: E::PATH,
            key: id.key(),
        })
    }

    /// Replace an existing row, returning the previous one.
    pub fn replace(&mut self, entity: E) -> Result<E, StoreError> {
        let key = entity.id().key();

        match self.rows.get_mut(&key) {
            Some(slot) => Ok(std::mem::replace(slot, entity)),
            None => Err(StoreError::NotFound {
                entity: E::PATH,
                key,
            }),
        }
    }

    /// Remove a row, returning it.
    pub fn remove(&mut self, id: Id<E>) -> Result<E, StoreError> {
        self.rows.remove(&id.key()).ok_or(StoreError::NotFound {
            entity: E::PATH,
            key: id.key(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.rows.values()
    }

    /// All rows matching the expression, in key order.
    pub fn search(&self, filter: &FilterExpr) -> Result<Vec<E>, QueryError>
    where
        E: FieldValues,
    {
        let mut hits = Vec::new();
        for row in self.rows.values() {
            if filter.matches(row)? {
                hits.push(row.clone());
            }
        }

        Ok(hits)
    }
}

impl<E: EntityKind> Default for Store<E> {
    fn default() -> Self {
        Self::new()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Contract, ContractStatus};

    #[test]
    fn insert_then_get() {
        let mut store = Store::new();
        let c = Contract::new(ContractStatus::Draft);
        let id = c.id();

        store.insert(c).unwrap();
        assert!(store.contains(id));
        assert_eq!(store.try_get(id).unwrap().contract_id, id);
    }

    #[test]
    fn double_insert_is_a_key_conflict() {
        let mut store = Store::new();
        let c = Contract::new(ContractStatus::Draft);

        store.insert(c.clone()).unwrap();
        assert!(matches!(
            store.insert(c),
            Err(StoreError::KeyExists { .. })
        ));
    }

    #[test]
    fn replace_requires_an_existing_row() {
        let mut store = Store::new();
        let c = Contract::new(ContractStatus::Draft);

        assert!(matches!(
            store.replace(c.clone()),
            Err(StoreError::NotFound { .. })
        ));
        assert!(store.is_empty(), "failed replace must not leave the row behind");

        store.insert(c.clone()).unwrap();
        let mut amended = c.clone();
        amended.contract_status = ContractStatus::Active;
        let previous = store.replace(amended).unwrap();
        assert_eq!(previous.contract_status, ContractStatus::Draft);
        assert_eq!(
            store.try_get(c.id()).unwrap().contract_status,
            ContractStatus::Active
        );
    }

    #[test]
    fn remove_returns_the_row() {
        let mut store = Store::new();
        let c = Contract::new(ContractStatus::Draft);
        let id = c.id();

        store.insert(c).unwrap();
        let removed = store.remove(id).unwrap();
        assert_eq!(removed.contract_id, id);
        assert!(store.is_empty());
        assert!(matches!(
            store.remove(id),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn iteration_follows_creation_order() {
        let mut store = Store::new();
        let a = Contract::new(ContractStatus::Draft);
        let b = Contract::new(ContractStatus::Draft);
        let c = Contract::new(ContractStatus::Draft);
        let expected = vec![a.id(), b.id(), c.id()];

        // insert out of order; key order wins
        store.insert(c).unwrap();
        store.insert(a).unwrap();
        store.insert(b).unwrap();

        let seen: Vec<_> = store.iter().map(EntityKind::id).collect();
        assert_eq!(seen, expected);
    }
}
