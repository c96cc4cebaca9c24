mod filter;
mod page;
mod query;
mod store;

pub use filter::{Cmp, FilterClause, FilterExpr, QueryError};
pub use page::{DEFAULT_PAGE_SIZE, Page, PageRequest, SortDir, SortExpr};
pub use query::Query;
pub use store::{Store, StoreError};

use crate::model::{
    Contract, ContractDocument, ContractEvent, ContractParty, ContractRiskAssessment,
    ContractStatusHistory, DynamicTerm, EntityKind, TermTemplate, ValidationRule,
};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

// Read/write accessor pair for one store field. A poisoned lock surfaces as
// `StoreError::Unavailable` instead of panicking in library code.
macro_rules! store_accessors {
    ($read:ident, $write:ident, $field:ident, $entity:ty) => {
        pub fn $read(&self) -> Result<RwLockReadGuard<'_, Store<$entity>>, StoreError> {
            self.$field.read().map_err(|_| StoreError::Unavailable {
                entity: <$entity>::PATH,
            })
        }

        pub fn $write(&self) -> Result<RwLockWriteGuard<'_, Store<$entity>>, StoreError> {
            self.$field.write().map_err(|_| StoreError::Unavailable {
                entity: <$entity>::PATH,
            })
        }
    };
}

///
/// Db
///
/// One store per resource, each behind its own lock. Callers that need
/// more than one store take locks in field-declaration order.
///

#[derive(Debug, Default)]
pub struct Db {
    contracts: RwLock<Store<Contract>>,
    parties: RwLock<Store<ContractParty>>,
    events: RwLock<Store<ContractEvent>>,
    documents: RwLock<Store<ContractDocument>>,
    risk_assessments: RwLock<Store<ContractRiskAssessment>>,
    status_history: RwLock<Store<ContractStatusHistory>>,
    templates: RwLock<Store<TermTemplate>>,
    rules: RwLock<Store<ValidationRule>>,
    terms: RwLock<Store<DynamicTerm>>,
}

impl Db {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    store_accessors!(contracts, contracts_mut, contracts, Contract);
    store_accessors!(parties, parties_mut, parties, ContractParty);
    store_accessors!(events, events_mut, events, ContractEvent);
    store_accessors!(documents, documents_mut, documents, ContractDocument);
    store_accessors!(
        risk_assessments,
        risk_assessments_mut,
        risk_assessments,
        ContractRiskAssessment
    );
    store_accessors!(
        status_history,
        status_history_mut,
        status_history,
        ContractStatusHistory
    );
    store_accessors!(templates, templates_mut, templates, TermTemplate);
    store_accessors!(rules, rules_mut, rules, ValidationRule);
    store_accessors!(terms, terms_mut, terms, DynamicTerm);
}
