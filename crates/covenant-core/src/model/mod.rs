mod contract;
mod document;
mod event;
mod party;
mod risk;
mod rule;
mod status;
mod template;
mod term;

pub use contract::{Contract, ContractStatus};
pub use document::ContractDocument;
pub use event::{ContractEvent, EventType};
pub use party::ContractParty;
pub use risk::{ContractRiskAssessment, RiskLevel};
pub use rule::{ValidationRule, ValidationType};
pub use status::ContractStatusHistory;
pub use template::{TermCategory, TermTemplate};
pub use term::DynamicTerm;

use crate::{
    types::{Id, Timestamp},
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

///
/// Audit
/// Server-controlled audit column pair. Stamped by the store layer, never
/// by callers.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Audit {
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Audit {
    pub const fn stamp_created(&mut self, now: Timestamp) {
        self.created_at = now;
        self.updated_at = now;
    }

    pub const fn stamp_updated(&mut self, now: Timestamp) {
        self.updated_at = now;
    }
}

///
/// EntityKind
///
/// Implemented by every persisted row type: a stable path (the table name
/// of the relational schema), a typed identity, and the audit pair.
///

pub trait EntityKind: Clone + Debug + Sized {
    const PATH: &'static str;

    fn id(&self) -> Id<Self>;

    fn audit(&self) -> Audit;

    fn audit_mut(&mut self) -> &mut Audit;
}

///
/// FieldValues
/// Field-name dispatch for the filter engine: `None` means the field does
/// not exist on this entity, `Some(Value::Null)` means it is unset.
///

pub trait FieldValues {
    fn field(&self, field: &str) -> Option<Value>;
}
