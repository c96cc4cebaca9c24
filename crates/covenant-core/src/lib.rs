//! Core runtime for Covenant: typed values, the contract entity model, the
//! term validation engine, and the stores the resource services run on.

pub mod db;
pub mod lifecycle;
pub mod model;
pub mod service;
pub mod types;
pub mod validate;
pub mod value;

///
/// Prelude
///
/// Domain vocabulary only. Errors, stores, and service internals are
/// reached through their modules.
///

pub mod prelude {
    pub use crate::{
        model::{
            Contract, ContractDocument, ContractEvent, ContractParty, ContractRiskAssessment,
            ContractStatus, ContractStatusHistory, DynamicTerm, EntityKind, EventType, RiskLevel,
            TermCategory, TermTemplate, ValidationRule, ValidationType,
        },
        types::{Date, Decimal, Id, Timestamp, Ulid},
        value::{DataType, Value},
    };
}
