//! Covenant: typed contract-term storage and a rule-driven validation
//! engine for contract management services.
//!
//! ## Crate layout
//! - `core::types`: typed identities, dates, timestamps, decimals.
//! - `core::value`: the tagged runtime value and declared data types.
//! - `core::model`: the contract entity model.
//! - `core::validate`: criteria decoding, rule evaluation, verdicts.
//! - `core::lifecycle`: the term proposal flow and its policies.
//! - `core::db`: stores, filter expressions, sorting, pagination.
//! - `core::service`: per-resource operations a wire layer mounts.
//!
//! The `prelude` mirrors the surface a hosting service uses.

pub use covenant_core as core;

mod error;

pub use error::{Error, ErrorKind, ErrorOrigin};

/// Workspace version re-export for downstream tooling.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Error, ErrorKind, ErrorOrigin,
        core::{
            db::{Cmp, Db, FilterExpr, Page, PageRequest, Query, SortDir, SortExpr},
            lifecycle::{LifecyclePolicy, TermProposal},
            model::{
                Contract, ContractDocument, ContractEvent, ContractParty,
                ContractRiskAssessment, ContractStatus, ContractStatusHistory, DynamicTerm,
                EntityKind, EventType, RiskLevel, TermCategory, TermTemplate, ValidationRule,
                ValidationType,
            },
            service,
            types::{Date, Decimal, Id, Timestamp, Ulid},
            validate::{RuleCriteria, RuleFailure, Verdict, validate_value},
            value::{DataType, Value},
        },
    };
}
