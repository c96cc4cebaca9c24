use crate::{
    model::{Audit, Contract, DynamicTerm, TermTemplate, ValidationRule},
    types::{Date, Id, Timestamp},
    validate::{ValidateError, Verdict, validate_value},
    value::{DataType, Value},
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// LifecyclePolicy
///
/// Whether minting a new open-ended term automatically deactivates the
/// open term it supersedes. Off by default: superseding is the caller's
/// decision unless the deployment opts in.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct LifecyclePolicy {
    pub auto_supersede: bool,
}

impl LifecyclePolicy {
    #[must_use]
    pub const fn superseding() -> Self {
        Self {
            auto_supersede: true,
        }
    }
}

///
/// TermProposal
/// Everything a caller supplies to set a contract's term.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TermProposal {
    pub contract_id: Id<Contract>,
    pub term_template_id: Id<TermTemplate>,
    pub value: Value,
    pub effective_date: Date,
    pub expiration_date: Option<Date>,
    pub notes: Option<String>,

    /// Administrative override: permits terms on a retired template.
    #[serde(default)]
    pub admin_override: bool,
}

impl TermProposal {
    #[must_use]
    pub const fn new(
        contract_id: Id<Contract>,
        term_template_id: Id<TermTemplate>,
        value: Value,
        effective_date: Date,
    ) -> Self {
        Self {
            contract_id,
            term_template_id,
            value,
            effective_date,
            expiration_date: None,
            notes: None,
            admin_override: false,
        }
    }
}

///
/// RejectionReason
/// Lifecycle-level rejections. Always reported, never silently dropped,
/// never retried automatically.
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum RejectionReason {
    #[error("expiration date {expiration} is earlier than effective date {effective}")]
    DatesOutOfOrder { effective: Date, expiration: Date },

    #[error("template {template_id} is inactive")]
    InactiveTemplate { template_id: Id<TermTemplate> },

    #[error("{0}")]
    Invalid(Verdict),

    #[error("an open-ended term {existing} already exists for this contract and template")]
    OpenTermExists { existing: Id<DynamicTerm> },

    #[error("template requires a value but the candidate is blank")]
    RequiredValueMissing,

    #[error("candidate value of type {found} does not match template data type {expected}")]
    ValueTypeMismatch {
        expected: DataType,
        found: &'static str,
    },
}

///
/// ProposeError
///

#[derive(Debug, ThisError)]
pub enum ProposeError {
    #[error(transparent)]
    Rejected(#[from] RejectionReason),

    #[error(transparent)]
    Config(ValidateError),
}

/// Turn a proposal into a new `DynamicTerm` row, or say exactly why not.
///
/// Check order is load-bearing: date ordering is rejected before any rule
/// is looked at, and an inactive template is rejected before the candidate
/// is judged. A prior row is never mutated; superseding an open term is
/// handled by the term service according to `LifecyclePolicy`.
pub fn propose_term(
    template: &TermTemplate,
    rules: &[ValidationRule],
    proposal: TermProposal,
    now: Timestamp,
) -> Result<DynamicTerm, ProposeError> {
    if let Some(expiration) = proposal.expiration_date {
        if expiration < proposal.effective_date {
            return Err(RejectionReason::DatesOutOfOrder {
                effective: proposal.effective_date,
                expiration,
            }
            .into());
        }
    }

    if !template.is_active && !proposal.admin_override {
        return Err(RejectionReason::InactiveTemplate {
            template_id: template.term_template_id,
        }
        .into());
    }

    if !proposal.value.matches(template.data_type) {
        return Err(RejectionReason::ValueTypeMismatch {
            expected: template.data_type,
            found: proposal.value.type_name(),
        }
        .into());
    }

    if template.is_required && proposal.value.is_blank() {
        return Err(RejectionReason::RequiredValueMissing.into());
    }

    let verdict = match validate_value(template, rules, &proposal.value) {
        Ok(verdict) => verdict,
        Err(err) => return Err(ProposeError::Config(err)),
    };
    if !verdict.is_valid() {
        return Err(RejectionReason::Invalid(verdict).into());
    }

    let mut audit = Audit::default();
    audit.stamp_created(now);

    Ok(DynamicTerm {
        term_id: Id::generate(),
        contract_id: proposal.contract_id,
        term_template_id: proposal.term_template_id,
        value: proposal.value,
        effective_date: proposal.effective_date,
        expiration_date: proposal.expiration_date,
        is_active: true,
        notes: proposal.notes,
        audit,
    })
}

///
/// TESTS
///
