use covenant_core::{
    db::{QueryError, StoreError},
    lifecycle::{ProposeError, RejectionReason},
    service::{InputError, ServiceError},
    validate::{CriteriaError, RuleFailure, ValidateError},
};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy. `failures`
/// carries the structured rule failures when the kind is `Validation`.
///

#[derive(Debug, Deserialize, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<RuleFailure>,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
            failures: Vec::new(),
        }
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers and wire interfaces.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// Broken template setup: malformed or type-mismatched rule criteria.
    /// Not retryable without fixing the template.
    Config,

    /// Store conflicts: duplicate keys, a second open-ended term.
    Conflict,

    /// Wire-contract constraint violated (lengths, uniqueness, bounds).
    Input,

    /// The caller cannot remediate this.
    Internal,

    /// Target row does not exist.
    NotFound,

    /// Query shape is invalid (unknown fields).
    Query,

    /// Lifecycle rejection: date ordering, inactive template, required
    /// value missing.
    Rejected,

    /// One or more rules rejected the candidate value; see `failures`.
    Validation,
}

///
/// ErrorOrigin
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Criteria,
    Lifecycle,
    Query,
    Service,
    Store,
    Validate,
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        let kind = match &err {
            StoreError::CodeNotFound { .. } | StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::KeyExists { .. } => ErrorKind::Conflict,
            StoreError::Unavailable { .. } => ErrorKind::Internal,
        };

        Self::new(kind, ErrorOrigin::Store, err.to_string())
    }
}

impl From<QueryError> for Error {
    fn from(err: QueryError) -> Self {
        Self::new(ErrorKind::Query, ErrorOrigin::Query, err.to_string())
    }
}

impl From<CriteriaError> for Error {
    fn from(err: CriteriaError) -> Self {
        Self::new(ErrorKind::Config, ErrorOrigin::Criteria, err.to_string())
    }
}

impl From<ValidateError> for Error {
    fn from(err: ValidateError) -> Self {
        Self::new(ErrorKind::Config, ErrorOrigin::Validate, err.to_string())
    }
}

impl From<RejectionReason> for Error {
    fn from(reason: RejectionReason) -> Self {
        match reason {
            RejectionReason::Invalid(verdict) => {
                let mut err = Self::new(
                    ErrorKind::Validation,
                    ErrorOrigin::Validate,
                    verdict.to_string(),
                );
                err.failures = verdict.into_failures();
                err
            }
            RejectionReason::OpenTermExists { .. } => {
                Self::new(ErrorKind::Conflict, ErrorOrigin::Lifecycle, reason.to_string())
            }
            other => Self::new(ErrorKind::Rejected, ErrorOrigin::Lifecycle, other.to_string()),
        }
    }
}

impl From<ProposeError> for Error {
    fn from(err: ProposeError) -> Self {
        match err {
            ProposeError::Rejected(reason) => reason.into(),
            ProposeError::Config(err) => err.into(),
        }
    }
}

impl From<InputError> for Error {
    fn from(err: InputError) -> Self {
        Self::new(ErrorKind::Input, ErrorOrigin::Service, err.to_string())
    }
}

impl From<ServiceError> for Error {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Criteria(err) => err.into(),
            ServiceError::Input(err) => err.into(),
            ServiceError::Propose(err) => err.into(),
            ServiceError::Query(err) => err.into(),
            ServiceError::Store(err) => err.into(),
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use covenant_core::{
        model::{TermCategory, TermTemplate, ValidationRule, ValidationType},
        validate::validate_value,
        value::{DataType, Value},
    };
    use serde_json::json;

    #[test]
    fn validation_rejections_keep_structured_failures() {
        let template = TermTemplate::new(
            "PAYMENT_TERMS",
            "Payment Terms",
            TermCategory::Financial,
            DataType::Text,
        );
        let rule = ValidationRule::new(
            template.term_template_id,
            ValidationType::Regex,
            json!({"pattern": "^[A-Z]+$"}),
        );

        let verdict = validate_value(&template, &[rule], &Value::Text("abc".into())).unwrap();
        let err: Error = RejectionReason::Invalid(verdict).into();

        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.failures.len(), 1);
        assert_eq!(err.failures[0].rule_type, ValidationType::Regex);
    }

    #[test]
    fn store_not_found_maps_to_not_found() {
        let err: Error = StoreError::NotFound {
            entity: "contract",
            key: covenant_core::types::Ulid::nil(),
        }
        .into();

        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.origin, ErrorOrigin::Store);
    }

    #[test]
    fn config_errors_are_distinguishable_from_validation() {
        let err: Error = CriteriaError::InvertedBounds {
            rule_type: ValidationType::Range,
        }
        .into();

        assert_eq!(err.kind, ErrorKind::Config);
        assert!(err.failures.is_empty());
    }
}
