mod criteria;
mod evaluate;

pub use criteria::{CriteriaError, RuleCriteria};
pub use evaluate::{EvalError, RuleOutcome, evaluate};

use crate::{
    model::{TermTemplate, ValidationRule, ValidationType},
    types::Id,
    value::{DataType, Value},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error as ThisError;

///
/// ValidateError
///
/// Aborts a whole validation call. Everything here means the template
/// setup is broken; the candidate value never even gets judged.
///

#[derive(Debug, ThisError)]
pub enum ValidateError {
    #[error(transparent)]
    Config(#[from] EvalError),

    #[error("candidate value of type {found} does not match template data type {expected}")]
    ValueTypeMismatch {
        expected: DataType,
        found: &'static str,
    },

    #[error("rule {rule_id} belongs to a different template")]
    ForeignRule { rule_id: Id<ValidationRule> },
}

impl From<CriteriaError> for ValidateError {
    fn from(err: CriteriaError) -> Self {
        Self::Config(EvalError::Criteria(err))
    }
}

///
/// RuleFailure
/// One rejected rule: which rule, what kind, and the message to show.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RuleFailure {
    pub rule_id: Id<ValidationRule>,
    pub rule_type: ValidationType,
    pub message: String,
}

///
/// Verdict
///
/// The aggregated result of judging a candidate against every rule of a
/// template. Transient: produced per call, never persisted.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Verdict {
    failures: Vec<RuleFailure>,
}

impl Verdict {
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            failures: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    #[must_use]
    pub fn failures(&self) -> &[RuleFailure] {
        &self.failures
    }

    #[must_use]
    pub fn into_failures(self) -> Vec<RuleFailure> {
        self.failures
    }

    fn push(&mut self, failure: RuleFailure) {
        self.failures.push(failure);
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return f.write_str("valid");
        }

        write!(f, "{} rule(s) failed: ", self.failures.len())?;
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", failure.rule_type, failure.message)?;
        }

        Ok(())
    }
}

/// Judge a candidate value against every rule of a template.
///
/// Rules run in creation order and are never short-circuited, so one call
/// reports the complete failure list. Configuration errors abort with
/// `ValidateError` instead of surfacing as failures.
pub fn validate_value(
    template: &TermTemplate,
    rules: &[ValidationRule],
    candidate: &Value,
) -> Result<Verdict, ValidateError> {
    if !candidate.matches(template.data_type) {
        return Err(ValidateError::ValueTypeMismatch {
            expected: template.data_type,
            found: candidate.type_name(),
        });
    }

    let mut ordered: Vec<&ValidationRule> = rules.iter().collect();
    ordered.sort_by_key(|rule| rule.validation_rule_id);

    let mut verdict = Verdict::valid();
    for rule in ordered {
        if rule.term_template_id != template.term_template_id {
            return Err(ValidateError::ForeignRule {
                rule_id: rule.validation_rule_id,
            });
        }

        let criteria = RuleCriteria::decode(rule.validation_type, &rule.criteria)?;

        match evaluate(&criteria, candidate, template.data_type)? {
            RuleOutcome::Pass => {}
            RuleOutcome::Fail { message } => verdict.push(RuleFailure {
                rule_id: rule.validation_rule_id,
                rule_type: rule.validation_type,
                message: rule.error_message.clone().unwrap_or(message),
            }),
        }
    }

    Ok(verdict)
}

///
/// TESTS
///
