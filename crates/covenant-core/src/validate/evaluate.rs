use crate::{
    model::ValidationType,
    validate::criteria::{CriteriaError, RuleCriteria, build_regex},
    value::{DataType, Value},
};
use thiserror::Error as ThisError;

///
/// EvalError
/// Configuration-class failures during evaluation: broken criteria or a
/// rule kind applied to a template type it cannot judge.
///

#[derive(Debug, ThisError)]
pub enum EvalError {
    #[error(transparent)]
    Criteria(#[from] CriteriaError),

    #[error("{rule_type} rules do not apply to {data_type} templates")]
    NotApplicable {
        rule_type: ValidationType,
        data_type: DataType,
    },
}

///
/// RuleOutcome
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RuleOutcome {
    Pass,
    Fail { message: String },
}

impl RuleOutcome {
    #[must_use]
    pub const fn passed(&self) -> bool {
        matches!(self, Self::Pass)
    }

    fn fail(message: impl Into<String>) -> Self {
        Self::Fail {
            message: message.into(),
        }
    }
}

/// Evaluate one decoded rule against a candidate value.
///
/// Pure: same inputs, same outcome. Non-REQUIRED rules pass vacuously on a
/// null candidate; rejecting absence is REQUIRED's job alone. The returned
/// failure message is the generated default; the orchestrator applies any
/// per-rule override.
pub fn evaluate(
    criteria: &RuleCriteria,
    candidate: &Value,
    data_type: DataType,
) -> Result<RuleOutcome, EvalError> {
    match criteria {
        RuleCriteria::Required { required } => {
            if !*required || !candidate.is_blank() {
                Ok(RuleOutcome::Pass)
            } else {
                Ok(RuleOutcome::fail("a value is required"))
            }
        }

        RuleCriteria::Regex {
            pattern,
            case_insensitive,
        } => {
            require_applicable(ValidationType::Regex, data_type, DataType::Text)?;

            let text = match text_candidate(candidate) {
                TextCandidate::Absent => return Ok(RuleOutcome::Pass),
                TextCandidate::WrongType => {
                    return Ok(RuleOutcome::fail("expected a text value"));
                }
                TextCandidate::Text(text) => text,
            };
            let regex = build_regex(pattern, *case_insensitive)?;

            if regex.is_match(text) {
                Ok(RuleOutcome::Pass)
            } else {
                Ok(RuleOutcome::fail(format!(
                    "value must match pattern {pattern}"
                )))
            }
        }

        RuleCriteria::Range { min, max } => {
            require_applicable(ValidationType::Range, data_type, DataType::Numeric)?;

            if candidate.is_null() {
                return Ok(RuleOutcome::Pass);
            }
            let Some(number) = candidate.as_decimal() else {
                return Ok(RuleOutcome::fail("expected a numeric value"));
            };

            if let Some(min) = min {
                if number < *min {
                    return Ok(RuleOutcome::fail(format!(
                        "{number} is lower than minimum of {min}"
                    )));
                }
            }
            if let Some(max) = max {
                if number > *max {
                    return Ok(RuleOutcome::fail(format!(
                        "{number} is greater than maximum of {max}"
                    )));
                }
            }

            Ok(RuleOutcome::Pass)
        }

        RuleCriteria::List { values } => {
            require_applicable(ValidationType::List, data_type, DataType::Text)?;

            let text = match text_candidate(candidate) {
                TextCandidate::Absent => return Ok(RuleOutcome::Pass),
                TextCandidate::WrongType => {
                    return Ok(RuleOutcome::fail("expected a text value"));
                }
                TextCandidate::Text(text) => text,
            };

            if values.iter().any(|v| v == text) {
                Ok(RuleOutcome::Pass)
            } else {
                Ok(RuleOutcome::fail(format!(
                    "{text:?} is not in the allowed values: {values:?}"
                )))
            }
        }

        RuleCriteria::Length {
            min_length,
            max_length,
        } => {
            require_applicable(ValidationType::Length, data_type, DataType::Text)?;

            let text = match text_candidate(candidate) {
                TextCandidate::Absent => return Ok(RuleOutcome::Pass),
                TextCandidate::WrongType => {
                    return Ok(RuleOutcome::fail("expected a text value"));
                }
                TextCandidate::Text(text) => text,
            };
            let len = text.chars().count();

            if let Some(min) = min_length {
                if len < *min as usize {
                    return Ok(RuleOutcome::fail(format!(
                        "length ({len}) is lower than minimum of {min}"
                    )));
                }
            }
            if let Some(max) = max_length {
                if len > *max as usize {
                    return Ok(RuleOutcome::fail(format!(
                        "length ({len}) is greater than maximum of {max}"
                    )));
                }
            }

            Ok(RuleOutcome::Pass)
        }
    }
}

fn require_applicable(
    rule_type: ValidationType,
    actual: DataType,
    expected: DataType,
) -> Result<(), EvalError> {
    if actual == expected {
        Ok(())
    } else {
        Err(EvalError::NotApplicable {
            rule_type,
            data_type: actual,
        })
    }
}

// How a text-only rule sees the candidate: null passes vacuously, text is
// judged, anything else fails with a type message. A populated non-text
// candidate cannot reach here through the orchestrator's type gate, but
// standalone callers get a sane answer.
enum TextCandidate<'a> {
    Absent,
    Text(&'a str),
    WrongType,
}

fn text_candidate(candidate: &Value) -> TextCandidate<'_> {
    if candidate.is_null() {
        TextCandidate::Absent
    } else {
        candidate
            .as_text()
            .map_or(TextCandidate::WrongType, TextCandidate::Text)
    }
}

///
/// TESTS
///


///
/// PROPTESTS
///
