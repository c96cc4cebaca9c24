use crate::{model::ValidationType, types::Decimal};
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use thiserror::Error as ThisError;

///
/// CriteriaError
///
/// Raised while decoding a rule's stored criteria. Always a template-setup
/// problem: surfaced to administrators, never folded into a candidate's
/// validation failures.
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum CriteriaError {
    #[error("criteria for {rule_type} must list at least one allowed value")]
    EmptyList { rule_type: ValidationType },

    #[error("invalid regex pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("criteria for {rule_type} has invalid shape: {reason}")]
    InvalidShape {
        rule_type: ValidationType,
        reason: String,
    },

    #[error("criteria for {rule_type} requires min <= max")]
    InvertedBounds { rule_type: ValidationType },

    #[error("unsupported regex flag {flag:?}")]
    UnsupportedFlag { flag: char },
}

///
/// RuleCriteria
///
/// The decoded, shape-checked form of a rule's criteria: one variant per
/// validation type. Decoding is the only way in, so a value of this type
/// is always internally consistent.
///

#[derive(Clone, Debug, PartialEq)]
pub enum RuleCriteria {
    Length {
        min_length: Option<u32>,
        max_length: Option<u32>,
    },
    List {
        values: Vec<String>,
    },
    Range {
        min: Option<Decimal>,
        max: Option<Decimal>,
    },
    Regex {
        pattern: String,
        case_insensitive: bool,
    },
    Required {
        required: bool,
    },
}

// Stored JSON shapes, camelCase on the wire. Unknown keys are a
// configuration error, not noise to ignore.

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RequiredShape {
    required: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RegexShape {
    pattern: String,
    #[serde(default)]
    flags: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RangeShape {
    #[serde(default)]
    min: Option<Decimal>,
    #[serde(default)]
    max: Option<Decimal>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ListShape {
    values: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct LengthShape {
    #[serde(default)]
    min_length: Option<u32>,
    #[serde(default)]
    max_length: Option<u32>,
}

impl RuleCriteria {
    /// Decode and shape-check stored criteria for the declared rule type.
    pub fn decode(
        rule_type: ValidationType,
        raw: &serde_json::Value,
    ) -> Result<Self, CriteriaError> {
        match rule_type {
            ValidationType::Required => {
                let shape: RequiredShape = decode_shape(rule_type, raw)?;

                Ok(Self::Required {
                    required: shape.required,
                })
            }

            ValidationType::Regex => {
                let shape: RegexShape = decode_shape(rule_type, raw)?;
                let case_insensitive = parse_flags(shape.flags.as_deref())?;

                // trial-compile so a broken pattern fails here, not mid-evaluation
                build_regex(&shape.pattern, case_insensitive)?;

                Ok(Self::Regex {
                    pattern: shape.pattern,
                    case_insensitive,
                })
            }

            ValidationType::Range => {
                let shape: RangeShape = decode_shape(rule_type, raw)?;

                if let (Some(min), Some(max)) = (shape.min, shape.max) {
                    if min > max {
                        return Err(CriteriaError::InvertedBounds { rule_type });
                    }
                }

                Ok(Self::Range {
                    min: shape.min,
                    max: shape.max,
                })
            }

            ValidationType::List => {
                let shape: ListShape = decode_shape(rule_type, raw)?;

                if shape.values.is_empty() {
                    return Err(CriteriaError::EmptyList { rule_type });
                }

                Ok(Self::List {
                    values: shape.values,
                })
            }

            ValidationType::Length => {
                let shape: LengthShape = decode_shape(rule_type, raw)?;

                if let (Some(min), Some(max)) = (shape.min_length, shape.max_length) {
                    if min > max {
                        return Err(CriteriaError::InvertedBounds { rule_type });
                    }
                }

                Ok(Self::Length {
                    min_length: shape.min_length,
                    max_length: shape.max_length,
                })
            }
        }
    }

    #[must_use]
    pub const fn rule_type(&self) -> ValidationType {
        match self {
            Self::Length { .. } => ValidationType::Length,
            Self::List { .. } => ValidationType::List,
            Self::Range { .. } => ValidationType::Range,
            Self::Regex { .. } => ValidationType::Regex,
            Self::Required { .. } => ValidationType::Required,
        }
    }
}

fn decode_shape<'de, T: Deserialize<'de>>(
    rule_type: ValidationType,
    raw: &serde_json::Value,
) -> Result<T, CriteriaError> {
    T::deserialize(raw.clone()).map_err(|err| CriteriaError::InvalidShape {
        rule_type,
        reason: err.to_string(),
    })
}

/// Only `i` (case-insensitive) is recognized; anything else is a
/// configuration error.
fn parse_flags(flags: Option<&str>) -> Result<bool, CriteriaError> {
    let mut case_insensitive = false;

    for flag in flags.unwrap_or_default().chars() {
        match flag {
            'i' => case_insensitive = true,
            other => return Err(CriteriaError::UnsupportedFlag { flag: other }),
        }
    }

    Ok(case_insensitive)
}

pub(crate) fn build_regex(pattern: &str, case_insensitive: bool) -> Result<Regex, CriteriaError> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|err| CriteriaError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        })
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn decodes_every_documented_shape() {
        let cases = [
            (ValidationType::Required, json!({"required": true})),
            (
                ValidationType::Regex,
                json!({"pattern": "^[A-Z]{2,10}$", "flags": "i"}),
            ),
            (ValidationType::Range, json!({"min": 0, "max": 100})),
            (
                ValidationType::List,
                json!({"values": ["OPTION1", "OPTION2", "OPTION3"]}),
            ),
            (
                ValidationType::Length,
                json!({"minLength": 5, "maxLength": 50}),
            ),
        ];

        for (rule_type, raw) in cases {
            let criteria = RuleCriteria::decode(rule_type, &raw).unwrap();
            assert_eq!(criteria.rule_type(), rule_type);
        }
    }

    #[test]
    fn shape_mismatch_is_a_config_error() {
        // RANGE payload under a REGEX rule type
        let err = RuleCriteria::decode(ValidationType::Regex, &json!({"min": 0, "max": 100}))
            .unwrap_err();
        assert!(matches!(err, CriteriaError::InvalidShape { .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = RuleCriteria::decode(
            ValidationType::Required,
            &json!({"required": true, "bogus": 1}),
        )
        .unwrap_err();
        assert!(matches!(err, CriteriaError::InvalidShape { .. }));
    }

    #[test]
    fn optional_range_bounds() {
        let criteria = RuleCriteria::decode(ValidationType::Range, &json!({"min": 5})).unwrap();
        assert_eq!(
            criteria,
            RuleCriteria::Range {
                min: Some(Decimal::from_str("5").unwrap()),
                max: None,
            }
        );
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let err =
            RuleCriteria::decode(ValidationType::Range, &json!({"min": 10, "max": 5})).unwrap_err();
        assert!(matches!(err, CriteriaError::InvertedBounds { .. }));

        let err = RuleCriteria::decode(
            ValidationType::Length,
            &json!({"minLength": 9, "maxLength": 3}),
        )
        .unwrap_err();
        assert!(matches!(err, CriteriaError::InvertedBounds { .. }));
    }

    #[test]
    fn empty_list_is_rejected() {
        let err = RuleCriteria::decode(ValidationType::List, &json!({"values": []})).unwrap_err();
        assert!(matches!(err, CriteriaError::EmptyList { .. }));
    }

    #[test]
    fn broken_pattern_fails_at_decode_time() {
        let err =
            RuleCriteria::decode(ValidationType::Regex, &json!({"pattern": "(["})).unwrap_err();
        assert!(matches!(err, CriteriaError::InvalidPattern { .. }));
    }

    #[test]
    fn unknown_flags_are_rejected() {
        let err = RuleCriteria::decode(
            ValidationType::Regex,
            &json!({"pattern": "a", "flags": "ix"}),
        )
        .unwrap_err();
        assert!(matches!(err, CriteriaError::UnsupportedFlag { flag: 'x' }));
    }
}
