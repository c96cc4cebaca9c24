use crate::{
    model::{Audit, EntityKind, FieldValues, TermTemplate},
    types::Id,
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// ValidationType
/// The closed set of rule kinds. Unknown tags arriving over the wire fail
/// deserialization instead of being silently skipped.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationType {
    Length,
    List,
    Range,
    Regex,
    Required,
}

impl ValidationType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Length => "LENGTH",
            Self::List => "LIST",
            Self::Range => "RANGE",
            Self::Regex => "REGEX",
            Self::Required => "REQUIRED",
        }
    }
}

impl fmt::Display for ValidationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// ValidationRule
///
/// One constraint attached to a term template. `criteria` carries the
/// stored JSON payload; its shape is checked against `validation_type` by
/// the criteria decoder before any evaluation happens.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ValidationRule {
    pub validation_rule_id: Id<ValidationRule>,
    pub term_template_id: Id<TermTemplate>,
    pub validation_type: ValidationType,
    pub criteria: serde_json::Value,
    pub error_message: Option<String>,

    #[serde(flatten)]
    pub audit: Audit,
}

impl ValidationRule {
    #[must_use]
    pub fn new(
        term_template_id: Id<TermTemplate>,
        validation_type: ValidationType,
        criteria: serde_json::Value,
    ) -> Self {
        Self {
            validation_rule_id: Id::generate(),
            term_template_id,
            validation_type,
            criteria,
            error_message: None,
            audit: Audit::default(),
        }
    }
}

impl EntityKind for ValidationRule {
    const PATH: &'static str = "contract_term_validation_rule";

    fn id(&self) -> Id<Self> {
        self.validation_rule_id
    }

    fn audit(&self) -> Audit {
        self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }
}

impl FieldValues for ValidationRule {
    fn field(&self, field: &str) -> Option<Value> {
        let value = match field {
            "validation_rule_id" => Value::Id(self.validation_rule_id.key()),
            "term_template_id" => Value::Id(self.term_template_id.key()),
            "validation_type" => Value::Text(self.validation_type.to_string()),
            "criteria" => Value::Json(self.criteria.clone()),
            "error_message" => self.error_message.clone().into(),
            "created_at" => Value::Timestamp(self.audit.created_at),
            "updated_at" => Value::Timestamp(self.audit.updated_at),
            _ => return None,
        };

        Some(value)
    }
}
