use crate::{
    model::{Audit, EntityKind, FieldValues},
    types::Id,
    value::{DataType, Value},
};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// TermCategory
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TermCategory {
    Compliance,
    Financial,
    Legal,
    Operational,
    Other,
}

impl TermCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compliance => "COMPLIANCE",
            Self::Financial => "FINANCIAL",
            Self::Legal => "LEGAL",
            Self::Operational => "OPERATIONAL",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for TermCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// TermTemplate
///
/// Reusable definition of a contract term: the declared value slot, the
/// category tag, and the flags the lifecycle manager consults. `code` is
/// unique and immutable after creation; deactivating a template soft-
/// retires it without touching terms that already reference it.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TermTemplate {
    pub term_template_id: Id<TermTemplate>,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub category: TermCategory,
    pub data_type: DataType,
    pub is_required: bool,
    pub is_active: bool,
    pub default_value: Option<String>,
    pub metadata: Option<serde_json::Value>,

    #[serde(flatten)]
    pub audit: Audit,
}

impl TermTemplate {
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        category: TermCategory,
        data_type: DataType,
    ) -> Self {
        Self {
            term_template_id: Id::generate(),
            code: code.into(),
            name: name.into(),
            description: None,
            category,
            data_type,
            is_required: false,
            is_active: true,
            default_value: None,
            metadata: None,
            audit: Audit::default(),
        }
    }
}

impl EntityKind for TermTemplate {
    const PATH: &'static str = "contract_term_template";

    fn id(&self) -> Id<Self> {
        self.term_template_id
    }

    fn audit(&self) -> Audit {
        self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }
}

impl FieldValues for TermTemplate {
    fn field(&self, field: &str) -> Option<Value> {
        let value = match field {
            "term_template_id" => Value::Id(self.term_template_id.key()),
            "code" => Value::Text(self.code.clone()),
            "name" => Value::Text(self.name.clone()),
            "description" => self.description.clone().into(),
            "category" => Value::Text(self.category.to_string()),
            "data_type" => Value::Text(self.data_type.to_string()),
            "is_required" => Value::Bool(self.is_required),
            "is_active" => Value::Bool(self.is_active),
            "default_value" => self.default_value.clone().into(),
            "metadata" => self.metadata.clone().map_or(Value::Null, Value::Json),
            "created_at" => Value::Timestamp(self.audit.created_at),
            "updated_at" => Value::Timestamp(self.audit.updated_at),
            _ => return None,
        };

        Some(value)
    }
}
