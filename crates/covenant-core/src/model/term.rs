use crate::{
    model::{Audit, Contract, EntityKind, FieldValues, TermTemplate},
    types::{Date, Id},
    value::Value,
};
use serde::{Deserialize, Serialize};

///
/// DynamicTerm
///
/// A concrete, dated value of a term template attached to one contract.
/// Rows are superseded, never mutated in place: the model keeps multiple
/// historical rows per (contract, template) pair and "latest by effective
/// date" is the current value.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DynamicTerm {
    pub term_id: Id<DynamicTerm>,
    pub contract_id: Id<Contract>,
    pub term_template_id: Id<TermTemplate>,
    pub value: Value,
    pub effective_date: Date,
    pub expiration_date: Option<Date>,
    pub is_active: bool,
    pub notes: Option<String>,

    #[serde(flatten)]
    pub audit: Audit,
}

impl DynamicTerm {
    /// Active with no expiration date: the row holding the open interval
    /// for its (contract, template) pair.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_active && self.expiration_date.is_none()
    }

    /// Currently effective as of the given day.
    #[must_use]
    pub fn is_effective(&self, as_of: Date) -> bool {
        self.is_active
            && self.effective_date <= as_of
            && self.expiration_date.is_none_or(|exp| exp >= as_of)
    }
}

impl EntityKind for DynamicTerm {
    const PATH: &'static str = "contract_term_dynamic";

    fn id(&self) -> Id<Self> {
        self.term_id
    }

    fn audit(&self) -> Audit {
        self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }
}

impl FieldValues for DynamicTerm {
    fn field(&self, field: &str) -> Option<Value> {
        let value = match field {
            "term_id" => Value::Id(self.term_id.key()),
            "contract_id" => Value::Id(self.contract_id.key()),
            "term_template_id" => Value::Id(self.term_template_id.key()),
            "value" => self.value.clone(),
            "effective_date" => Value::Date(self.effective_date),
            "expiration_date" => self.expiration_date.into(),
            "is_active" => Value::Bool(self.is_active),
            "notes" => self.notes.clone().into(),
            "created_at" => Value::Timestamp(self.audit.created_at),
            "updated_at" => Value::Timestamp(self.audit.updated_at),
            _ => return None,
        };

        Some(value)
    }
}

///
/// TESTS
///
