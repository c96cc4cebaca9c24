use crate::{
    model::{Audit, EntityKind, FieldValues},
    types::{Date, Id, Ulid},
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// ContractStatus
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractStatus {
    Active,
    Draft,
    Expired,
    PendingSignature,
    Suspended,
    Terminated,
}

impl ContractStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Draft => "DRAFT",
            Self::Expired => "EXPIRED",
            Self::PendingSignature => "PENDING_SIGNATURE",
            Self::Suspended => "SUSPENDED",
            Self::Terminated => "TERMINATED",
        }
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// Contract
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Contract {
    pub contract_id: Id<Contract>,
    pub contract_number: Option<String>,
    pub contract_status: ContractStatus,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub product_catalog_id: Option<Ulid>,
    pub product_id: Option<Ulid>,

    #[serde(flatten)]
    pub audit: Audit,
}

impl Contract {
    #[must_use]
    pub fn new(status: ContractStatus) -> Self {
        Self {
            contract_id: Id::generate(),
            contract_number: None,
            contract_status: status,
            start_date: None,
            end_date: None,
            product_catalog_id: None,
            product_id: None,
            audit: Audit::default(),
        }
    }
}

impl EntityKind for Contract {
    const PATH: &'static str = "contract";

    fn id(&self) -> Id<Self> {
        self.contract_id
    }

    fn audit(&self) -> Audit {
        self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }
}

impl FieldValues for Contract {
    fn field(&self, field: &str) -> Option<Value> {
        let value = match field {
            "contract_id" => Value::Id(self.contract_id.key()),
            "contract_number" => self.contract_number.clone().into(),
            "contract_status" => Value::Text(self.contract_status.to_string()),
            "start_date" => self.start_date.into(),
            "end_date" => self.end_date.into(),
            "product_catalog_id" => self.product_catalog_id.into(),
            "product_id" => self.product_id.into(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_in_wire_casing() {
        let json = serde_json::to_string(&ContractStatus::PendingSignature).unwrap();
        assert_eq!(json, "\"PENDING_SIGNATURE\"");
        assert_eq!(ContractStatus::PendingSignature.to_string(), json.trim_matches('"'));
    }

    #[test]
    fn unknown_field_is_none() {
        let c = Contract::new(ContractStatus::Draft);
        assert!(c.field("no_such_column").is_none());
        assert_eq!(c.field("start_date"), Some(Value::Null));
        assert_eq!(
            c.field("contract_status"),
            Some(Value::Text("DRAFT".into()))
        );
    }
}
