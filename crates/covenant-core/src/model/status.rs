use crate::{
    model::{Audit, Contract, ContractStatus, EntityKind, FieldValues},
    types::{Date, Id},
    value::Value,
};
use serde::{Deserialize, Serialize};

///
/// ContractStatusHistory
/// Append-only record of a status transition. `previous_status` is absent
/// on the first transition of a contract.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ContractStatusHistory {
    pub contract_status_history_id: Id<ContractStatusHistory>,
    pub contract_id: Id<Contract>,
    pub previous_status: Option<ContractStatus>,
    pub new_status: ContractStatus,
    pub status_date: Option<Date>,
    pub change_reason: Option<String>,
    pub changed_by: Option<String>,

    #[serde(flatten)]
    pub audit: Audit,
}

impl ContractStatusHistory {
    #[must_use]
    pub fn new(contract_id: Id<Contract>, new_status: ContractStatus) -> Self {
        Self {
            contract_status_history_id: Id::generate(),
            contract_id,
            previous_status: None,
            new_status,
            status_date: None,
            change_reason: None,
            changed_by: None,
            audit: Audit::default(),
        }
    }
}

impl EntityKind for ContractStatusHistory {
    const PATH: &'static str = "contract_status_history";

    fn id(&self) -> Id<Self> {
        self.contract_status_history_id
    }

    fn audit(&self) -> Audit {
        self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }
}

impl FieldValues for ContractStatusHistory {
    fn field(&self, field: &str) -> Option<Value> {
        let value = match field {
            "contract_status_history_id" => Value::Id(self.contract_status_history_id.key()),
            "contract_id" => Value::Id(self.contract_id.key()),
            "previous_status" => self
                .previous_status
                .map(|s| s.to_string())
                .into(),
            "new_status" => Value::Text(self.new_status.to_string()),
            "status_date" => self.status_date.into(),
            "change_reason" => self.change_reason.clone().into(),
            "changed_by" => self.changed_by.clone().into(),
            "created_at" => Value::Timestamp(self.audit.created_at),
            "updated_at" => Value::Timestamp(self.audit.updated_at),
            _ => return None,
        };

        Some(value)
    }
}
