use crate::{
    model::{Audit, Contract, EntityKind, FieldValues},
    types::{Date, Id, Ulid},
    value::Value,
};
use serde::{Deserialize, Serialize};

///
/// ContractDocument
/// Link row between a contract and a document held by the document store.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ContractDocument {
    pub contract_document_id: Id<ContractDocument>,
    pub contract_id: Id<Contract>,
    pub document_type_id: Ulid,
    pub document_id: Ulid,
    pub date_added: Option<Date>,

    #[serde(flatten)]
    pub audit: Audit,
}

impl ContractDocument {
    #[must_use]
    pub fn new(contract_id: Id<Contract>, document_type_id: Ulid, document_id: Ulid) -> Self {
        Self {
            contract_document_id: Id::generate(),
            contract_id,
            document_type_id,
            document_id,
            date_added: None,
            audit: Audit::default(),
        }
    }
}

impl EntityKind for ContractDocument {
    const PATH: &'static str = "contract_document";

    fn id(&self) -> Id<Self> {
        self.contract_document_id
    }

    fn audit(&self) -> Audit {
        self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }
}

impl FieldValues for ContractDocument {
    fn field(&self, field: &str) -> Option<Value> {
        let value = match field {
            "contract_document_id" => Value::Id(self.contract_document_id.key()),
            "contract_id" => Value::Id(self.contract_id.key()),
            "document_type_id" => Value::Id(self.document_type_id),
            "document_id" => Value::Id(self.document_id),
            "date_added" => self.date_added.into(),
            "created_at" => Value::Timestamp(self.audit.created_at),
            "updated_at" => Value::Timestamp(self.audit.updated_at),
            _ => return None,
        };

        Some(value)
    }
}
