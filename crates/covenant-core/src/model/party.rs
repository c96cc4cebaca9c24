use crate::{
    model::{Audit, Contract, EntityKind, FieldValues},
    types::{Date, Id, Ulid},
    value::Value,
};
use serde::{Deserialize, Serialize};

///
/// ContractParty
/// Membership of an external party in a contract, with a role reference
/// resolved by the party service that owns it.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ContractParty {
    pub contract_party_id: Id<ContractParty>,
    pub contract_id: Id<Contract>,
    pub party_id: Ulid,
    pub role_in_contract_id: Ulid,
    pub date_joined: Option<Date>,
    pub date_left: Option<Date>,
    pub is_active: bool,

    #[serde(flatten)]
    pub audit: Audit,
}

impl ContractParty {
    #[must_use]
    pub fn new(contract_id: Id<Contract>, party_id: Ulid, role_in_contract_id: Ulid) -> Self {
        Self {
            contract_party_id: Id::generate(),
            contract_id,
            party_id,
            role_in_contract_id,
            date_joined: None,
            date_left: None,
            is_active: true,
            audit: Audit::default(),
        }
    }
}

impl EntityKind for ContractParty {
    const PATH: &'static str = "contract_party";

    fn id(&self) -> Id<Self> {
        self.contract_party_id
    }

    fn audit(&self) -> Audit {
        self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }
}

impl FieldValues for ContractParty {
    fn field(&self, field: &str) -> Option<Value> {
        let value = match field {
            "contract_party_id" => Value::Id(self.contract_party_id.key()),
            "contract_id" => Value::Id(self.contract_id.key()),
            "party_id" => Value::Id(self.party_id),
            "role_in_contract_id" => Value::Id(self.role_in_contract_id),
            "date_joined" => self.date_joined.into(),
            "date_left" => self.date_left.into(),
            "is_active" => Value::Bool(self.is_active),
            "created_at" => Value::Timestamp(self.audit.created_at),
            "updated_at" => Value::Timestamp(self.audit.updated_at),
            _ => return None,
        };

        Some(value)
    }
}
