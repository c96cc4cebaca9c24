use crate::{
    model::{Audit, Contract, EntityKind, FieldValues},
    types::{Date, Id},
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// EventType
/// Matches the relational `event_type_enum`.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    ContractCreated,
    ContractSigned,
    ContractActivated,
    ContractAmended,
    ContractRenewed,
    ContractSuspended,
    ContractTerminated,
    ContractExpired,
    MilestoneReached,
    PaymentDue,
    PaymentReceived,
    BreachReported,
    DisputeRaised,
    AuditCompleted,
}

impl EventType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ContractCreated => "CONTRACT_CREATED",
            Self::ContractSigned => "CONTRACT_SIGNED",
            Self::ContractActivated => "CONTRACT_ACTIVATED",
            Self::ContractAmended => "CONTRACT_AMENDED",
            Self::ContractRenewed => "CONTRACT_RENEWED",
            Self::ContractSuspended => "CONTRACT_SUSPENDED",
            Self::ContractTerminated => "CONTRACT_TERMINATED",
            Self::ContractExpired => "CONTRACT_EXPIRED",
            Self::MilestoneReached => "MILESTONE_REACHED",
            Self::PaymentDue => "PAYMENT_DUE",
            Self::PaymentReceived => "PAYMENT_RECEIVED",
            Self::BreachReported => "BREACH_REPORTED",
            Self::DisputeRaised => "DISPUTE_RAISED",
            Self::AuditCompleted => "AUDIT_COMPLETED",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// ContractEvent
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ContractEvent {
    pub contract_event_id: Id<ContractEvent>,
    pub contract_id: Id<Contract>,
    pub event_type: EventType,
    pub event_date: Option<Date>,
    pub event_description: Option<String>,

    #[serde(flatten)]
    pub audit: Audit,
}

impl ContractEvent {
    #[must_use]
    pub fn new(contract_id: Id<Contract>, event_type: EventType) -> Self {
        Self {
            contract_event_id: Id::generate(),
            contract_id,
            event_type,
            event_date: None,
            event_description: None,
            audit: Audit::default(),
        }
    }
}

impl EntityKind for ContractEvent {
    const PATH: &'static str = "contract_event";

    fn id(&self) -> Id<Self> {
        self.contract_event_id
    }

    fn audit(&self) -> Audit {
        self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }
}

impl FieldValues for ContractEvent {
    fn field(&self, field: &str) -> Option<Value> {
        let value = match field {
            "contract_event_id" => Value::Id(self.contract_event_id.key()),
            "contract_id" => Value::Id(self.contract_id.key()),
            "event_type" => Value::Text(self.event_type.to_string()),
            "event_date" => self.event_date.into(),
            "event_description" => self.event_description.clone().into(),
            "created_at" => Value::Timestamp(self.audit.created_at),
            "updated_at" => Value::Timestamp(self.audit.updated_at),
            _ => return None,
        };

        Some(value)
    }
}
