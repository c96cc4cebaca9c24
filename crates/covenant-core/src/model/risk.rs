use crate::{
    model::{Audit, Contract, EntityKind, FieldValues},
    types::{Date, Decimal, Id},
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// RiskLevel
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Critical,
    High,
    Low,
    Medium,
}

impl RiskLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// ContractRiskAssessment
/// Risk score is a 0–100 decimal; the bound is enforced by the service.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ContractRiskAssessment {
    pub contract_risk_assessment_id: Id<ContractRiskAssessment>,
    pub contract_id: Id<Contract>,
    pub risk_score: Option<Decimal>,
    pub risk_level: RiskLevel,
    pub assessment_date: Option<Date>,
    pub assessor: Option<String>,
    pub notes: Option<String>,

    #[serde(flatten)]
    pub audit: Audit,
}

impl ContractRiskAssessment {
    #[must_use]
    pub fn new(contract_id: Id<Contract>, risk_level: RiskLevel) -> Self {
        Self {
            contract_risk_assessment_id: Id::generate(),
            contract_id,
            risk_score: None,
            risk_level,
            assessment_date: None,
            assessor: None,
            notes: None,
            audit: Audit::default(),
        }
    }
}

impl EntityKind for ContractRiskAssessment {
    const PATH: &'static str = "contract_risk_assessment";

    fn id(&self) -> Id<Self> {
        self.contract_risk_assessment_id
    }

    fn audit(&self) -> Audit {
        self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }
}

impl FieldValues for ContractRiskAssessment {
    fn field(&self, field: &str) -> Option<Value> {
        let value = match field {
            "contract_risk_assessment_id" => Value::Id(self.contract_risk_assessment_id.key()),
            "contract_id" => Value::Id(self.contract_id.key()),
            "risk_score" => self.risk_score.into(),
            "risk_level" => Value::Text(self.risk_level.to_string()),
            "assessment_date" => self.assessment_date.into(),
            "assessor" => self.assessor.clone().into(),
            "notes" => self.notes.clone().into(),
            "created_at" => Value::Timestamp(self.audit.created_at),
            "updated_at" => Value::Timestamp(self.audit.updated_at),
            _ => return None,
        };

        Some(value)
    }
}
