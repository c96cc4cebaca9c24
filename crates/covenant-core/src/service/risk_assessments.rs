use crate::{
    db::{Db, Page, Query},
    model::ContractRiskAssessment,
    service::{self, InputError, ServiceError},
    types::{Decimal, Id, Timestamp},
};
use log::debug;

const MAX_ASSESSOR: usize = 255;

pub fn filter(db: &Db, query: &Query) -> Result<Page<ContractRiskAssessment>, ServiceError> {
    Ok(query.run(&*db.risk_assessments()?)?)
}

pub fn create(
    db: &Db,
    assessment: ContractRiskAssessment,
) -> Result<ContractRiskAssessment, ServiceError> {
    validate(&assessment)?;

    let mut store = db.risk_assessments_mut()?;
    let created = service::insert_new(&mut store, assessment, Timestamp::now())?;
    debug!(
        "created {} risk assessment {}",
        created.risk_level, created.contract_risk_assessment_id
    );

    Ok(created)
}

pub fn get(db: &Db, id: Id<ContractRiskAssessment>) -> Result<ContractRiskAssessment, ServiceError> {
    Ok(db.risk_assessments()?.try_get(id)?.clone())
}

pub fn update(
    db: &Db,
    id: Id<ContractRiskAssessment>,
    mut assessment: ContractRiskAssessment,
) -> Result<ContractRiskAssessment, ServiceError> {
    validate(&assessment)?;
    assessment.contract_risk_assessment_id = id;

    let mut store = db.risk_assessments_mut()?;
    let updated = service::replace_existing(&mut store, id, assessment, Timestamp::now())?;
    debug!("updated risk assessment {id}");

    Ok(updated)
}

pub fn delete(db: &Db, id: Id<ContractRiskAssessment>) -> Result<(), ServiceError> {
    db.risk_assessments_mut()?.remove(id)?;
    debug!("deleted risk assessment {id}");

    Ok(())
}

fn validate(assessment: &ContractRiskAssessment) -> Result<(), ServiceError> {
    if let Some(score) = assessment.risk_score {
        if score < Decimal::ZERO || score > Decimal::ONE_HUNDRED {
            return Err(InputError::ScoreOutOfRange { score }.into());
        }
    }
    service::check_len("assessor", assessment.assessor.as_deref(), MAX_ASSESSOR)?;

    Ok(())
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RiskLevel;
    use std::str::FromStr;

    fn dec(v: &str) -> Decimal {
        Decimal::from_str(v).unwrap()
    }

    #[test]
    fn score_bounds_are_inclusive() {
        let db = Db::new();

        for ok in ["0", "100", "55.5"] {
            let mut a = ContractRiskAssessment::new(Id::generate(), RiskLevel::Medium);
            a.risk_score = Some(dec(ok));
            assert!(create(&db, a).is_ok(), "{ok} must be accepted");
        }

        for bad in ["-0.01", "100.01"] {
            let mut a = ContractRiskAssessment::new(Id::generate(), RiskLevel::Medium);
            a.risk_score = Some(dec(bad));
            assert!(
                matches!(
                    create(&db, a),
                    Err(ServiceError::Input(InputError::ScoreOutOfRange { .. }))
                ),
                "{bad} must be rejected"
            );
        }
    }

    #[test]
    fn missing_score_is_fine() {
        let db = Db::new();
        let a = ContractRiskAssessment::new(Id::generate(), RiskLevel::Low);
        assert!(create(&db, a).is_ok());
    }
}
