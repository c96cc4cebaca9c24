use crate::{
    db::{Db, Page, Query},
    model::Contract,
    service::{self, ServiceError},
    types::{Id, Timestamp},
};
use log::debug;

const MAX_CONTRACT_NUMBER: usize = 255;

pub fn filter(db: &Db, query: &Query) -> Result<Page<Contract>, ServiceError> {
    Ok(query.run(&*db.contracts()?)?)
}

pub fn create(db: &Db, contract: Contract) -> Result<Contract, ServiceError> {
    validate(&contract)?;

    let mut store = db.contracts_mut()?;
    let created = service::insert_new(&mut store, contract, Timestamp::now())?;
    debug!("created contract {}", created.contract_id);

    Ok(created)
}

pub fn get(db: &Db, id: Id<Contract>) -> Result<Contract, ServiceError> {
    Ok(db.contracts()?.try_get(id)?.clone())
}

pub fn update(db: &Db, id: Id<Contract>, mut contract: Contract) -> Result<Contract, ServiceError> {
    validate(&contract)?;
    contract.contract_id = id;

    let mut store = db.contracts_mut()?;
    let updated = service::replace_existing(&mut store, id, contract, Timestamp::now())?;
    debug!("updated contract {id}");

    Ok(updated)
}

pub fn delete(db: &Db, id: Id<Contract>) -> Result<(), ServiceError> {
    db.contracts_mut()?.remove(id)?;
    debug!("deleted contract {id}");

    Ok(())
}

fn validate(contract: &Contract) -> Result<(), ServiceError> {
    service::check_len(
        "contract_number",
        contract.contract_number.as_deref(),
        MAX_CONTRACT_NUMBER,
    )?;

    Ok(())
}

///
/// TESTS
///
