use crate::{
    db::{Db, Page, Query},
    model::ContractParty,
    service::{self, ServiceError},
    types::{Id, Timestamp},
};
use log::debug;

pub fn filter(db: &Db, query: &Query) -> Result<Page<ContractParty>, ServiceError> {
    Ok(query.run(&*db.parties()?)?)
}

pub fn create(db: &Db, party: ContractParty) -> Result<ContractParty, ServiceError> {
    let mut store = db.parties_mut()?;
    let created = service::insert_new(&mut store, party, Timestamp::now())?;
    debug!("created contract party {}", created.contract_party_id);

    Ok(created)
}

pub fn get(db: &Db, id: Id<ContractParty>) -> Result<ContractParty, ServiceError> {
    Ok(db.parties()?.try_get(id)?.clone())
}

pub fn update(
    db: &Db,
    id: Id<ContractParty>,
    mut party: ContractParty,
) -> Result<ContractParty, ServiceError> {
    party.contract_party_id = id;

    let mut store = db.parties_mut()?;
    let updated = service::replace_existing(&mut store, id, party, Timestamp::now())?;
    debug!("updated contract party {id}");

    Ok(updated)
}

pub fn delete(db: &Db, id: Id<ContractParty>) -> Result<(), ServiceError> {
    db.parties_mut()?.remove(id)?;
    debug!("deleted contract party {id}");

    Ok(())
}

///
/// TESTS
///
