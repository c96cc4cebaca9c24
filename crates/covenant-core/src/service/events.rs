use crate::{
    db::{Db, Page, Query},
    model::ContractEvent,
    service::{self, ServiceError},
    types::{Id, Timestamp},
};
use log::debug;

pub fn filter(db: &Db, query: &Query) -> Result<Page<ContractEvent>, ServiceError> {
    Ok(query.run(&*db.events()?)?)
}

pub fn create(db: &Db, event: ContractEvent) -> Result<ContractEvent, ServiceError> {
    let mut store = db.events_mut()?;
    let created = service::insert_new(&mut store, event, Timestamp::now())?;
    debug!(
        "recorded {} event {}",
        created.event_type, created.contract_event_id
    );

    Ok(created)
}

pub fn get(db: &Db, id: Id<ContractEvent>) -> Result<ContractEvent, ServiceError> {
    Ok(db.events()?.try_get(id)?.clone())
}

pub fn update(
    db: &Db,
    id: Id<ContractEvent>,
    mut event: ContractEvent,
) -> Result<ContractEvent, ServiceError> {
    event.contract_event_id = id;

    let mut store = db.events_mut()?;
    let updated = service::replace_existing(&mut store, id, event, Timestamp::now())?;
    debug!("updated contract event {id}");

    Ok(updated)
}

pub fn delete(db: &Db, id: Id<ContractEvent>) -> Result<(), ServiceError> {
    db.events_mut()?.remove(id)?;
    debug!("deleted contract event {id}");

    Ok(())
}

///
/// TESTS
///
