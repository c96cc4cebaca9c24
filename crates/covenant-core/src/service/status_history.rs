use crate::{
    db::{Db, Page, Query},
    model::ContractStatusHistory,
    service::{self, ServiceError},
    types::{Id, Timestamp},
};
use log::debug;

pub fn filter(db: &Db, query: &Query) -> Result<Page<ContractStatusHistory>, ServiceError> {
    Ok(query.run(&*db.status_history()?)?)
}

pub fn create(
    db: &Db,
    entry: ContractStatusHistory,
) -> Result<ContractStatusHistory, ServiceError> {
    let mut store = db.status_history_mut()?;
    let created = service::insert_new(&mut store, entry, Timestamp::now())?;
    debug!(
        "recorded status transition to {} ({})",
        created.new_status, created.contract_status_history_id
    );

    Ok(created)
}

pub fn get(db: &Db, id: Id<ContractStatusHistory>) -> Result<ContractStatusHistory, ServiceError> {
    Ok(db.status_history()?.try_get(id)?.clone())
}

pub fn update(
    db: &Db,
    id: Id<ContractStatusHistory>,
    mut entry: ContractStatusHistory,
) -> Result<ContractStatusHistory, ServiceError> {
    entry.contract_status_history_id = id;

    let mut store = db.status_history_mut()?;
    let updated = service::replace_existing(&mut store, id, entry, Timestamp::now())?;
    debug!("updated status history entry {id}");

    Ok(updated)
}

pub fn delete(db: &Db, id: Id<ContractStatusHistory>) -> Result<(), ServiceError> {
    db.status_history_mut()?.remove(id)?;
    debug!("deleted status history entry {id}");

    Ok(())
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::FilterExpr, model::ContractStatus};

    #[test]
    fn transitions_accumulate_per_contract() {
        let db = Db::new();
        let contract_id = Id::generate();

        let first = ContractStatusHistory::new(contract_id, ContractStatus::Draft);
        create(&db, first).unwrap();

        let mut second = ContractStatusHistory::new(contract_id, ContractStatus::Active);
        second.previous_status = Some(ContractStatus::Draft);
        create(&db, second).unwrap();

        let page = filter(
            &db,
            &Query::new().filter(FilterExpr::eq("contract_id", contract_id.key())),
        )
        .unwrap();
        assert_eq!(page.total, 2);

        // first transition has no previous status
        assert_eq!(page.items[0].previous_status, None);
        assert_eq!(
            page.items[1].previous_status,
            Some(ContractStatus::Draft)
        );
    }
}
