use crate::{
    db::{Db, Page, Query},
    model::ContractDocument,
    service::{self, ServiceError},
    types::{Id, Timestamp},
};
use log::debug;

pub fn filter(db: &Db, query: &Query) -> Result<Page<ContractDocument>, ServiceError> {
    Ok(query.run(&*db.documents()?)?)
}

pub fn create(db: &Db, document: ContractDocument) -> Result<ContractDocument, ServiceError> {
    let mut store = db.documents_mut()?;
    let created = service::insert_new(&mut store, document, Timestamp::now())?;
    debug!("linked document {}", created.contract_document_id);

    Ok(created)
}

pub fn get(db: &Db, id: Id<ContractDocument>) -> Result<ContractDocument, ServiceError> {
    Ok(db.documents()?.try_get(id)?.clone())
}

pub fn update(
    db: &Db,
    id: Id<ContractDocument>,
    mut document: ContractDocument,
) -> Result<ContractDocument, ServiceError> {
    document.contract_document_id = id;

    let mut store = db.documents_mut()?;
    let updated = service::replace_existing(&mut store, id, document, Timestamp::now())?;
    debug!("updated document link {id}");

    Ok(updated)
}

pub fn delete(db: &Db, id: Id<ContractDocument>) -> Result<(), ServiceError> {
    db.documents_mut()?.remove(id)?;
    debug!("deleted document link {id}");

    Ok(())
}

///
/// TESTS
///
