use crate::{
    db::{
        filter::{FilterExpr, QueryError},
        page::{Page, PageRequest, SortDir, SortExpr},
        store::Store,
    },
    model::{EntityKind, FieldValues},
};
use serde::{Deserialize, Serialize};

///
/// Query
///
/// The filter request a resource endpoint accepts: criteria, optional
/// ordering, and the page window. Mirrors the wire-level filter envelope;
/// services run it against their store unchanged.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Query {
    #[serde(default)]
    pub filter: FilterExpr,
    #[serde(default)]
    pub sort: Option<SortExpr>,
    #[serde(default)]
    pub page: PageRequest,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn filter(mut self, filter: FilterExpr) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn sort(mut self, sort: SortExpr) -> Self {
        self.sort = Some(sort);
        self
    }

    #[must_use]
    pub const fn page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }

    /// Filter, sort, and paginate against a store.
    pub fn run<E>(&self, store: &Store<E>) -> Result<Page<E>, QueryError>
    where
        E: EntityKind + FieldValues,
    {
        let mut rows = store.search(&self.filter)?;

        if let Some(sort) = &self.sort {
            // probe the field name first so typos surface as errors
            if let Some(row) = rows.first() {
                if row.field(&sort.field).is_none() {
                    return Err(QueryError::UnknownField {
                        entity: E::PATH,
                        field: sort.field.clone(),
                    });
                }
            }

            rows.sort_by(|a, b| {
                let ord = match (a.field(&sort.field), b.field(&sort.field)) {
                    (Some(va), Some(vb)) => {
                        va.partial_cmp_value(&vb).unwrap_or(std::cmp::Ordering::Equal)
                    }
                    _ => std::cmp::Ordering::Equal,
                };

                match sort.dir {
                    SortDir::Asc => ord,
                    SortDir::Desc => ord.reverse(),
                }
            });
        }

        let total = rows.len() as u64;
        let size = self.page.effective_size();
        let start = usize::try_from(u64::from(self.page.page) * u64::from(size)).unwrap_or(usize::MAX);

        let items = if start >= rows.len() {
            Vec::new()
        } else {
            rows.into_iter().skip(start).take(size as usize).collect()
        };

        Ok(Page {
            items,
            total,
            page: self.page.page,
            size,
        })
    }
}

///
/// TESTS
///
