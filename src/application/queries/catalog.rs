// src/application/queries/catalog.rs
use crate::application::{
    dto::{active_filter, AuthenticatedAdmin, CatalogEntryDto, ListParams, Page},
    error::{ApplicationError, ApplicationResult},
    permission::ensure_permitted,
};
use crate::domain::catalog::{CatalogKind, CatalogRepository};
use std::sync::Arc;

pub struct CatalogQueryService {
    catalog_repo: Arc<dyn CatalogRepository>,
}

impl CatalogQueryService {
    pub fn new(catalog_repo: Arc<dyn CatalogRepository>) -> Self {
        Self { catalog_repo }
    }

    pub async fn list(
        &self,
        actor: &AuthenticatedAdmin,
        kind: CatalogKind,
        params: ListParams,
    ) -> ApplicationResult<Page<CatalogEntryDto>> {
        ensure_permitted(actor, kind.resource(), "read")?;

        let (page, limit) = params.normalized();
        let search = active_filter(params.search.clone());

        let (entries, total) = self
            .catalog_repo
            .list_page(kind, search.as_deref(), limit, params.offset())
            .await?;

        Ok(Page::new(entries, total, page, limit).map(CatalogEntryDto::from))
    }

    pub async fn get(
        &self,
        actor: &AuthenticatedAdmin,
        kind: CatalogKind,
        entry_id: i64,
    ) -> ApplicationResult<CatalogEntryDto> {
        ensure_permitted(actor, kind.resource(), "read")?;

        let entry = self
            .catalog_repo
            .find_by_id(kind, entry_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::not_found(format!("{} {entry_id}", kind.noun()))
            })?;

        Ok(entry.into())
    }
}
