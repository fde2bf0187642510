use crate::domain::catalog::entity::{
    CatalogEntry, CatalogEntryUpdate, CatalogKind, NewCatalogEntry,
};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn insert(&self, kind: CatalogKind, entry: NewCatalogEntry) -> DomainResult<CatalogEntry>;

    async fn find_by_id(&self, kind: CatalogKind, id: i64) -> DomainResult<Option<CatalogEntry>>;

    async fn update(
        &self,
        kind: CatalogKind,
        update: CatalogEntryUpdate,
    ) -> DomainResult<CatalogEntry>;

    async fn delete(&self, kind: CatalogKind, id: i64) -> DomainResult<()>;

    async fn list_page(
        &self,
        kind: CatalogKind,
        search: Option<&str>,
        limit: u32,
        offset: u64,
    ) -> DomainResult<(Vec<CatalogEntry>, u64)>;
}
