use crate::domain::errors::DomainResult;
use crate::domain::role::entity::{NewRoleRecord, RoleRecord, RoleRecordUpdate};
use async_trait::async_trait;

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn insert(&self, new_role: NewRoleRecord) -> DomainResult<RoleRecord>;

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<RoleRecord>>;

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<RoleRecord>>;

    async fn update(&self, update: RoleRecordUpdate) -> DomainResult<RoleRecord>;

    async fn delete(&self, id: i64) -> DomainResult<()>;

    /// Offset-paginated listing with optional case-insensitive name search.
    async fn list_page(
        &self,
        limit: u32,
        offset: u64,
        search: Option<&str>,
    ) -> DomainResult<(Vec<RoleRecord>, u64)>;
}
