use crate::domain::admin::entity::{Admin, AdminUpdate, NewAdmin};
use crate::domain::admin::value_objects::{AdminId, Email};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn count(&self) -> DomainResult<u64>;

    async fn insert(&self, new_admin: NewAdmin) -> DomainResult<Admin>;

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<Admin>>;

    async fn find_by_id(&self, id: AdminId) -> DomainResult<Option<Admin>>;

    async fn update(&self, update: AdminUpdate) -> DomainResult<Admin>;
}
