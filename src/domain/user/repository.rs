use crate::domain::errors::DomainResult;
use crate::domain::user::entity::{NewUser, User, UserUpdate};
use crate::domain::user::value_objects::{UserId, UserStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Filters for the active-user listing. Every field is already normalized by
/// the application layer: `None` means "no constraint".
#[derive(Debug, Clone, Default)]
pub struct UserListFilter {
    pub search: Option<String>,
    pub status: Option<UserStatus>,
    pub city: Option<String>,
    pub organisation: Option<String>,
    pub institute: Option<String>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UserStats {
    pub active: u64,
    pub trashed: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UserCleanupStats {
    pub trashed: u64,
    pub due_for_purge: u64,
    pub next_purge_at: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, new_user: NewUser) -> DomainResult<User>;

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;

    async fn update(&self, update: UserUpdate) -> DomainResult<User>;

    /// Set the trash marker and purge horizon. Fails if already trashed.
    async fn mark_trashed(
        &self,
        id: UserId,
        deleted_at: DateTime<Utc>,
        purge_after: DateTime<Utc>,
    ) -> DomainResult<User>;

    /// Clear the trash marker, returning the user to the active listing.
    async fn clear_trashed(&self, id: UserId) -> DomainResult<User>;

    /// Remove the row unconditionally. Irreversible.
    async fn delete(&self, id: UserId) -> DomainResult<()>;

    /// Active users only, sorted and offset-paginated, with total match count.
    async fn list_page(
        &self,
        filter: &UserListFilter,
        sort_column: &str,
        descending: bool,
        limit: u32,
        offset: u64,
    ) -> DomainResult<(Vec<User>, u64)>;

    /// Trashed users only.
    async fn list_trashed_page(&self, limit: u32, offset: u64) -> DomainResult<(Vec<User>, u64)>;

    async fn stats(&self) -> DomainResult<UserStats>;

    async fn cleanup_stats(&self, now: DateTime<Utc>) -> DomainResult<UserCleanupStats>;
}
