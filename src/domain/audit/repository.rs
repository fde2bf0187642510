use crate::domain::audit::entity::{ActivityLog, NewActivityLog};
use crate::domain::audit::filter::ActivityLogFilter;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

/// Append-only store. There is deliberately no update or delete operation:
/// a written log entry is an immutable audit fact.
#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    async fn insert(&self, log: NewActivityLog) -> DomainResult<()>;

    /// Newest-first offset pagination with total match count.
    async fn list_page(
        &self,
        filter: &ActivityLogFilter,
        limit: u32,
        offset: u64,
    ) -> DomainResult<(Vec<ActivityLog>, u64)>;
}
