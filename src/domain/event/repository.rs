use crate::domain::errors::DomainResult;
use crate::domain::event::entity::{Event, EventUpdate, NewEvent};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default)]
pub struct EventListFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub starts_from: Option<DateTime<Utc>>,
    pub starts_to: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn insert(&self, new_event: NewEvent) -> DomainResult<Event>;

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Event>>;

    async fn update(&self, update: EventUpdate) -> DomainResult<Event>;

    async fn delete(&self, id: i64) -> DomainResult<()>;

    async fn list_page(
        &self,
        filter: &EventListFilter,
        sort_column: &str,
        descending: bool,
        limit: u32,
        offset: u64,
    ) -> DomainResult<(Vec<Event>, u64)>;
}
