// src/application/queries/events.rs
use crate::application::{
    dto::{active_filter, AuthenticatedAdmin, EventDto, ListParams, Page},
    error::{ApplicationError, ApplicationResult},
    permission::ensure_permitted,
};
use crate::domain::event::{EventListFilter, EventRepository};
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct EventListQuery {
    pub params: ListParams,
    pub category: Option<String>,
    pub starts_from: Option<DateTime<Utc>>,
    pub starts_to: Option<DateTime<Utc>>,
}

fn sort_column(requested: Option<&str>) -> &'static str {
    match requested {
        Some("title") => "title",
        Some("venue") => "venue",
        Some("category") => "category",
        Some("created_at") => "created_at",
        _ => "starts_at",
    }
}

pub struct EventQueryService {
    event_repo: Arc<dyn EventRepository>,
}

impl EventQueryService {
    pub fn new(event_repo: Arc<dyn EventRepository>) -> Self {
        Self { event_repo }
    }

    pub async fn list(
        &self,
        actor: &AuthenticatedAdmin,
        query: EventListQuery,
    ) -> ApplicationResult<Page<EventDto>> {
        ensure_permitted(actor, "events", "read")?;

        let (page, limit) = query.params.normalized();
        let filter = EventListFilter {
            search: active_filter(query.params.search.clone()),
            category: active_filter(query.category),
            starts_from: query.starts_from,
            starts_to: query.starts_to,
        };

        let (events, total) = self
            .event_repo
            .list_page(
                &filter,
                sort_column(query.params.sort_by.as_deref()),
                query.params.sort_order.unwrap_or_default().is_descending(),
                limit,
                query.params.offset(),
            )
            .await?;

        Ok(Page::new(events, total, page, limit).map(EventDto::from))
    }

    pub async fn get(
        &self,
        actor: &AuthenticatedAdmin,
        event_id: i64,
    ) -> ApplicationResult<EventDto> {
        ensure_permitted(actor, "events", "read")?;

        let event = self
            .event_repo
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("event {event_id}")))?;

        Ok(event.into())
    }
}
