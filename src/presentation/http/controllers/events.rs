// src/presentation/http/controllers/events.rs
use crate::application::{
    commands::events::{CreateEventCommand, UpdateEventCommand},
    dto::{EventDto, ListParams, Page, SortOrder},
    queries::events::EventListQuery,
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, ClientContext};
use crate::presentation::http::state::HttpState;
use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use super::double_option;

#[derive(Debug, Deserialize)]
pub struct EventListParams {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub category: Option<String>,
    pub starts_from: Option<DateTime<Utc>>,
    pub starts_to: Option<DateTime<Utc>>,
}

impl From<EventListParams> for EventListQuery {
    fn from(params: EventListParams) -> Self {
        EventListQuery {
            params: ListParams {
                page: params.page,
                limit: params.limit,
                search: params.search,
                sort_by: params.sort_by,
                sort_order: params.sort_order,
            },
            category: params.category,
            starts_from: params.starts_from,
            starts_to: params.starts_to,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub venue: String,
    pub category: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub category: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub ends_at: Option<Option<DateTime<Utc>>>,
}

#[utoipa::path(
    get,
    path = "/api/events",
    responses((status = 200, description = "Filtered page of events.", body = Page<EventDto>)),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
pub async fn list(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    Query(params): Query<EventListParams>,
) -> HttpResult<Json<Page<EventDto>>> {
    state
        .services
        .event_queries
        .list(&admin, params.into())
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/events/{id}",
    responses((status = 200, description = "A single event.", body = EventDto)),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
pub async fn get(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<EventDto>> {
    state
        .services
        .event_queries
        .get(&admin, id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventRequest,
    responses((status = 200, description = "The created event.", body = EventDto)),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
pub async fn create(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    ClientContext(context): ClientContext,
    Json(payload): Json<CreateEventRequest>,
) -> HttpResult<Json<EventDto>> {
    let command = CreateEventCommand {
        title: payload.title,
        description: payload.description,
        venue: payload.venue,
        category: payload.category,
        starts_at: payload.starts_at,
        ends_at: payload.ends_at,
    };

    state
        .services
        .event_commands
        .create(&admin, command, context)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/events/{id}",
    request_body = UpdateEventRequest,
    responses((status = 200, description = "The updated event.", body = EventDto)),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
pub async fn update(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    ClientContext(context): ClientContext,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateEventRequest>,
) -> HttpResult<Json<EventDto>> {
    let command = UpdateEventCommand {
        event_id: id,
        title: payload.title,
        description: payload.description,
        venue: payload.venue,
        category: payload.category,
        starts_at: payload.starts_at,
        ends_at: payload.ends_at,
    };

    state
        .services
        .event_commands
        .update(&admin, command, context)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    responses((status = 204, description = "The event is gone.")),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
pub async fn delete(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    ClientContext(context): ClientContext,
    Path(id): Path<i64>,
) -> HttpResult<axum::http::StatusCode> {
    state
        .services
        .event_commands
        .delete(&admin, id, context)
        .await
        .into_http()?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}
