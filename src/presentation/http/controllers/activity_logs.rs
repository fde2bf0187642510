// src/presentation/http/controllers/activity_logs.rs
use crate::application::{
    commands::activity::{RecordActivityCommand, RecordNavigationCommand},
    dto::{ActivityLogDto, ListParams, Page, SortOrder},
    queries::audit::ActivityListQuery,
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, ClientContext};
use crate::presentation::http::state::HttpState;
use axum::{extract::Query, response::Response, Extension, Json};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use super::csv_response;

#[derive(Debug, Deserialize)]
pub struct ActivityListParams {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    pub search: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub actor_id: Option<i64>,
    pub action: Option<String>,
    pub resource_type: Option<String>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

impl From<ActivityListParams> for ActivityListQuery {
    fn from(params: ActivityListParams) -> Self {
        ActivityListQuery {
            params: ListParams {
                page: params.page,
                limit: params.limit,
                search: params.search,
                sort_by: None,
                sort_order: params.sort_order,
            },
            actor_id: params.actor_id,
            action: params.action,
            resource_type: params.resource_type,
            created_from: params.created_from,
            created_to: params.created_to,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordActivityRequest {
    pub action: String,
    pub description: String,
    pub module: Option<String>,
    #[schema(value_type = Object)]
    pub metadata: Option<Value>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordNavigationRequest {
    pub from: Option<String>,
    pub to: String,
}

#[utoipa::path(
    get,
    path = "/api/activity-logs",
    responses((status = 200, description = "Newest-first page of the audit trail.", body = Page<ActivityLogDto>)),
    security(("bearer_auth" = [])),
    tag = "ActivityLogs"
)]
pub async fn list(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    Query(params): Query<ActivityListParams>,
) -> HttpResult<Json<Page<ActivityLogDto>>> {
    state
        .services
        .activity_queries
        .list(&admin, params.into())
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/activity-logs",
    request_body = RecordActivityRequest,
    responses((status = 202, description = "Entry queued for recording.")),
    security(("bearer_auth" = [])),
    tag = "ActivityLogs"
)]
pub async fn record(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    ClientContext(context): ClientContext,
    Json(payload): Json<RecordActivityRequest>,
) -> HttpResult<axum::http::StatusCode> {
    state
        .services
        .activity_commands
        .record(
            &admin,
            RecordActivityCommand {
                action: payload.action,
                description: payload.description,
                module: payload.module,
                metadata: payload.metadata,
            },
            context,
        )
        .into_http()?;
    Ok(axum::http::StatusCode::ACCEPTED)
}

#[utoipa::path(
    post,
    path = "/api/activity-logs/navigation",
    request_body = RecordNavigationRequest,
    responses((status = 202, description = "Navigation entry queued for recording.")),
    security(("bearer_auth" = [])),
    tag = "ActivityLogs"
)]
pub async fn record_navigation(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    ClientContext(context): ClientContext,
    Json(payload): Json<RecordNavigationRequest>,
) -> HttpResult<axum::http::StatusCode> {
    state
        .services
        .activity_commands
        .record_navigation(
            &admin,
            RecordNavigationCommand {
                from: payload.from,
                to: payload.to,
            },
            context,
        )
        .into_http()?;
    Ok(axum::http::StatusCode::ACCEPTED)
}

#[utoipa::path(
    get,
    path = "/api/activity-logs/export",
    responses((status = 200, description = "CSV download of the filtered audit trail.")),
    security(("bearer_auth" = [])),
    tag = "ActivityLogs"
)]
pub async fn export(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    ClientContext(context): ClientContext,
    Query(params): Query<ActivityListParams>,
) -> HttpResult<Response> {
    let file = state
        .services
        .activity_queries
        .export_csv(&admin, params.into(), context)
        .await
        .into_http()?;

    Ok(csv_response(file))
}
