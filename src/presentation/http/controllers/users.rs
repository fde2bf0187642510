// src/presentation/http/controllers/users.rs
use crate::application::{
    commands::users::{CreateUserCommand, UpdateUserCommand},
    dto::{
        DeletedUserDto, ListParams, Page, SortOrder, UserCleanupStatsDto, UserDto, UserStatsDto,
    },
    error::ApplicationError,
    queries::users::UserListQuery,
};
use crate::domain::user::UserStatus;
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, ClientContext};
use crate::presentation::http::state::HttpState;
use axum::{
    extract::{Path, Query},
    response::Response,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::str::FromStr;
use utoipa::ToSchema;

use super::{csv_response, double_option};

#[derive(Debug, Deserialize)]
pub struct UserListParams {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub status: Option<String>,
    pub city: Option<String>,
    pub organisation: Option<String>,
    pub institute: Option<String>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

impl From<UserListParams> for UserListQuery {
    fn from(params: UserListParams) -> Self {
        UserListQuery {
            params: ListParams {
                page: params.page,
                limit: params.limit,
                search: params.search,
                sort_by: params.sort_by,
                sort_order: params.sort_order,
            },
            status: params.status,
            city: params.city,
            organisation: params.organisation,
            institute: params.institute,
            created_from: params.created_from,
            created_to: params.created_to,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub full_name: String,
    pub email: String,
    pub status: Option<String>,
    pub city: Option<String>,
    pub organisation: Option<String>,
    pub institute: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub organisation: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub institute: Option<Option<String>>,
}

fn parse_status(value: Option<String>) -> HttpResult<Option<UserStatus>> {
    value
        .map(|s| UserStatus::from_str(&s))
        .transpose()
        .map_err(|err| HttpError::from_error(ApplicationError::Domain(err)))
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses((status = 200, description = "Filtered page of active users.", body = Page<UserDto>)),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn list(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    Query(params): Query<UserListParams>,
) -> HttpResult<Json<Page<UserDto>>> {
    state
        .services
        .user_queries
        .list(&admin, params.into())
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses((status = 200, description = "The created user.", body = UserDto)),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn create(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    ClientContext(context): ClientContext,
    Json(payload): Json<CreateUserRequest>,
) -> HttpResult<Json<UserDto>> {
    let command = CreateUserCommand {
        full_name: payload.full_name,
        email: payload.email,
        status: parse_status(payload.status)?,
        city: payload.city,
        organisation: payload.organisation,
        institute: payload.institute,
    };

    state
        .services
        .user_commands
        .create(&admin, command, context)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    responses((status = 200, description = "A single user.", body = UserDto)),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<UserDto>> {
    state
        .services
        .user_queries
        .get(&admin, id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    request_body = UpdateUserRequest,
    responses((status = 200, description = "The updated user.", body = UserDto)),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    ClientContext(context): ClientContext,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> HttpResult<Json<UserDto>> {
    let command = UpdateUserCommand {
        user_id: id,
        full_name: payload.full_name,
        email: payload.email,
        status: parse_status(payload.status)?,
        city: payload.city,
        organisation: payload.organisation,
        institute: payload.institute,
    };

    state
        .services
        .user_commands
        .update(&admin, command, context)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    responses((status = 200, description = "The user, now in the trash.", body = DeletedUserDto)),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn trash(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    ClientContext(context): ClientContext,
    Path(id): Path<i64>,
) -> HttpResult<Json<DeletedUserDto>> {
    state
        .services
        .user_commands
        .trash(&admin, id, context)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/users/{id}/restore",
    responses((status = 200, description = "The restored user.", body = UserDto)),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn restore(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    ClientContext(context): ClientContext,
    Path(id): Path<i64>,
) -> HttpResult<Json<UserDto>> {
    state
        .services
        .user_commands
        .restore(&admin, id, context)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}/permanent",
    responses((status = 204, description = "The user row is gone.")),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn purge(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    ClientContext(context): ClientContext,
    Path(id): Path<i64>,
) -> HttpResult<axum::http::StatusCode> {
    state
        .services
        .user_commands
        .purge(&admin, id, context)
        .await
        .into_http()?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/users/deleted",
    responses((status = 200, description = "Trashed users with purge countdowns.", body = Page<DeletedUserDto>)),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn list_deleted(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    Query(params): Query<ListParams>,
) -> HttpResult<Json<Page<DeletedUserDto>>> {
    state
        .services
        .user_queries
        .list_deleted(&admin, params)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/users/stats/overview",
    responses((status = 200, description = "Active/trashed/total counts.", body = UserStatsDto)),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn stats_overview(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
) -> HttpResult<Json<UserStatsDto>> {
    state
        .services
        .user_queries
        .stats_overview(&admin)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/users/cleanup/stats",
    responses((status = 200, description = "Purge backlog summary.", body = UserCleanupStatsDto)),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn cleanup_stats(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
) -> HttpResult<Json<UserCleanupStatsDto>> {
    state
        .services
        .user_queries
        .cleanup_stats(&admin)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/users/export",
    responses((status = 200, description = "CSV download of the filtered user listing.")),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn export(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    ClientContext(context): ClientContext,
    Query(params): Query<UserListParams>,
) -> HttpResult<Response> {
    let file = state
        .services
        .user_queries
        .export_csv(&admin, params.into(), context)
        .await
        .into_http()?;

    Ok(csv_response(file))
}
