// src/presentation/http/controllers/roles.rs
use crate::application::{
    commands::roles::{CreateRoleCommand, UpdateRoleCommand},
    dto::{GrantView, ListParams, Page, RoleDto},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, ClientContext};
use crate::presentation::http::state::HttpState;
use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRoleRequest {
    pub name: String,
    #[serde(default)]
    pub grants: Vec<GrantView>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRoleRequest {
    pub name: Option<String>,
    pub grants: Option<Vec<GrantView>>,
}

#[utoipa::path(
    get,
    path = "/api/roles",
    responses((status = 200, description = "Page of stored roles.", body = Page<RoleDto>)),
    security(("bearer_auth" = [])),
    tag = "Roles"
)]
pub async fn list(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    Query(params): Query<ListParams>,
) -> HttpResult<Json<Page<RoleDto>>> {
    state
        .services
        .role_queries
        .list(&admin, params)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/roles/{id}",
    responses((status = 200, description = "A single role with its grants.", body = RoleDto)),
    security(("bearer_auth" = [])),
    tag = "Roles"
)]
pub async fn get(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<RoleDto>> {
    state
        .services
        .role_queries
        .get(&admin, id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/roles",
    request_body = CreateRoleRequest,
    responses((status = 200, description = "The created role.", body = RoleDto)),
    security(("bearer_auth" = [])),
    tag = "Roles"
)]
pub async fn create(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    ClientContext(context): ClientContext,
    Json(payload): Json<CreateRoleRequest>,
) -> HttpResult<Json<RoleDto>> {
    let command = CreateRoleCommand {
        name: payload.name,
        grants: payload.grants,
    };

    state
        .services
        .role_commands
        .create(&admin, command, context)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/roles/{id}",
    request_body = UpdateRoleRequest,
    responses((status = 200, description = "The updated role.", body = RoleDto)),
    security(("bearer_auth" = [])),
    tag = "Roles"
)]
pub async fn update(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    ClientContext(context): ClientContext,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateRoleRequest>,
) -> HttpResult<Json<RoleDto>> {
    let command = UpdateRoleCommand {
        role_id: id,
        name: payload.name,
        grants: payload.grants,
    };

    state
        .services
        .role_commands
        .update(&admin, command, context)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/roles/{id}",
    responses((status = 204, description = "The role is gone.")),
    security(("bearer_auth" = [])),
    tag = "Roles"
)]
pub async fn delete(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    ClientContext(context): ClientContext,
    Path(id): Path<i64>,
) -> HttpResult<axum::http::StatusCode> {
    state
        .services
        .role_commands
        .delete(&admin, id, context)
        .await
        .into_http()?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}
