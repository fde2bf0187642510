// src/presentation/http/controllers/catalog.rs
//
// Cities, organisations and institutes share one handler set; the kind is
// injected per mount point as a router extension.
use crate::application::{
    commands::catalog::{CreateCatalogEntryCommand, UpdateCatalogEntryCommand},
    dto::{CatalogEntryDto, ListParams, Page},
};
use crate::domain::catalog::CatalogKind;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, ClientContext};
use crate::presentation::http::state::HttpState;
use axum::{
    extract::{Path, Query},
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

use super::double_option;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_one).put(update).delete(delete))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCatalogEntryRequest {
    pub name: String,
    pub city: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCatalogEntryRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub city: Option<Option<String>>,
}

pub async fn list(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<CatalogKind>,
    Authenticated(admin): Authenticated,
    Query(params): Query<ListParams>,
) -> HttpResult<Json<Page<CatalogEntryDto>>> {
    state
        .services
        .catalog_queries
        .list(&admin, kind, params)
        .await
        .into_http()
        .map(Json)
}

pub async fn get_one(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<CatalogKind>,
    Authenticated(admin): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<CatalogEntryDto>> {
    state
        .services
        .catalog_queries
        .get(&admin, kind, id)
        .await
        .into_http()
        .map(Json)
}

pub async fn create(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<CatalogKind>,
    Authenticated(admin): Authenticated,
    ClientContext(context): ClientContext,
    Json(payload): Json<CreateCatalogEntryRequest>,
) -> HttpResult<Json<CatalogEntryDto>> {
    let command = CreateCatalogEntryCommand {
        name: payload.name,
        city: payload.city,
    };

    state
        .services
        .catalog_commands
        .create(&admin, kind, command, context)
        .await
        .into_http()
        .map(Json)
}

pub async fn update(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<CatalogKind>,
    Authenticated(admin): Authenticated,
    ClientContext(context): ClientContext,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCatalogEntryRequest>,
) -> HttpResult<Json<CatalogEntryDto>> {
    let command = UpdateCatalogEntryCommand {
        entry_id: id,
        name: payload.name,
        city: payload.city,
    };

    state
        .services
        .catalog_commands
        .update(&admin, kind, command, context)
        .await
        .into_http()
        .map(Json)
}

pub async fn delete(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<CatalogKind>,
    Authenticated(admin): Authenticated,
    ClientContext(context): ClientContext,
    Path(id): Path<i64>,
) -> HttpResult<axum::http::StatusCode> {
    state
        .services
        .catalog_commands
        .delete(&admin, kind, id, context)
        .await
        .into_http()?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}
