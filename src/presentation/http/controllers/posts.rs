// src/presentation/http/controllers/posts.rs
use crate::application::{
    commands::posts::{CreatePostCommand, UpdatePostCommand},
    dto::{ListParams, Page, PostDto, SortOrder},
    error::ApplicationError,
    queries::posts::PostListQuery,
};
use crate::domain::post::PostCategory;
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, ClientContext};
use crate::presentation::http::state::HttpState;
use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Deserialize)]
pub struct PostListParams {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub category: Option<String>,
    pub published: Option<bool>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

impl From<PostListParams> for PostListQuery {
    fn from(params: PostListParams) -> Self {
        PostListQuery {
            params: ListParams {
                page: params.page,
                limit: params.limit,
                search: params.search,
                sort_by: params.sort_by,
                sort_order: params.sort_order,
            },
            category: params.category,
            published: params.published,
            created_from: params.created_from,
            created_to: params.created_to,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    pub title: String,
    pub body: String,
    pub category: String,
    #[serde(default)]
    pub published: bool,
    pub author_name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub category: Option<String>,
    pub published: Option<bool>,
}

fn parse_category(value: &str) -> HttpResult<PostCategory> {
    PostCategory::from_str(value)
        .map_err(|err| HttpError::from_error(ApplicationError::Domain(err)))
}

#[utoipa::path(
    get,
    path = "/api/posts",
    responses((status = 200, description = "Filtered page of posts.", body = Page<PostDto>)),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
pub async fn list(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    Query(params): Query<PostListParams>,
) -> HttpResult<Json<Page<PostDto>>> {
    state
        .services
        .post_queries
        .list(&admin, params.into())
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    responses((status = 200, description = "A single post.", body = PostDto)),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
pub async fn get(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<PostDto>> {
    state
        .services
        .post_queries
        .get(&admin, id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = CreatePostRequest,
    responses((status = 200, description = "The created post.", body = PostDto)),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
pub async fn create(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    ClientContext(context): ClientContext,
    Json(payload): Json<CreatePostRequest>,
) -> HttpResult<Json<PostDto>> {
    let command = CreatePostCommand {
        title: payload.title,
        body: payload.body,
        category: parse_category(&payload.category)?,
        published: payload.published,
        author_name: payload.author_name,
    };

    state
        .services
        .post_commands
        .create(&admin, command, context)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    request_body = UpdatePostRequest,
    responses((status = 200, description = "The updated post.", body = PostDto)),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
pub async fn update(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    ClientContext(context): ClientContext,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePostRequest>,
) -> HttpResult<Json<PostDto>> {
    let category = payload
        .category
        .as_deref()
        .map(parse_category)
        .transpose()?;

    let command = UpdatePostCommand {
        post_id: id,
        title: payload.title,
        body: payload.body,
        category,
        published: payload.published,
    };

    state
        .services
        .post_commands
        .update(&admin, command, context)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    responses((status = 204, description = "The post is gone.")),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
pub async fn delete(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
    ClientContext(context): ClientContext,
    Path(id): Path<i64>,
) -> HttpResult<axum::http::StatusCode> {
    state
        .services
        .post_commands
        .delete(&admin, id, context)
        .await
        .into_http()?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}
