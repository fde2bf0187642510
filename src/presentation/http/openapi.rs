// src/presentation/http/openapi.rs
use axum::{response::Redirect, routing::get, Router};
use serde::{Deserialize, Serialize};
use std::env;
use utoipa::openapi::{
    security::{Http, HttpAuthScheme, SecurityScheme},
    server::Server,
    Components,
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::auth::login,
        crate::presentation::http::controllers::auth::profile,
        crate::presentation::http::controllers::users::list,
        crate::presentation::http::controllers::users::create,
        crate::presentation::http::controllers::users::get,
        crate::presentation::http::controllers::users::update,
        crate::presentation::http::controllers::users::trash,
        crate::presentation::http::controllers::users::restore,
        crate::presentation::http::controllers::users::purge,
        crate::presentation::http::controllers::users::list_deleted,
        crate::presentation::http::controllers::users::stats_overview,
        crate::presentation::http::controllers::users::cleanup_stats,
        crate::presentation::http::controllers::users::export,
        crate::presentation::http::controllers::posts::list,
        crate::presentation::http::controllers::posts::get,
        crate::presentation::http::controllers::posts::create,
        crate::presentation::http::controllers::posts::update,
        crate::presentation::http::controllers::posts::delete,
        crate::presentation::http::controllers::events::list,
        crate::presentation::http::controllers::events::get,
        crate::presentation::http::controllers::events::create,
        crate::presentation::http::controllers::events::update,
        crate::presentation::http::controllers::events::delete,
        crate::presentation::http::controllers::roles::list,
        crate::presentation::http::controllers::roles::get,
        crate::presentation::http::controllers::roles::create,
        crate::presentation::http::controllers::roles::update,
        crate::presentation::http::controllers::roles::delete,
        crate::presentation::http::controllers::activity_logs::list,
        crate::presentation::http::controllers::activity_logs::record,
        crate::presentation::http::controllers::activity_logs::record_navigation,
        crate::presentation::http::controllers::activity_logs::export,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::auth::LoginRequest,
            crate::presentation::http::controllers::auth::LoginResponse,
            crate::presentation::http::controllers::users::CreateUserRequest,
            crate::presentation::http::controllers::users::UpdateUserRequest,
            crate::presentation::http::controllers::posts::CreatePostRequest,
            crate::presentation::http::controllers::posts::UpdatePostRequest,
            crate::presentation::http::controllers::events::CreateEventRequest,
            crate::presentation::http::controllers::events::UpdateEventRequest,
            crate::presentation::http::controllers::roles::CreateRoleRequest,
            crate::presentation::http::controllers::roles::UpdateRoleRequest,
            crate::presentation::http::controllers::activity_logs::RecordActivityRequest,
            crate::presentation::http::controllers::activity_logs::RecordNavigationRequest,
            crate::application::dto::AdminDto,
            crate::application::dto::AdminProfileDto,
            crate::application::dto::GrantView,
            crate::application::dto::UserDto,
            crate::application::dto::DeletedUserDto,
            crate::application::dto::UserStatsDto,
            crate::application::dto::UserCleanupStatsDto,
            crate::application::dto::PostDto,
            crate::application::dto::EventDto,
            crate::application::dto::RoleDto,
            crate::application::dto::ActivityLogDto,
            crate::application::dto::FieldChangeDto
        )
    ),
    tags(
        (name = "Auth", description = "Authentication and session endpoints"),
        (name = "Users", description = "Member management and trash lifecycle"),
        (name = "Posts", description = "Post management endpoints"),
        (name = "Events", description = "Event management endpoints"),
        (name = "Roles", description = "Role and permission endpoints"),
        (name = "ActivityLogs", description = "Audit trail endpoints"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    security(("bearer_auth" = [])),
    info(
        title = "Back-office API",
        description = "Administrative back-office backend",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("JWT".into());
        components.add_security_scheme("bearer_auth", SecurityScheme::Http(http));

        let servers = openapi.servers.get_or_insert_with(Vec::new);
        servers.clear();

        if let Ok(url) = env::var("PUBLIC_API_URL") {
            let sanitized = url.trim().trim_end_matches('/');
            if !sanitized.is_empty() {
                servers.push(Server::new(sanitized));
            }
        }
        if servers.is_empty() {
            servers.push(Server::new("http://localhost:3000"));
        }
    }
}

pub async fn serve_openapi() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}

pub fn docs_router() -> Router {
    let swagger =
        SwaggerUi::new("/docs").config(utoipa_swagger_ui::Config::from("/openapi.json"));
    Router::new()
        .route("/openapi.json", get(serve_openapi))
        .merge(swagger)
        .route("/", get(|| async { Redirect::permanent("/docs") }))
}
