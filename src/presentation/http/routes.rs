// src/presentation/http/routes.rs
use crate::domain::catalog::CatalogKind;
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{activity_logs, auth, catalog, events, posts, roles, users},
    openapi::{self, StatusResponse},
};
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Extension, Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub fn build_router(state: HttpState, allowed_origins: &[String]) -> Router {
    let origin = if allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            allowed_origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok()),
        )
    };

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(tower_http::cors::Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::profile))
        .route("/api/users", get(users::list).post(users::create))
        .route("/api/users/deleted", get(users::list_deleted))
        .route("/api/users/stats/overview", get(users::stats_overview))
        .route("/api/users/cleanup/stats", get(users::cleanup_stats))
        .route("/api/users/export", get(users::export))
        .route(
            "/api/users/{id}",
            get(users::get).put(users::update).delete(users::trash),
        )
        .route("/api/users/{id}/restore", post(users::restore))
        .route("/api/users/{id}/permanent", delete(users::purge))
        .route("/api/posts", get(posts::list).post(posts::create))
        .route(
            "/api/posts/{id}",
            get(posts::get).put(posts::update).delete(posts::delete),
        )
        .route("/api/events", get(events::list).post(events::create))
        .route(
            "/api/events/{id}",
            get(events::get).put(events::update).delete(events::delete),
        )
        .route("/api/roles", get(roles::list).post(roles::create))
        .route(
            "/api/roles/{id}",
            get(roles::get).put(roles::update).delete(roles::delete),
        )
        .nest(
            "/api/cities",
            catalog::router().layer(Extension(CatalogKind::City)),
        )
        .nest(
            "/api/organisations",
            catalog::router().layer(Extension(CatalogKind::Organisation)),
        )
        .nest(
            "/api/institutes",
            catalog::router().layer(Extension(CatalogKind::Institute)),
        )
        .route(
            "/api/activity-logs",
            get(activity_logs::list).post(activity_logs::record),
        )
        .route(
            "/api/activity-logs/navigation",
            post(activity_logs::record_navigation),
        )
        .route("/api/activity-logs/export", get(activity_logs::export))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(Extension(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
