// src/presentation/http/controllers/auth.rs
use crate::application::{
    commands::auth::LoginCommand,
    dto::{AdminDto, AdminProfileDto, AuthTokenDto},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, ClientContext};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: AuthTokenDto,
    pub admin: AdminDto,
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted.", body = LoginResponse),
        (status = 401, description = "Invalid credentials.")
    ),
    tag = "Auth"
)]
pub async fn login(
    Extension(state): Extension<HttpState>,
    ClientContext(context): ClientContext,
    Json(payload): Json<LoginRequest>,
) -> HttpResult<Json<LoginResponse>> {
    let result = state
        .services
        .auth_commands
        .login(
            LoginCommand {
                email: payload.email,
                password: payload.password,
            },
            context,
        )
        .await
        .into_http()?;

    Ok(Json(LoginResponse {
        token: result.token,
        admin: result.admin,
    }))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "The acting admin's profile and grants.", body = AdminProfileDto),
        (status = 401, description = "Missing or invalid token.")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn profile(
    Extension(state): Extension<HttpState>,
    Authenticated(admin): Authenticated,
) -> HttpResult<Json<AdminProfileDto>> {
    state
        .services
        .admin_queries
        .profile(&admin)
        .await
        .into_http()
        .map(Json)
}
