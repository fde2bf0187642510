// src/presentation/http/extractors.rs
use crate::{
    application::{dto::AuthenticatedAdmin, error::ApplicationError, recorder::RequestContext},
    presentation::http::state::HttpState,
};
use axum::{extract::FromRequestParts, http::request::Parts, Extension};
use headers::{authorization::Bearer, Authorization, HeaderMapExt};
use std::convert::Infallible;

use super::error::HttpError;

#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthenticatedAdmin);

/// Client IP and User-Agent as captured at the HTTP boundary, handed to the
/// activity recorder for write-time enrichment. Extraction never fails; an
/// absent header just means an absent field.
#[derive(Debug, Clone)]
pub struct ClientContext(pub RequestContext);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(app_state) = Extension::<HttpState>::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                HttpError::from_error(ApplicationError::Infrastructure(
                    "application state missing".into(),
                ))
            })?;

        let header = parts
            .headers
            .typed_get::<Authorization<Bearer>>()
            .ok_or_else(|| {
                HttpError::from_error(ApplicationError::Unauthorized(
                    "missing Authorization header".into(),
                ))
            })?;

        let manager = app_state.services.token_manager();
        let admin = manager
            .authenticate(header.token())
            .await
            .map_err(HttpError::from_error)?;

        Ok(Self(admin))
    }
}

impl<S> FromRequestParts<S> for ClientContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_str = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
        };

        // First hop of x-forwarded-for is the original client.
        let ip_address = header_str("x-forwarded-for")
            .and_then(|chain| chain.split(',').next().map(|ip| ip.trim().to_string()))
            .or_else(|| header_str("x-real-ip"));

        Ok(Self(RequestContext {
            ip_address,
            user_agent: header_str("user-agent"),
        }))
    }
}
