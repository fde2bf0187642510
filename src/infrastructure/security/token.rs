// src/infrastructure/security/token.rs
use crate::application::{
    dto::{AuthTokenDto, AuthenticatedAdmin, TokenSubject},
    error::{ApplicationError, ApplicationResult},
    ports::{security::TokenManager, time::Clock},
};
use crate::domain::admin::{AdminId, Role};
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// HS256 bearer tokens. The claims carry the fully resolved role so request
/// handling never goes back to the roles table.
pub struct JwtTokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: i64,
    email: String,
    name: String,
    role: Role,
    iat: i64,
    exp: i64,
}

impl JwtTokenManager {
    pub fn new(secret: &str, ttl_seconds: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl_seconds),
            clock,
        }
    }
}

fn timestamp(secs: i64) -> ApplicationResult<DateTime<Utc>> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| ApplicationError::unauthorized("malformed token timestamp"))
}

#[async_trait]
impl TokenManager for JwtTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let issued_at = self.clock.now();
        let expires_at = issued_at + self.ttl;

        let claims = Claims {
            sub: subject.admin_id.into(),
            email: subject.email,
            name: subject.display_name,
            role: subject.role,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        Ok(AuthTokenDto {
            token,
            issued_at,
            expires_at,
            expires_in: self.ttl.num_seconds(),
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedAdmin> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default()).map_err(
            |err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    ApplicationError::unauthorized("token has expired")
                }
                _ => ApplicationError::unauthorized("invalid token"),
            },
        )?;

        let claims = data.claims;
        Ok(AuthenticatedAdmin {
            id: AdminId::new(claims.sub)
                .map_err(|_| ApplicationError::unauthorized("invalid token subject"))?,
            email: claims.email,
            display_name: claims.name,
            role: claims.role,
            issued_at: timestamp(claims.iat)?,
            expires_at: timestamp(claims.exp)?,
        })
    }
}
