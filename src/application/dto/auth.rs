use crate::domain::admin::{AdminId, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthTokenDto {
    pub token: String,
    #[serde(with = "serde_time")]
    pub issued_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub expires_at: DateTime<Utc>,
    pub expires_in: i64,
}

/// The acting admin as resolved from a bearer token. The role is a fully
/// resolved sum type; no call site re-derives permissions from a stored
/// role name.
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin {
    pub id: AdminId,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AuthenticatedAdmin {
    pub fn permits(&self, resource: &str, action: &str) -> bool {
        self.role.permits(resource, action)
    }
}

/// What a freshly issued token certifies.
#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub admin_id: AdminId,
    pub email: String,
    pub display_name: String,
    pub role: Role,
}
