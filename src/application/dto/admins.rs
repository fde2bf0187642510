use crate::domain::admin::{Admin, Grant};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{auth::AuthenticatedAdmin, serde_time};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminDto {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub is_active: bool,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<Admin> for AdminDto {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id.into(),
            email: admin.email.to_string(),
            display_name: admin.display_name,
            role: admin.role_name,
            is_active: admin.is_active,
            created_at: admin.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GrantView {
    pub resource: String,
    pub action: String,
}

impl From<Grant> for GrantView {
    fn from(value: Grant) -> Self {
        Self {
            resource: value.resource,
            action: value.action,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminProfileDto {
    pub admin: AdminDto,
    pub role: String,
    pub is_super_admin: bool,
    pub grants: Vec<GrantView>,
    #[serde(with = "serde_time")]
    pub expires_at: DateTime<Utc>,
    pub expires_in: i64,
}

impl AdminProfileDto {
    pub fn from_parts(admin: Admin, auth: &AuthenticatedAdmin) -> Self {
        let mut grants: Vec<_> = auth
            .role
            .grants()
            .map(|set| set.iter().cloned().map(GrantView::from).collect())
            .unwrap_or_default();
        grants.sort_by(|a: &GrantView, b: &GrantView| {
            a.resource
                .cmp(&b.resource)
                .then_with(|| a.action.cmp(&b.action))
        });
        let expires_in = auth
            .expires_at
            .signed_duration_since(Utc::now())
            .num_seconds()
            .max(0);

        Self {
            admin: admin.into(),
            role: auth.role.name().to_string(),
            is_super_admin: auth.role.grants().is_none(),
            grants,
            expires_at: auth.expires_at,
            expires_in,
        }
    }
}
