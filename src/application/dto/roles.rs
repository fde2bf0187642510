use crate::domain::role::RoleRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{admins::GrantView, serde_time};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoleDto {
    pub id: i64,
    pub name: String,
    pub grants: Vec<GrantView>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<RoleRecord> for RoleDto {
    fn from(record: RoleRecord) -> Self {
        let mut grants: Vec<_> = record.grants.into_iter().map(GrantView::from).collect();
        grants.sort_by(|a, b| {
            a.resource
                .cmp(&b.resource)
                .then_with(|| a.action.cmp(&b.action))
        });
        Self {
            id: record.id,
            name: record.name,
            grants,
            created_at: record.created_at,
        }
    }
}
