use crate::domain::audit::{diff_changes, Action, ActivityLog, DeviceInfo, GeoLocation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FieldChangeDto {
    pub field: String,
    pub old_value: Value,
    pub new_value: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityLogDto {
    pub id: i64,
    pub actor_id: Option<i64>,
    #[schema(value_type = String)]
    pub action: Action,
    pub resource_type: Option<String>,
    pub resource_id: Option<i64>,
    pub description: String,
    /// Derived field-level diff; `None` when no before/after pair was
    /// captured, in which case clients fall back to an overview rendering.
    pub changes: Option<Vec<FieldChangeDto>>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    #[schema(value_type = Object)]
    pub device: Option<DeviceInfo>,
    #[schema(value_type = Object)]
    pub location: Option<GeoLocation>,
    pub metadata: Option<Value>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<ActivityLog> for ActivityLogDto {
    fn from(log: ActivityLog) -> Self {
        let changes = log.changes.as_ref().map(|set| {
            diff_changes(&set.old_values, &set.new_values)
                .into_iter()
                .map(|change| FieldChangeDto {
                    field: change.field,
                    old_value: change.old_value,
                    new_value: change.new_value,
                })
                .collect()
        });

        Self {
            id: log.id,
            actor_id: log.actor_id.map(Into::into),
            action: log.action,
            resource_type: log.resource_type,
            resource_id: log.resource_id,
            description: log.description,
            changes,
            ip_address: log.ip_address,
            user_agent: log.user_agent,
            device: log.device,
            location: log.location,
            metadata: log.metadata,
            created_at: log.created_at,
        }
    }
}
