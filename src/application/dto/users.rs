use crate::domain::user::{User, UserStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    #[schema(value_type = String)]
    pub status: UserStatus,
    pub city: Option<String>,
    pub organisation: Option<String>,
    pub institute: Option<String>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into(),
            full_name: user.full_name,
            email: user.email,
            status: user.status,
            city: user.city,
            organisation: user.organisation,
            institute: user.institute,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// A trashed user as shown in the deleted listing, with the countdown to
/// permanent deletion.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletedUserDto {
    #[serde(flatten)]
    pub user: UserDto,
    #[serde(with = "serde_time")]
    pub deleted_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub purge_after: DateTime<Utc>,
    pub days_remaining: i64,
}

impl DeletedUserDto {
    pub fn from_user(user: User, now: DateTime<Utc>) -> Self {
        let deleted_at = user.deleted_at.unwrap_or(now);
        let purge_after = user.purge_after.unwrap_or(now);
        let days_remaining = user.days_until_purge(now).unwrap_or(0);
        Self {
            user: user.into(),
            deleted_at,
            purge_after,
            days_remaining,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct UserStatsDto {
    pub active: u64,
    pub trashed: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserCleanupStatsDto {
    pub trashed: u64,
    pub due_for_purge: u64,
    #[serde(default, with = "serde_time::option")]
    pub next_purge_at: Option<DateTime<Utc>>,
    pub retention_days: i64,
}

/// Flat field map used as the before/after snapshot for change tracking.
pub fn user_field_map(user: &User) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("full_name".into(), Value::String(user.full_name.clone()));
    map.insert("email".into(), Value::String(user.email.clone()));
    map.insert(
        "status".into(),
        Value::String(user.status.as_str().to_string()),
    );
    map.insert("city".into(), opt_string(&user.city));
    map.insert("organisation".into(), opt_string(&user.organisation));
    map.insert("institute".into(), opt_string(&user.institute));
    map
}

fn opt_string(value: &Option<String>) -> Value {
    value
        .as_ref()
        .map(|v| Value::String(v.clone()))
        .unwrap_or(Value::Null)
}
