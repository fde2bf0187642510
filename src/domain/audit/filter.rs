// src/domain/audit/filter.rs
use crate::domain::audit::entity::Action;
use chrono::{DateTime, Utc};

/// Filters for the activity-log listing, already normalized by the
/// application layer: `None` means "no constraint".
#[derive(Debug, Clone, Default)]
pub struct ActivityLogFilter {
    pub actor_id: Option<i64>,
    pub action: Option<Action>,
    pub resource_type: Option<String>,
    pub search: Option<String>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}
