// src/domain/audit/entity.rs
use crate::domain::admin::AdminId;
use crate::domain::errors::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, str::FromStr};

/// Fixed vocabulary of recordable admin actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Update,
    Delete,
    View,
    Navigate,
    Search,
    Login,
    Trash,
    Restore,
    Export,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::View => "view",
            Action::Navigate => "navigate",
            Action::Search => "search",
            Action::Login => "login",
            Action::Trash => "trash",
            Action::Restore => "restore",
            Action::Export => "export",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Action::Create),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            "view" => Ok(Action::View),
            "navigate" => Ok(Action::Navigate),
            "search" => Ok(Action::Search),
            "login" => Ok(Action::Login),
            "trash" => Ok(Action::Trash),
            "restore" => Ok(Action::Restore),
            "export" => Ok(Action::Export),
            other => Err(DomainError::Validation(format!("unknown action '{other}'"))),
        }
    }
}

/// Flat before/after field maps captured around an update. Present only for
/// update actions; the display diff is derived from it, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeSet {
    pub old_values: Map<String, Value>,
    pub new_values: Map<String, Value>,
}

/// Browser/OS/device information parsed from the User-Agent at write time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub browser_name: Option<String>,
    pub browser_version: Option<String>,
    pub os_name: Option<String>,
    pub os_version: Option<String>,
    pub category: Option<String>,
    pub is_bot: bool,
}

/// Geo-IP derived location, captured at write time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeoLocation {
    pub country: Option<String>,
    pub city: Option<String>,
}

/// One immutable audit fact. Rows are only ever inserted and read back.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    pub id: i64,
    pub actor_id: Option<AdminId>,
    pub action: Action,
    pub resource_type: Option<String>,
    pub resource_id: Option<i64>,
    pub description: String,
    pub changes: Option<ChangeSet>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub device: Option<DeviceInfo>,
    pub location: Option<GeoLocation>,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewActivityLog {
    pub actor_id: Option<AdminId>,
    pub action: Action,
    pub resource_type: Option<String>,
    pub resource_id: Option<i64>,
    pub description: String,
    pub changes: Option<ChangeSet>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub device: Option<DeviceInfo>,
    pub location: Option<GeoLocation>,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
}
