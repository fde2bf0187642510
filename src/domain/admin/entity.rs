// src/domain/admin/entity.rs
use crate::domain::admin::value_objects::{AdminId, Email, PasswordHash};
use chrono::{DateTime, Utc};

/// A back-office operator, distinct from the end-user accounts it manages.
///
/// `role_name` is the stored reference; it is resolved into a
/// [`crate::domain::admin::Role`] once at authentication time.
#[derive(Debug, Clone)]
pub struct Admin {
    pub id: AdminId,
    pub email: Email,
    pub display_name: String,
    pub password_hash: PasswordHash,
    pub role_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub email: Email,
    pub display_name: String,
    pub password_hash: PasswordHash,
    pub role_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct AdminUpdate {
    pub id: AdminId,
    pub display_name: Option<String>,
    pub role_name: Option<String>,
    pub is_active: Option<bool>,
    pub password_hash: Option<PasswordHash>,
}

impl AdminUpdate {
    pub fn new(id: AdminId) -> Self {
        Self {
            id,
            display_name: None,
            role_name: None,
            is_active: None,
            password_hash: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_role_name(mut self, role_name: impl Into<String>) -> Self {
        self.role_name = Some(role_name.into());
        self
    }

    pub fn with_is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn with_password_hash(mut self, password_hash: PasswordHash) -> Self {
        self.password_hash = Some(password_hash);
        self
    }
}
