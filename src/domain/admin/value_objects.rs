// src/domain/admin/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdminId(pub i64);

impl AdminId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("admin id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<AdminId> for i64 {
    fn from(value: AdminId) -> Self {
        value.0
    }
}

/// A single permission: the right to perform `action` on `resource`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grant {
    pub resource: String,
    pub action: String,
}

impl Grant {
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
        }
    }

    pub fn matches(&self, resource: &str, action: &str) -> bool {
        self.resource == resource && self.action == action
    }
}

impl fmt::Display for Grant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource, self.action)
    }
}

/// An admin's effective role, resolved once at authentication time.
///
/// The super role bypasses every permission check. A named role carries an
/// explicit grant set and permits only exact `(resource, action)` matches;
/// there is no hierarchy or wildcard matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Named {
        name: String,
        grants: HashSet<Grant>,
    },
}

impl Role {
    /// The distinguished role name that resolves to `Role::SuperAdmin`.
    pub const SUPER_ADMIN: &'static str = "super_admin";

    pub fn named(name: impl Into<String>, grants: HashSet<Grant>) -> Self {
        Self::Named {
            name: name.into(),
            grants,
        }
    }

    pub fn permits(&self, resource: &str, action: &str) -> bool {
        match self {
            Role::SuperAdmin => true,
            Role::Named { grants, .. } => grants.iter().any(|g| g.matches(resource, action)),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Role::SuperAdmin => Self::SUPER_ADMIN,
            Role::Named { name, .. } => name,
        }
    }

    pub fn grants(&self) -> Option<&HashSet<Grant>> {
        match self {
            Role::SuperAdmin => None,
            Role::Named { grants, .. } => Some(grants),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation("email cannot be empty".into()));
        }
        if !trimmed.contains('@') || trimmed.starts_with('@') || trimmed.ends_with('@') {
            return Err(DomainError::Validation(format!(
                "'{trimmed}' is not a valid email address"
            )));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::Validation(
                "password hash cannot be empty".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<PasswordHash> for String {
    fn from(value: PasswordHash) -> Self {
        value.0
    }
}
