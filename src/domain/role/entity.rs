// src/domain/role/entity.rs
use crate::domain::admin::{Grant, Role};
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// A stored named role. The super role is never stored; it is a distinguished
/// role name resolved directly to [`Role::SuperAdmin`].
#[derive(Debug, Clone)]
pub struct RoleRecord {
    pub id: i64,
    pub name: String,
    pub grants: HashSet<Grant>,
    pub created_at: DateTime<Utc>,
}

impl RoleRecord {
    pub fn to_role(&self) -> Role {
        Role::named(self.name.clone(), self.grants.clone())
    }
}

#[derive(Debug, Clone)]
pub struct NewRoleRecord {
    pub name: String,
    pub grants: HashSet<Grant>,
    pub created_at: DateTime<Utc>,
}

impl NewRoleRecord {
    pub fn new(
        name: impl Into<String>,
        grants: HashSet<Grant>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::Validation("role name cannot be empty".into()));
        }
        if name == Role::SUPER_ADMIN {
            return Err(DomainError::Conflict(format!(
                "'{}' is a reserved role name",
                Role::SUPER_ADMIN
            )));
        }
        Ok(Self {
            name,
            grants,
            created_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RoleRecordUpdate {
    pub id: i64,
    pub name: Option<String>,
    pub grants: Option<HashSet<Grant>>,
}
