// src/domain/catalog/entity.rs
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use std::fmt;

/// The three reference directories share one shape: a named entry with an
/// optional city. One entity and one repository serve all of them, keyed by
/// kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    City,
    Organisation,
    Institute,
}

impl CatalogKind {
    /// Permission resource and route segment for this kind.
    pub fn resource(&self) -> &'static str {
        match self {
            CatalogKind::City => "cities",
            CatalogKind::Organisation => "organisations",
            CatalogKind::Institute => "institutes",
        }
    }

    /// Backing table; every table has the same columns.
    pub fn table(&self) -> &'static str {
        match self {
            CatalogKind::City => "cities",
            CatalogKind::Organisation => "organisations",
            CatalogKind::Institute => "institutes",
        }
    }

    /// Singular noun for descriptions and error messages.
    pub fn noun(&self) -> &'static str {
        match self {
            CatalogKind::City => "city",
            CatalogKind::Organisation => "organisation",
            CatalogKind::Institute => "institute",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub id: i64,
    pub name: String,
    pub city: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCatalogEntry {
    pub name: String,
    pub city: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewCatalogEntry {
    pub fn new(
        name: impl Into<String>,
        city: Option<String>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::Validation("name cannot be empty".into()));
        }
        Ok(Self {
            name,
            city,
            created_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CatalogEntryUpdate {
    pub id: i64,
    pub name: Option<String>,
    pub city: Option<Option<String>>,
}
