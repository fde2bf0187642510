use crate::domain::catalog::CatalogEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogEntryDto {
    pub id: i64,
    pub name: String,
    pub city: Option<String>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<CatalogEntry> for CatalogEntryDto {
    fn from(entry: CatalogEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            city: entry.city,
            created_at: entry.created_at,
        }
    }
}

pub fn catalog_field_map(entry: &CatalogEntry) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("name".into(), Value::String(entry.name.clone()));
    map.insert(
        "city".into(),
        entry
            .city
            .as_ref()
            .map(|c| Value::String(c.clone()))
            .unwrap_or(Value::Null),
    );
    map
}
