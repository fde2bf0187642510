use crate::domain::event::Event;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventDto {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub venue: String,
    pub category: String,
    #[serde(with = "serde_time")]
    pub starts_at: DateTime<Utc>,
    #[serde(default, with = "serde_time::option")]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Event> for EventDto {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            venue: event.venue,
            category: event.category,
            starts_at: event.starts_at,
            ends_at: event.ends_at,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

pub fn event_field_map(event: &Event) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("title".into(), Value::String(event.title.clone()));
    map.insert(
        "description".into(),
        Value::String(event.description.clone()),
    );
    map.insert("venue".into(), Value::String(event.venue.clone()));
    map.insert("category".into(), Value::String(event.category.clone()));
    map.insert(
        "starts_at".into(),
        Value::String(event.starts_at.to_rfc3339()),
    );
    map.insert(
        "ends_at".into(),
        event
            .ends_at
            .map(|dt| Value::String(dt.to_rfc3339()))
            .unwrap_or(Value::Null),
    );
    map
}
