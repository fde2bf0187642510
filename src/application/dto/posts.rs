use crate::domain::post::{Post, PostCategory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostDto {
    pub id: i64,
    pub title: String,
    pub body: String,
    #[schema(value_type = String)]
    pub category: PostCategory,
    pub published: bool,
    pub author_name: String,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            body: post.body,
            category: post.category,
            published: post.published,
            author_name: post.author_name,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

pub fn post_field_map(post: &Post) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("title".into(), Value::String(post.title.clone()));
    map.insert("body".into(), Value::String(post.body.clone()));
    map.insert(
        "category".into(),
        Value::String(post.category.as_str().to_string()),
    );
    map.insert("published".into(), Value::Bool(post.published));
    map
}
