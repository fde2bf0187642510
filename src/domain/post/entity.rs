// src/domain/post/entity.rs
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PostCategory {
    News,
    Announcement,
    Article,
}

impl PostCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostCategory::News => "news",
            PostCategory::Announcement => "announcement",
            PostCategory::Article => "article",
        }
    }
}

impl fmt::Display for PostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "news" => Ok(PostCategory::News),
            "announcement" => Ok(PostCategory::Announcement),
            "article" => Ok(PostCategory::Article),
            other => Err(DomainError::Validation(format!(
                "unknown post category '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub category: PostCategory,
    pub published: bool,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub category: PostCategory,
    pub published: bool,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    pub fn validate(&self) -> DomainResult<()> {
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation("post title cannot be empty".into()));
        }
        if self.author_name.trim().is_empty() {
            return Err(DomainError::Validation(
                "post author name cannot be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub id: i64,
    pub title: Option<String>,
    pub body: Option<String>,
    pub category: Option<PostCategory>,
    pub published: Option<bool>,
    pub updated_at: DateTime<Utc>,
}
