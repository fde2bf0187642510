use crate::domain::errors::DomainResult;
use crate::domain::post::entity::{NewPost, Post, PostCategory, PostUpdate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default)]
pub struct PostListFilter {
    pub search: Option<String>,
    pub category: Option<PostCategory>,
    pub published: Option<bool>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn insert(&self, new_post: NewPost) -> DomainResult<Post>;

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Post>>;

    async fn update(&self, update: PostUpdate) -> DomainResult<Post>;

    async fn delete(&self, id: i64) -> DomainResult<()>;

    async fn list_page(
        &self,
        filter: &PostListFilter,
        sort_column: &str,
        descending: bool,
        limit: u32,
        offset: u64,
    ) -> DomainResult<(Vec<Post>, u64)>;
}
