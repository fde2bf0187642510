// src/application/queries/posts.rs
use crate::application::{
    dto::{active_filter, AuthenticatedAdmin, ListParams, Page, PostDto},
    error::{ApplicationError, ApplicationResult},
    permission::ensure_permitted,
};
use crate::domain::post::{PostCategory, PostListFilter, PostRepository};
use chrono::{DateTime, Utc};
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct PostListQuery {
    pub params: ListParams,
    pub category: Option<String>,
    pub published: Option<bool>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

fn sort_column(requested: Option<&str>) -> &'static str {
    match requested {
        Some("title") => "title",
        Some("category") => "category",
        Some("author_name") => "author_name",
        _ => "created_at",
    }
}

pub struct PostQueryService {
    post_repo: Arc<dyn PostRepository>,
}

impl PostQueryService {
    pub fn new(post_repo: Arc<dyn PostRepository>) -> Self {
        Self { post_repo }
    }

    pub async fn list(
        &self,
        actor: &AuthenticatedAdmin,
        query: PostListQuery,
    ) -> ApplicationResult<Page<PostDto>> {
        ensure_permitted(actor, "posts", "read")?;

        let (page, limit) = query.params.normalized();
        let category = active_filter(query.category)
            .map(|c| PostCategory::from_str(&c))
            .transpose()?;
        let filter = PostListFilter {
            search: active_filter(query.params.search.clone()),
            category,
            published: query.published,
            created_from: query.created_from,
            created_to: query.created_to,
        };

        let (posts, total) = self
            .post_repo
            .list_page(
                &filter,
                sort_column(query.params.sort_by.as_deref()),
                query.params.sort_order.unwrap_or_default().is_descending(),
                limit,
                query.params.offset(),
            )
            .await?;

        Ok(Page::new(posts, total, page, limit).map(PostDto::from))
    }

    pub async fn get(
        &self,
        actor: &AuthenticatedAdmin,
        post_id: i64,
    ) -> ApplicationResult<PostDto> {
        ensure_permitted(actor, "posts", "read")?;

        let post = self
            .post_repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("post {post_id}")))?;

        Ok(post.into())
    }
}
