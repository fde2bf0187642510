// src/infrastructure/repositories/postgres_post.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::post::{NewPost, Post, PostCategory, PostListFilter, PostRepository, PostUpdate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::str::FromStr;

#[derive(Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PostRow {
    id: i64,
    title: String,
    body: String,
    category: String,
    published: bool,
    author_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = DomainError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        Ok(Post {
            id: row.id,
            title: row.title,
            body: row.body,
            category: PostCategory::from_str(&row.category)?,
            published: row.published,
            author_name: row.author_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const COLUMNS: &str = "id, title, body, category, published, author_name, created_at, updated_at";

fn order_clause(sort_column: &str, descending: bool) -> String {
    let column = match sort_column {
        "title" | "category" | "author_name" => sort_column,
        _ => "created_at",
    };
    let direction = if descending { "DESC" } else { "ASC" };
    format!(" ORDER BY {column} {direction}, id {direction}")
}

fn apply_filter<'a>(builder: &mut QueryBuilder<'a, Postgres>, filter: &'a PostListFilter) {
    builder.push(" WHERE TRUE");

    if let Some(search) = &filter.search {
        builder.push(" AND (title ILIKE ");
        builder.push_bind(format!("%{search}%"));
        builder.push(" OR author_name ILIKE ");
        builder.push_bind(format!("%{search}%"));
        builder.push(")");
    }
    if let Some(category) = filter.category {
        builder.push(" AND category = ");
        builder.push_bind(category.as_str());
    }
    if let Some(published) = filter.published {
        builder.push(" AND published = ");
        builder.push_bind(published);
    }
    if let Some(from) = filter.created_from {
        builder.push(" AND created_at >= ");
        builder.push_bind(from);
    }
    if let Some(to) = filter.created_to {
        builder.push(" AND created_at < ");
        builder.push_bind(to);
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, new_post: NewPost) -> DomainResult<Post> {
        let NewPost {
            title,
            body,
            category,
            published,
            author_name,
            created_at,
        } = new_post;

        let row = sqlx::query_as::<_, PostRow>(&format!(
            "INSERT INTO posts (title, body, category, published, author_name, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)
             RETURNING {COLUMNS}"
        ))
        .bind(title)
        .bind(body)
        .bind(category.as_str())
        .bind(published)
        .bind(author_name)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Post::try_from(row)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Post::try_from).transpose()
    }

    async fn update(&self, update: PostUpdate) -> DomainResult<Post> {
        let PostUpdate {
            id,
            title,
            body,
            category,
            published,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE posts SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(title) = title {
            builder.push(", title = ");
            builder.push_bind(title);
        }
        if let Some(body) = body {
            builder.push(", body = ");
            builder.push_bind(body);
        }
        if let Some(category) = category {
            builder.push(", category = ");
            builder.push_bind(category.as_str());
        }
        if let Some(published) = published {
            builder.push(", published = ");
            builder.push_bind(published);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(format!(" RETURNING {COLUMNS}"));

        let row = builder
            .build_query_as::<PostRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("post not found".into()))?;

        Post::try_from(row)
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("post not found".into()));
        }
        Ok(())
    }

    async fn list_page(
        &self,
        filter: &PostListFilter,
        sort_column: &str,
        descending: bool,
        limit: u32,
        offset: u64,
    ) -> DomainResult<(Vec<Post>, u64)> {
        let total = {
            let mut builder: QueryBuilder<Postgres> =
                QueryBuilder::new("SELECT COUNT(1) FROM posts");
            apply_filter(&mut builder, filter);
            builder
                .build_query_scalar::<i64>()
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx)? as u64
        };

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM posts"));
        apply_filter(&mut builder, filter);
        builder.push(order_clause(sort_column, descending));
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(limit));
        builder.push(" OFFSET ");
        builder.push_bind(offset as i64);

        let rows = builder
            .build_query_as::<PostRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let posts = rows
            .into_iter()
            .map(Post::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((posts, total))
    }
}
