// src/infrastructure/repositories/postgres_event.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::event::{Event, EventListFilter, EventRepository, EventUpdate, NewEvent};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

#[derive(Clone)]
pub struct PostgresEventRepository {
    pool: PgPool,
}

impl PostgresEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EventRow {
    id: i64,
    title: String,
    description: String,
    venue: String,
    category: String,
    starts_at: DateTime<Utc>,
    ends_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: row.id,
            title: row.title,
            description: row.description,
            venue: row.venue,
            category: row.category,
            starts_at: row.starts_at,
            ends_at: row.ends_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const COLUMNS: &str =
    "id, title, description, venue, category, starts_at, ends_at, created_at, updated_at";

fn order_clause(sort_column: &str, descending: bool) -> String {
    let column = match sort_column {
        "title" | "venue" | "category" | "created_at" => sort_column,
        _ => "starts_at",
    };
    let direction = if descending { "DESC" } else { "ASC" };
    format!(" ORDER BY {column} {direction}, id {direction}")
}

fn apply_filter<'a>(builder: &mut QueryBuilder<'a, Postgres>, filter: &'a EventListFilter) {
    builder.push(" WHERE TRUE");

    if let Some(search) = &filter.search {
        builder.push(" AND (title ILIKE ");
        builder.push_bind(format!("%{search}%"));
        builder.push(" OR venue ILIKE ");
        builder.push_bind(format!("%{search}%"));
        builder.push(")");
    }
    if let Some(category) = &filter.category {
        builder.push(" AND category = ");
        builder.push_bind(category.as_str());
    }
    if let Some(from) = filter.starts_from {
        builder.push(" AND starts_at >= ");
        builder.push_bind(from);
    }
    if let Some(to) = filter.starts_to {
        builder.push(" AND starts_at < ");
        builder.push_bind(to);
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepository {
    async fn insert(&self, new_event: NewEvent) -> DomainResult<Event> {
        let NewEvent {
            title,
            description,
            venue,
            category,
            starts_at,
            ends_at,
            created_at,
        } = new_event;

        let row = sqlx::query_as::<_, EventRow>(&format!(
            "INSERT INTO events (title, description, venue, category, starts_at, ends_at, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
             RETURNING {COLUMNS}"
        ))
        .bind(title)
        .bind(description)
        .bind(venue)
        .bind(category)
        .bind(starts_at)
        .bind(ends_at)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.map(Event::from))
    }

    async fn update(&self, update: EventUpdate) -> DomainResult<Event> {
        let EventUpdate {
            id,
            title,
            description,
            venue,
            category,
            starts_at,
            ends_at,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE events SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(title) = title {
            builder.push(", title = ");
            builder.push_bind(title);
        }
        if let Some(description) = description {
            builder.push(", description = ");
            builder.push_bind(description);
        }
        if let Some(venue) = venue {
            builder.push(", venue = ");
            builder.push_bind(venue);
        }
        if let Some(category) = category {
            builder.push(", category = ");
            builder.push_bind(category);
        }
        if let Some(starts_at) = starts_at {
            builder.push(", starts_at = ");
            builder.push_bind(starts_at);
        }
        if let Some(ends_at) = ends_at {
            builder.push(", ends_at = ");
            builder.push_bind(ends_at);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(format!(" RETURNING {COLUMNS}"));

        let row = builder
            .build_query_as::<EventRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("event not found".into()))?;

        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("event not found".into()));
        }
        Ok(())
    }

    async fn list_page(
        &self,
        filter: &EventListFilter,
        sort_column: &str,
        descending: bool,
        limit: u32,
        offset: u64,
    ) -> DomainResult<(Vec<Event>, u64)> {
        let total = {
            let mut builder: QueryBuilder<Postgres> =
                QueryBuilder::new("SELECT COUNT(1) FROM events");
            apply_filter(&mut builder, filter);
            builder
                .build_query_scalar::<i64>()
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx)? as u64
        };

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM events"));
        apply_filter(&mut builder, filter);
        builder.push(order_clause(sort_column, descending));
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(limit));
        builder.push(" OFFSET ");
        builder.push_bind(offset as i64);

        let rows = builder
            .build_query_as::<EventRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok((rows.into_iter().map(Event::from).collect(), total))
    }
}
