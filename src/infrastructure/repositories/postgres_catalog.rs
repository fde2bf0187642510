// src/infrastructure/repositories/postgres_catalog.rs
use super::map_sqlx;
use crate::domain::catalog::{
    CatalogEntry, CatalogEntryUpdate, CatalogKind, CatalogRepository, NewCatalogEntry,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

/// One repository for the three identically shaped reference tables. The
/// table name comes from [`CatalogKind::table`], a closed set of constants,
/// never from user input.
#[derive(Clone)]
pub struct PostgresCatalogRepository {
    pool: PgPool,
}

impl PostgresCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EntryRow {
    id: i64,
    name: String,
    city: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<EntryRow> for CatalogEntry {
    fn from(row: EntryRow) -> Self {
        CatalogEntry {
            id: row.id,
            name: row.name,
            city: row.city,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepository {
    async fn insert(&self, kind: CatalogKind, entry: NewCatalogEntry) -> DomainResult<CatalogEntry> {
        let row = sqlx::query_as::<_, EntryRow>(&format!(
            "INSERT INTO {} (name, city, created_at) VALUES ($1, $2, $3)
             RETURNING id, name, city, created_at",
            kind.table()
        ))
        .bind(entry.name)
        .bind(entry.city)
        .bind(entry.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, kind: CatalogKind, id: i64) -> DomainResult<Option<CatalogEntry>> {
        let row = sqlx::query_as::<_, EntryRow>(&format!(
            "SELECT id, name, city, created_at FROM {} WHERE id = $1",
            kind.table()
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.map(CatalogEntry::from))
    }

    async fn update(
        &self,
        kind: CatalogKind,
        update: CatalogEntryUpdate,
    ) -> DomainResult<CatalogEntry> {
        let CatalogEntryUpdate { id, name, city } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("UPDATE {} SET id = id", kind.table()));
        if let Some(name) = name {
            builder.push(", name = ");
            builder.push_bind(name);
        }
        if let Some(city) = city {
            builder.push(", city = ");
            builder.push_bind(city);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(" RETURNING id, name, city, created_at");

        let row = builder
            .build_query_as::<EntryRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound(format!("{} not found", kind.noun())))?;

        Ok(row.into())
    }

    async fn delete(&self, kind: CatalogKind, id: i64) -> DomainResult<()> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", kind.table()))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("{} not found", kind.noun())));
        }
        Ok(())
    }

    async fn list_page(
        &self,
        kind: CatalogKind,
        search: Option<&str>,
        limit: u32,
        offset: u64,
    ) -> DomainResult<(Vec<CatalogEntry>, u64)> {
        let pattern = search.map(|s| format!("%{s}%"));

        let total = {
            let mut builder: QueryBuilder<Postgres> =
                QueryBuilder::new(format!("SELECT COUNT(1) FROM {}", kind.table()));
            if let Some(pattern) = &pattern {
                builder.push(" WHERE name ILIKE ");
                builder.push_bind(pattern);
            }
            builder
                .build_query_scalar::<i64>()
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx)? as u64
        };

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT id, name, city, created_at FROM {}",
            kind.table()
        ));
        if let Some(pattern) = &pattern {
            builder.push(" WHERE name ILIKE ");
            builder.push_bind(pattern);
        }
        builder.push(" ORDER BY name ASC, id ASC LIMIT ");
        builder.push_bind(i64::from(limit));
        builder.push(" OFFSET ");
        builder.push_bind(offset as i64);

        let rows = builder
            .build_query_as::<EntryRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok((rows.into_iter().map(CatalogEntry::from).collect(), total))
    }
}
