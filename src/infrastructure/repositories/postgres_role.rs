// src/infrastructure/repositories/postgres_role.rs
use super::map_sqlx;
use crate::domain::admin::Grant;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::role::{NewRoleRecord, RoleRecord, RoleRecordUpdate, RoleRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::collections::HashSet;

#[derive(Clone)]
pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RoleRow {
    id: i64,
    name: String,
    grants: Value,
    created_at: DateTime<Utc>,
}

impl TryFrom<RoleRow> for RoleRecord {
    type Error = DomainError;

    fn try_from(row: RoleRow) -> Result<Self, Self::Error> {
        let grants: HashSet<Grant> = serde_json::from_value(row.grants)
            .map_err(|err| DomainError::Persistence(format!("malformed grants column: {err}")))?;
        Ok(RoleRecord {
            id: row.id,
            name: row.name,
            grants,
            created_at: row.created_at,
        })
    }
}

fn grants_json(grants: &HashSet<Grant>) -> DomainResult<Value> {
    serde_json::to_value(grants)
        .map_err(|err| DomainError::Persistence(format!("grants serialization failed: {err}")))
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn insert(&self, new_role: NewRoleRecord) -> DomainResult<RoleRecord> {
        let grants = grants_json(&new_role.grants)?;
        let row = sqlx::query_as::<_, RoleRow>(
            "INSERT INTO roles (name, grants, created_at)
             VALUES ($1, $2, $3)
             RETURNING id, name, grants, created_at",
        )
        .bind(new_role.name)
        .bind(grants)
        .bind(new_role.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        RoleRecord::try_from(row)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<RoleRecord>> {
        let row = sqlx::query_as::<_, RoleRow>(
            "SELECT id, name, grants, created_at FROM roles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(RoleRecord::try_from).transpose()
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<RoleRecord>> {
        let row = sqlx::query_as::<_, RoleRow>(
            "SELECT id, name, grants, created_at FROM roles WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(RoleRecord::try_from).transpose()
    }

    async fn update(&self, update: RoleRecordUpdate) -> DomainResult<RoleRecord> {
        let RoleRecordUpdate { id, name, grants } = update;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE roles SET id = id");
        if let Some(name) = name {
            builder.push(", name = ");
            builder.push_bind(name);
        }
        if let Some(grants) = grants {
            builder.push(", grants = ");
            builder.push_bind(grants_json(&grants)?);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(" RETURNING id, name, grants, created_at");

        let row = builder
            .build_query_as::<RoleRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("role not found".into()))?;

        RoleRecord::try_from(row)
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("role not found".into()));
        }
        Ok(())
    }

    async fn list_page(
        &self,
        limit: u32,
        offset: u64,
        search: Option<&str>,
    ) -> DomainResult<(Vec<RoleRecord>, u64)> {
        let pattern = search.map(|s| format!("%{s}%"));

        let total = {
            let mut builder: QueryBuilder<Postgres> =
                QueryBuilder::new("SELECT COUNT(1) FROM roles");
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

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT id, name, grants, created_at FROM roles");
        if let Some(pattern) = &pattern {
            builder.push(" WHERE name ILIKE ");
            builder.push_bind(pattern);
        }
        builder.push(" ORDER BY name ASC, id ASC LIMIT ");
        builder.push_bind(i64::from(limit));
        builder.push(" OFFSET ");
        builder.push_bind(offset as i64);

        let rows = builder
            .build_query_as::<RoleRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let records = rows
            .into_iter()
            .map(RoleRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((records, total))
    }
}
