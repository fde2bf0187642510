// src/infrastructure/repositories/postgres_user.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::{
    NewUser, User, UserCleanupStats, UserId, UserListFilter, UserRepository, UserStats, UserStatus,
    UserUpdate,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::str::FromStr;

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    full_name: String,
    email: String,
    status: String,
    city: Option<String>,
    organisation: Option<String>,
    institute: Option<String>,
    deleted_at: Option<DateTime<Utc>>,
    purge_after: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::new(row.id)?,
            full_name: row.full_name,
            email: row.email,
            status: UserStatus::from_str(&row.status)?,
            city: row.city,
            organisation: row.organisation,
            institute: row.institute,
            deleted_at: row.deleted_at,
            purge_after: row.purge_after,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const COLUMNS: &str = "id, full_name, email, status, city, organisation, institute, \
                       deleted_at, purge_after, created_at, updated_at";

/// Columns the listing may sort by; anything else falls back to created_at.
fn order_clause(sort_column: &str, descending: bool) -> String {
    let column = match sort_column {
        "full_name" | "email" | "status" | "city" => sort_column,
        _ => "created_at",
    };
    let direction = if descending { "DESC" } else { "ASC" };
    // id tiebreak keeps pagination stable across rows with equal keys
    format!(" ORDER BY {column} {direction}, id {direction}")
}

fn apply_filter<'a>(builder: &mut QueryBuilder<'a, Postgres>, filter: &'a UserListFilter) {
    builder.push(" WHERE deleted_at IS NULL");

    if let Some(search) = &filter.search {
        builder.push(" AND (full_name ILIKE ");
        builder.push_bind(format!("%{search}%"));
        builder.push(" OR email ILIKE ");
        builder.push_bind(format!("%{search}%"));
        builder.push(")");
    }
    if let Some(status) = filter.status {
        builder.push(" AND status = ");
        builder.push_bind(status.as_str());
    }
    if let Some(city) = &filter.city {
        builder.push(" AND city = ");
        builder.push_bind(city.as_str());
    }
    if let Some(organisation) = &filter.organisation {
        builder.push(" AND organisation = ");
        builder.push_bind(organisation.as_str());
    }
    if let Some(institute) = &filter.institute {
        builder.push(" AND institute = ");
        builder.push_bind(institute.as_str());
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
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let NewUser {
            full_name,
            email,
            status,
            city,
            organisation,
            institute,
            created_at,
        } = new_user;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (full_name, email, status, city, organisation, institute, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
             RETURNING {COLUMNS}"
        ))
        .bind(full_name)
        .bind(email)
        .bind(status.as_str())
        .bind(city)
        .bind(organisation)
        .bind(institute)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        User::try_from(row)
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(User::try_from).transpose()
    }

    async fn update(&self, update: UserUpdate) -> DomainResult<User> {
        let UserUpdate {
            id,
            full_name,
            email,
            status,
            city,
            organisation,
            institute,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE users SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(full_name) = full_name {
            builder.push(", full_name = ");
            builder.push_bind(full_name);
        }
        if let Some(email) = email {
            builder.push(", email = ");
            builder.push_bind(email);
        }
        if let Some(status) = status {
            builder.push(", status = ");
            builder.push_bind(status.as_str());
        }
        if let Some(city) = city {
            builder.push(", city = ");
            builder.push_bind(city);
        }
        if let Some(organisation) = organisation {
            builder.push(", organisation = ");
            builder.push_bind(organisation);
        }
        if let Some(institute) = institute {
            builder.push(", institute = ");
            builder.push_bind(institute);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(format!(" RETURNING {COLUMNS}"));

        let row = builder
            .build_query_as::<UserRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("user not found".into()))?;

        User::try_from(row)
    }

    async fn mark_trashed(
        &self,
        id: UserId,
        deleted_at: DateTime<Utc>,
        purge_after: DateTime<Utc>,
    ) -> DomainResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET deleted_at = $2, purge_after = $3, updated_at = $2
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        ))
        .bind(i64::from(id))
        .bind(deleted_at)
        .bind(purge_after)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::Conflict("user is already in the trash".into()))?;

        User::try_from(row)
    }

    async fn clear_trashed(&self, id: UserId) -> DomainResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET deleted_at = NULL, purge_after = NULL
             WHERE id = $1 AND deleted_at IS NOT NULL
             RETURNING {COLUMNS}"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::Conflict("user is not in the trash".into()))?;

        User::try_from(row)
    }

    async fn delete(&self, id: UserId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("user not found".into()));
        }
        Ok(())
    }

    async fn list_page(
        &self,
        filter: &UserListFilter,
        sort_column: &str,
        descending: bool,
        limit: u32,
        offset: u64,
    ) -> DomainResult<(Vec<User>, u64)> {
        let total = {
            let mut builder: QueryBuilder<Postgres> =
                QueryBuilder::new("SELECT COUNT(1) FROM users");
            apply_filter(&mut builder, filter);
            builder
                .build_query_scalar::<i64>()
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx)? as u64
        };

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM users"));
        apply_filter(&mut builder, filter);
        builder.push(order_clause(sort_column, descending));
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(limit));
        builder.push(" OFFSET ");
        builder.push_bind(offset as i64);

        let rows = builder
            .build_query_as::<UserRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let users = rows
            .into_iter()
            .map(User::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((users, total))
    }

    async fn list_trashed_page(&self, limit: u32, offset: u64) -> DomainResult<(Vec<User>, u64)> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(1) FROM users WHERE deleted_at IS NOT NULL",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)? as u64;

        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {COLUMNS} FROM users WHERE deleted_at IS NOT NULL
             ORDER BY deleted_at DESC, id DESC LIMIT $1 OFFSET $2"
        ))
        .bind(i64::from(limit))
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let users = rows
            .into_iter()
            .map(User::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((users, total))
    }

    async fn stats(&self) -> DomainResult<UserStats> {
        let (active, trashed) = sqlx::query_as::<_, (i64, i64)>(
            "SELECT COUNT(1) FILTER (WHERE deleted_at IS NULL),
                    COUNT(1) FILTER (WHERE deleted_at IS NOT NULL)
             FROM users",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(UserStats {
            active: active as u64,
            trashed: trashed as u64,
            total: (active + trashed) as u64,
        })
    }

    async fn cleanup_stats(&self, now: DateTime<Utc>) -> DomainResult<UserCleanupStats> {
        let (trashed, due_for_purge, next_purge_at) =
            sqlx::query_as::<_, (i64, i64, Option<DateTime<Utc>>)>(
                "SELECT COUNT(1),
                        COUNT(1) FILTER (WHERE purge_after <= $1),
                        MIN(purge_after)
                 FROM users WHERE deleted_at IS NOT NULL",
            )
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(UserCleanupStats {
            trashed: trashed as u64,
            due_for_purge: due_for_purge as u64,
            next_purge_at,
        })
    }
}
