// src/infrastructure/repositories/postgres_admin.rs
use super::map_sqlx;
use crate::domain::admin::{
    Admin, AdminId, AdminRepository, AdminUpdate, Email, NewAdmin, PasswordHash,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

#[derive(Clone)]
pub struct PostgresAdminRepository {
    pool: PgPool,
}

impl PostgresAdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AdminRow {
    id: i64,
    email: String,
    display_name: String,
    password_hash: String,
    role_name: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<AdminRow> for Admin {
    type Error = DomainError;

    fn try_from(row: AdminRow) -> Result<Self, Self::Error> {
        Ok(Admin {
            id: AdminId::new(row.id)?,
            email: Email::new(row.email)?,
            display_name: row.display_name,
            password_hash: PasswordHash::new(row.password_hash)?,
            role_name: row.role_name,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

const COLUMNS: &str = "id, email, display_name, password_hash, role_name, is_active, created_at";

#[async_trait]
impl AdminRepository for PostgresAdminRepository {
    async fn count(&self) -> DomainResult<u64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM admins")
            .fetch_one(&self.pool)
            .await
            .map(|count| count as u64)
            .map_err(map_sqlx)
    }

    async fn insert(&self, new_admin: NewAdmin) -> DomainResult<Admin> {
        let NewAdmin {
            email,
            display_name,
            password_hash,
            role_name,
            is_active,
            created_at,
        } = new_admin;

        let row = sqlx::query_as::<_, AdminRow>(
            "INSERT INTO admins (email, display_name, password_hash, role_name, is_active, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, email, display_name, password_hash, role_name, is_active, created_at",
        )
        .bind(email.as_str())
        .bind(display_name)
        .bind(password_hash.as_str())
        .bind(role_name)
        .bind(is_active)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Admin::try_from(row)
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<Admin>> {
        let row = sqlx::query_as::<_, AdminRow>(&format!(
            "SELECT {COLUMNS} FROM admins WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Admin::try_from).transpose()
    }

    async fn find_by_id(&self, id: AdminId) -> DomainResult<Option<Admin>> {
        let row = sqlx::query_as::<_, AdminRow>(&format!(
            "SELECT {COLUMNS} FROM admins WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Admin::try_from).transpose()
    }

    async fn update(&self, update: AdminUpdate) -> DomainResult<Admin> {
        let AdminUpdate {
            id,
            display_name,
            role_name,
            is_active,
            password_hash,
        } = update;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE admins SET id = id");

        if let Some(display_name) = display_name {
            builder.push(", display_name = ");
            builder.push_bind(display_name);
        }
        if let Some(role_name) = role_name {
            builder.push(", role_name = ");
            builder.push_bind(role_name);
        }
        if let Some(is_active) = is_active {
            builder.push(", is_active = ");
            builder.push_bind(is_active);
        }
        if let Some(password_hash) = password_hash {
            builder.push(", password_hash = ");
            builder.push_bind(String::from(password_hash));
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(format!(" RETURNING {COLUMNS}"));

        let row = builder
            .build_query_as::<AdminRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("admin not found".into()))?;

        Admin::try_from(row)
    }
}
