// src/infrastructure/repositories/postgres_activity_log.rs
use super::map_sqlx;
use crate::domain::admin::AdminId;
use crate::domain::audit::{
    Action, ActivityLog, ActivityLogFilter, ActivityLogRepository, ChangeSet, DeviceInfo,
    GeoLocation, NewActivityLog,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::str::FromStr;

#[derive(Clone)]
pub struct PostgresActivityLogRepository {
    pool: PgPool,
}

impl PostgresActivityLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ActivityLogRow {
    id: i64,
    actor_id: Option<i64>,
    action: String,
    resource_type: Option<String>,
    resource_id: Option<i64>,
    description: String,
    old_values: Option<Value>,
    new_values: Option<Value>,
    ip_address: Option<String>,
    user_agent: Option<String>,
    device: Option<Value>,
    location: Option<Value>,
    metadata: Option<Value>,
    created_at: DateTime<Utc>,
}

fn decode_json<T: DeserializeOwned>(value: Option<Value>, column: &str) -> DomainResult<Option<T>> {
    value
        .map(|v| {
            serde_json::from_value(v)
                .map_err(|err| DomainError::Persistence(format!("malformed {column} column: {err}")))
        })
        .transpose()
}

fn encode_json<T: Serialize>(value: &T) -> DomainResult<Value> {
    serde_json::to_value(value)
        .map_err(|err| DomainError::Persistence(format!("json serialization failed: {err}")))
}

impl TryFrom<ActivityLogRow> for ActivityLog {
    type Error = DomainError;

    fn try_from(row: ActivityLogRow) -> Result<Self, Self::Error> {
        let changes = match (row.old_values, row.new_values) {
            (Some(old), Some(new)) => {
                let old_values: Map<String, Value> = serde_json::from_value(old).map_err(|err| {
                    DomainError::Persistence(format!("malformed old_values column: {err}"))
                })?;
                let new_values: Map<String, Value> = serde_json::from_value(new).map_err(|err| {
                    DomainError::Persistence(format!("malformed new_values column: {err}"))
                })?;
                Some(ChangeSet {
                    old_values,
                    new_values,
                })
            }
            _ => None,
        };

        Ok(ActivityLog {
            id: row.id,
            actor_id: row.actor_id.map(AdminId::new).transpose()?,
            action: Action::from_str(&row.action)?,
            resource_type: row.resource_type,
            resource_id: row.resource_id,
            description: row.description,
            changes,
            ip_address: row.ip_address,
            user_agent: row.user_agent,
            device: decode_json::<DeviceInfo>(row.device, "device")?,
            location: decode_json::<GeoLocation>(row.location, "location")?,
            metadata: row.metadata,
            created_at: row.created_at,
        })
    }
}

const COLUMNS: &str = "id, actor_id, action, resource_type, resource_id, description, \
                       old_values, new_values, ip_address, user_agent, device, location, \
                       metadata, created_at";

fn apply_filter<'a>(builder: &mut QueryBuilder<'a, Postgres>, filter: &'a ActivityLogFilter) {
    builder.push(" WHERE TRUE");

    if let Some(actor_id) = filter.actor_id {
        builder.push(" AND actor_id = ");
        builder.push_bind(actor_id);
    }
    if let Some(action) = filter.action {
        builder.push(" AND action = ");
        builder.push_bind(action.as_str());
    }
    if let Some(resource_type) = &filter.resource_type {
        builder.push(" AND resource_type = ");
        builder.push_bind(resource_type.as_str());
    }
    if let Some(search) = &filter.search {
        builder.push(" AND description ILIKE ");
        builder.push_bind(format!("%{search}%"));
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
impl ActivityLogRepository for PostgresActivityLogRepository {
    async fn insert(&self, log: NewActivityLog) -> DomainResult<()> {
        let (old_values, new_values) = match &log.changes {
            Some(set) => (
                Some(Value::Object(set.old_values.clone())),
                Some(Value::Object(set.new_values.clone())),
            ),
            None => (None, None),
        };
        let device = log.device.as_ref().map(encode_json).transpose()?;
        let location = log.location.as_ref().map(encode_json).transpose()?;

        sqlx::query(
            "INSERT INTO activity_logs
                 (actor_id, action, resource_type, resource_id, description,
                  old_values, new_values, ip_address, user_agent, device, location,
                  metadata, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(log.actor_id.map(i64::from))
        .bind(log.action.as_str())
        .bind(log.resource_type)
        .bind(log.resource_id)
        .bind(log.description)
        .bind(old_values)
        .bind(new_values)
        .bind(log.ip_address)
        .bind(log.user_agent)
        .bind(device)
        .bind(location)
        .bind(log.metadata)
        .bind(log.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(())
    }

    async fn list_page(
        &self,
        filter: &ActivityLogFilter,
        limit: u32,
        offset: u64,
    ) -> DomainResult<(Vec<ActivityLog>, u64)> {
        let total = {
            let mut builder: QueryBuilder<Postgres> =
                QueryBuilder::new("SELECT COUNT(1) FROM activity_logs");
            apply_filter(&mut builder, filter);
            builder
                .build_query_scalar::<i64>()
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx)? as u64
        };

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM activity_logs"));
        apply_filter(&mut builder, filter);
        builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        builder.push_bind(i64::from(limit));
        builder.push(" OFFSET ");
        builder.push_bind(offset as i64);

        let rows = builder
            .build_query_as::<ActivityLogRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let logs = rows
            .into_iter()
            .map(ActivityLog::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((logs, total))
    }
}
