// src/application/queries/audit.rs
use crate::application::{
    dto::{active_filter, ActivityLogDto, AuthenticatedAdmin, ListParams, Page},
    error::ApplicationResult,
    export::{csv_export, CsvFile},
    permission::ensure_permitted,
    ports::time::Clock,
    recorder::{ActivityDraft, ActivityRecorder, RequestContext},
};
use crate::domain::audit::{Action, ActivityLogFilter, ActivityLogRepository};
use chrono::{DateTime, Utc};
use std::str::FromStr;
use std::sync::Arc;

const EXPORT_LIMIT: u32 = 10_000;

#[derive(Debug, Clone, Default)]
pub struct ActivityListQuery {
    pub params: ListParams,
    pub actor_id: Option<i64>,
    pub action: Option<String>,
    pub resource_type: Option<String>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

impl ActivityListQuery {
    fn to_filter(&self) -> ApplicationResult<ActivityLogFilter> {
        let action = active_filter(self.action.clone())
            .map(|a| Action::from_str(&a))
            .transpose()?;
        Ok(ActivityLogFilter {
            actor_id: self.actor_id,
            action,
            resource_type: active_filter(self.resource_type.clone()),
            search: active_filter(self.params.search.clone()),
            created_from: self.created_from,
            created_to: self.created_to,
        })
    }
}

pub struct ActivityQueryService {
    log_repo: Arc<dyn ActivityLogRepository>,
    clock: Arc<dyn Clock>,
    recorder: ActivityRecorder,
}

impl ActivityQueryService {
    pub fn new(
        log_repo: Arc<dyn ActivityLogRepository>,
        clock: Arc<dyn Clock>,
        recorder: ActivityRecorder,
    ) -> Self {
        Self {
            log_repo,
            clock,
            recorder,
        }
    }

    /// Newest-first listing of the audit trail.
    pub async fn list(
        &self,
        actor: &AuthenticatedAdmin,
        query: ActivityListQuery,
    ) -> ApplicationResult<Page<ActivityLogDto>> {
        ensure_permitted(actor, "activity_logs", "read")?;

        let (page, limit) = query.params.normalized();
        let filter = query.to_filter()?;

        let (logs, total) = self
            .log_repo
            .list_page(&filter, limit, query.params.offset())
            .await?;

        Ok(Page::new(logs, total, page, limit).map(ActivityLogDto::from))
    }

    pub async fn export_csv(
        &self,
        actor: &AuthenticatedAdmin,
        query: ActivityListQuery,
        context: RequestContext,
    ) -> ApplicationResult<CsvFile> {
        ensure_permitted(actor, "activity_logs", "read")?;

        let filter = query.to_filter()?;
        let (logs, _) = self.log_repo.list_page(&filter, EXPORT_LIMIT, 0).await?;

        let headers = [
            "id",
            "created_at",
            "actor_id",
            "action",
            "resource_type",
            "resource_id",
            "description",
            "ip_address",
        ];
        let rows: Vec<Vec<String>> = logs
            .iter()
            .map(|log| {
                vec![
                    log.id.to_string(),
                    log.created_at.to_rfc3339(),
                    log.actor_id
                        .map(|id| i64::from(id).to_string())
                        .unwrap_or_default(),
                    log.action.as_str().to_string(),
                    log.resource_type.clone().unwrap_or_default(),
                    log.resource_id.map(|id| id.to_string()).unwrap_or_default(),
                    log.description.clone(),
                    log.ip_address.clone().unwrap_or_default(),
                ]
            })
            .collect();

        let bytes = csv_export(&headers, &rows)?;

        self.recorder.record(
            ActivityDraft::new(
                Action::Export,
                format!("exported {} activity log entries to CSV", rows.len()),
            )
            .by(actor.id)
            .with_context(context),
        );

        let now = self.clock.now();
        Ok(CsvFile {
            filename: format!("activity-logs-{}.csv", now.format("%Y-%m-%d")),
            bytes,
        })
    }
}
