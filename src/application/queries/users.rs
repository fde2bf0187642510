// src/application/queries/users.rs
use crate::application::{
    dto::{
        active_filter, AuthenticatedAdmin, DeletedUserDto, ListParams, Page, UserCleanupStatsDto,
        UserDto, UserStatsDto,
    },
    error::{ApplicationError, ApplicationResult},
    export::{csv_export, CsvFile},
    permission::ensure_permitted,
    ports::time::Clock,
    recorder::{ActivityDraft, ActivityRecorder, RequestContext},
};
use crate::domain::audit::Action;
use crate::domain::user::{
    UserId, UserListFilter, UserRepository, UserStatus, TRASH_RETENTION_DAYS,
};
use chrono::{DateTime, Utc};
use std::str::FromStr;
use std::sync::Arc;

/// Hard cap on rows in a single CSV download.
const EXPORT_LIMIT: u32 = 10_000;

#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub params: ListParams,
    pub status: Option<String>,
    pub city: Option<String>,
    pub organisation: Option<String>,
    pub institute: Option<String>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

impl UserListQuery {
    fn to_filter(&self) -> ApplicationResult<UserListFilter> {
        let status = active_filter(self.status.clone())
            .map(|s| UserStatus::from_str(&s))
            .transpose()?;
        Ok(UserListFilter {
            search: active_filter(self.params.search.clone()),
            status,
            city: active_filter(self.city.clone()),
            organisation: active_filter(self.organisation.clone()),
            institute: active_filter(self.institute.clone()),
            created_from: self.created_from,
            created_to: self.created_to,
        })
    }
}

fn sort_column(requested: Option<&str>) -> &'static str {
    match requested {
        Some("full_name") => "full_name",
        Some("email") => "email",
        Some("status") => "status",
        Some("city") => "city",
        _ => "created_at",
    }
}

pub struct UserQueryService {
    user_repo: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
    recorder: ActivityRecorder,
}

impl UserQueryService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
        recorder: ActivityRecorder,
    ) -> Self {
        Self {
            user_repo,
            clock,
            recorder,
        }
    }

    pub async fn list(
        &self,
        actor: &AuthenticatedAdmin,
        query: UserListQuery,
    ) -> ApplicationResult<Page<UserDto>> {
        ensure_permitted(actor, "users", "read")?;

        let (page, limit) = query.params.normalized();
        let filter = query.to_filter()?;
        let descending = query.params.sort_order.unwrap_or_default().is_descending();

        let (users, total) = self
            .user_repo
            .list_page(
                &filter,
                sort_column(query.params.sort_by.as_deref()),
                descending,
                limit,
                query.params.offset(),
            )
            .await?;

        Ok(Page::new(users, total, page, limit).map(UserDto::from))
    }

    pub async fn get(
        &self,
        actor: &AuthenticatedAdmin,
        user_id: i64,
    ) -> ApplicationResult<UserDto> {
        ensure_permitted(actor, "users", "read")?;

        let user = self
            .user_repo
            .find_by_id(UserId::new(user_id)?)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("user {user_id}")))?;

        Ok(user.into())
    }

    /// Trashed users, each with its countdown to permanent deletion.
    pub async fn list_deleted(
        &self,
        actor: &AuthenticatedAdmin,
        params: ListParams,
    ) -> ApplicationResult<Page<DeletedUserDto>> {
        ensure_permitted(actor, "users", "read")?;

        let (page, limit) = params.normalized();
        let (users, total) = self
            .user_repo
            .list_trashed_page(limit, params.offset())
            .await?;

        let now = self.clock.now();
        Ok(Page::new(users, total, page, limit).map(|user| DeletedUserDto::from_user(user, now)))
    }

    pub async fn stats_overview(
        &self,
        actor: &AuthenticatedAdmin,
    ) -> ApplicationResult<UserStatsDto> {
        ensure_permitted(actor, "users", "read")?;

        let stats = self.user_repo.stats().await?;
        Ok(UserStatsDto {
            active: stats.active,
            trashed: stats.trashed,
            total: stats.total,
        })
    }

    pub async fn cleanup_stats(
        &self,
        actor: &AuthenticatedAdmin,
    ) -> ApplicationResult<UserCleanupStatsDto> {
        ensure_permitted(actor, "users", "read")?;

        let stats = self.user_repo.cleanup_stats(self.clock.now()).await?;
        Ok(UserCleanupStatsDto {
            trashed: stats.trashed,
            due_for_purge: stats.due_for_purge,
            next_purge_at: stats.next_purge_at,
            retention_days: TRASH_RETENTION_DAYS,
        })
    }

    /// Render the filtered active-user listing as a CSV download. The export
    /// itself is a tracked action.
    pub async fn export_csv(
        &self,
        actor: &AuthenticatedAdmin,
        query: UserListQuery,
        context: RequestContext,
    ) -> ApplicationResult<CsvFile> {
        ensure_permitted(actor, "users", "read")?;

        let filter = query.to_filter()?;
        let (users, _) = self
            .user_repo
            .list_page(
                &filter,
                sort_column(query.params.sort_by.as_deref()),
                query.params.sort_order.unwrap_or_default().is_descending(),
                EXPORT_LIMIT,
                0,
            )
            .await?;

        let headers = [
            "id",
            "full_name",
            "email",
            "status",
            "city",
            "organisation",
            "institute",
            "created_at",
        ];
        let rows: Vec<Vec<String>> = users
            .iter()
            .map(|user| {
                vec![
                    i64::from(user.id).to_string(),
                    user.full_name.clone(),
                    user.email.clone(),
                    user.status.as_str().to_string(),
                    user.city.clone().unwrap_or_default(),
                    user.organisation.clone().unwrap_or_default(),
                    user.institute.clone().unwrap_or_default(),
                    user.created_at.to_rfc3339(),
                ]
            })
            .collect();

        let bytes = csv_export(&headers, &rows)?;

        self.recorder.record(
            ActivityDraft::new(
                Action::Export,
                format!("exported {} users to CSV", rows.len()),
            )
            .by(actor.id)
            .with_context(context),
        );

        let now = self.clock.now();
        Ok(CsvFile {
            filename: format!("users-{}.csv", now.format("%Y-%m-%d")),
            bytes,
        })
    }
}
