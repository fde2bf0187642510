// src/domain/user/entity.rs
use crate::domain::user::value_objects::{UserId, UserStatus};
use chrono::{DateTime, Duration, Utc};

/// Days a trashed user is retained before it becomes due for permanent
/// deletion.
pub const TRASH_RETENTION_DAYS: i64 = 30;

/// An end-user account managed through the back office.
///
/// Lifecycle: active -> trashed -> (restored -> active | permanently
/// deleted). A trashed user keeps its row but carries `deleted_at` and a
/// `purge_after` horizon; it is excluded from normal listings.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub status: UserStatus,
    pub city: Option<String>,
    pub organisation: Option<String>,
    pub institute: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub purge_after: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_trashed(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Whole days until the purge horizon, clamped at zero. `None` for users
    /// that are not trashed.
    pub fn days_until_purge(&self, now: DateTime<Utc>) -> Option<i64> {
        self.purge_after
            .map(|horizon| horizon.signed_duration_since(now).num_days().max(0))
    }
}

/// Purge horizon for a user trashed at `deleted_at`.
pub fn purge_horizon(deleted_at: DateTime<Utc>) -> DateTime<Utc> {
    deleted_at + Duration::days(TRASH_RETENTION_DAYS)
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub status: UserStatus,
    pub city: Option<String>,
    pub organisation: Option<String>,
    pub institute: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub id: UserId,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub status: Option<UserStatus>,
    pub city: Option<Option<String>>,
    pub organisation: Option<Option<String>>,
    pub institute: Option<Option<String>>,
    pub updated_at: DateTime<Utc>,
}

impl UserUpdate {
    pub fn new(id: UserId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            full_name: None,
            email: None,
            status: None,
            city: None,
            organisation: None,
            institute: None,
            updated_at,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.status.is_none()
            && self.city.is_none()
            && self.organisation.is_none()
            && self.institute.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_user(deleted_at: Option<DateTime<Utc>>) -> User {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        User {
            id: UserId::new(1).unwrap(),
            full_name: "Sample User".into(),
            email: "sample@example.com".into(),
            status: UserStatus::Active,
            city: None,
            organisation: None,
            institute: None,
            deleted_at,
            purge_after: deleted_at.map(purge_horizon),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn purge_horizon_is_retention_days_later() {
        let deleted = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(
            purge_horizon(deleted),
            Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn days_until_purge_counts_down_and_clamps_at_zero() {
        let deleted = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let user = sample_user(Some(deleted));

        let ten_days_in = Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap();
        assert_eq!(user.days_until_purge(ten_days_in), Some(20));

        let long_after = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(user.days_until_purge(long_after), Some(0));
    }

    #[test]
    fn active_user_has_no_purge_countdown() {
        let user = sample_user(None);
        assert!(!user.is_trashed());
        assert_eq!(user.days_until_purge(Utc::now()), None);
    }
}
