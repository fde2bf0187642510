use super::UserCommandService;
use crate::application::{
    dto::{AuthenticatedAdmin, DeletedUserDto, UserDto},
    error::{ApplicationError, ApplicationResult},
    permission::ensure_permitted,
    recorder::{ActivityDraft, RequestContext},
};
use crate::domain::audit::Action;
use crate::domain::user::entity::purge_horizon;
use crate::domain::user::UserId;

impl UserCommandService {
    /// Move a user to the trash: sets the deletion marker and schedules the
    /// permanent-deletion horizon. The row survives but leaves the active
    /// listing.
    pub async fn trash(
        &self,
        actor: &AuthenticatedAdmin,
        user_id: i64,
        context: RequestContext,
    ) -> ApplicationResult<DeletedUserDto> {
        ensure_permitted(actor, "users", "delete")?;

        let user_id = UserId::new(user_id)?;
        let now = self.clock.now();

        let existing = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("user {}", i64::from(user_id))))?;
        if existing.is_trashed() {
            return Err(ApplicationError::conflict("user is already in the trash"));
        }

        let user = self
            .user_repo
            .mark_trashed(user_id, now, purge_horizon(now))
            .await?;

        self.recorder.record(
            ActivityDraft::new(Action::Trash, format!("moved user '{}' to trash", user.full_name))
                .by(actor.id)
                .on("users", user.id.into())
                .with_context(context),
        );

        Ok(DeletedUserDto::from_user(user, now))
    }

    /// Clear the trash marker, returning the user to the active listing.
    pub async fn restore(
        &self,
        actor: &AuthenticatedAdmin,
        user_id: i64,
        context: RequestContext,
    ) -> ApplicationResult<UserDto> {
        ensure_permitted(actor, "users", "delete")?;

        let user_id = UserId::new(user_id)?;

        let existing = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("user {}", i64::from(user_id))))?;
        if !existing.is_trashed() {
            return Err(ApplicationError::conflict("user is not in the trash"));
        }

        let user = self.user_repo.clear_trashed(user_id).await?;

        self.recorder.record(
            ActivityDraft::new(
                Action::Restore,
                format!("restored user '{}' from trash", user.full_name),
            )
            .by(actor.id)
            .on("users", user.id.into())
            .with_context(context),
        );

        Ok(user.into())
    }

    /// Remove the row unconditionally. Works on active and trashed users
    /// alike, and cannot be undone.
    pub async fn purge(
        &self,
        actor: &AuthenticatedAdmin,
        user_id: i64,
        context: RequestContext,
    ) -> ApplicationResult<()> {
        ensure_permitted(actor, "users", "delete")?;

        let user_id = UserId::new(user_id)?;

        let existing = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("user {}", i64::from(user_id))))?;

        self.user_repo.delete(user_id).await?;

        self.recorder.record(
            ActivityDraft::new(
                Action::Delete,
                format!("permanently deleted user '{}'", existing.full_name),
            )
            .by(actor.id)
            .on("users", existing.id.into())
            .with_context(context),
        );

        Ok(())
    }
}
