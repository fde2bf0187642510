use super::UserCommandService;
use crate::application::{
    dto::{users::user_field_map, AuthenticatedAdmin, UserDto},
    error::{ApplicationError, ApplicationResult},
    permission::ensure_permitted,
    recorder::{ActivityDraft, RequestContext},
};
use crate::domain::audit::{Action, ChangeSet};
use crate::domain::user::{UserId, UserStatus, UserUpdate};

pub struct UpdateUserCommand {
    pub user_id: i64,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub status: Option<UserStatus>,
    pub city: Option<Option<String>>,
    pub organisation: Option<Option<String>>,
    pub institute: Option<Option<String>>,
}

impl UserCommandService {
    /// Apply a partial update, capturing flat before/after snapshots so the
    /// activity log can render a field-level diff.
    pub async fn update(
        &self,
        actor: &AuthenticatedAdmin,
        command: UpdateUserCommand,
        context: RequestContext,
    ) -> ApplicationResult<UserDto> {
        ensure_permitted(actor, "users", "update")?;

        let user_id = UserId::new(command.user_id)?;

        let before = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("user {}", command.user_id)))?;

        let mut update = UserUpdate::new(user_id, self.clock.now());
        update.full_name = command.full_name;
        update.email = command.email;
        update.status = command.status;
        update.city = command.city;
        update.organisation = command.organisation;
        update.institute = command.institute;

        if update.is_empty() {
            return Err(ApplicationError::validation(
                "at least one field must be provided",
            ));
        }

        let after = self.user_repo.update(update).await?;

        self.recorder.record(
            ActivityDraft::new(
                Action::Update,
                format!("updated user '{}'", after.full_name),
            )
            .by(actor.id)
            .on("users", after.id.into())
            .with_changes(ChangeSet {
                old_values: user_field_map(&before),
                new_values: user_field_map(&after),
            })
            .with_context(context),
        );

        Ok(after.into())
    }
}
