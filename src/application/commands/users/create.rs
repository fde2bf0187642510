use super::UserCommandService;
use crate::application::{
    dto::{AuthenticatedAdmin, UserDto},
    error::{ApplicationError, ApplicationResult},
    permission::ensure_permitted,
    recorder::{ActivityDraft, RequestContext},
};
use crate::domain::audit::Action;
use crate::domain::user::{NewUser, UserStatus};

pub struct CreateUserCommand {
    pub full_name: String,
    pub email: String,
    pub status: Option<UserStatus>,
    pub city: Option<String>,
    pub organisation: Option<String>,
    pub institute: Option<String>,
}

impl UserCommandService {
    pub async fn create(
        &self,
        actor: &AuthenticatedAdmin,
        command: CreateUserCommand,
        context: RequestContext,
    ) -> ApplicationResult<UserDto> {
        ensure_permitted(actor, "users", "create")?;

        if command.full_name.trim().is_empty() {
            return Err(ApplicationError::validation("full name cannot be empty"));
        }
        if command.email.trim().is_empty() || !command.email.contains('@') {
            return Err(ApplicationError::validation("a valid email is required"));
        }

        let new_user = NewUser {
            full_name: command.full_name.trim().to_string(),
            email: command.email.trim().to_ascii_lowercase(),
            status: command.status.unwrap_or_default(),
            city: command.city,
            organisation: command.organisation,
            institute: command.institute,
            created_at: self.clock.now(),
        };

        let user = self.user_repo.insert(new_user).await?;

        self.recorder.record(
            ActivityDraft::new(
                Action::Create,
                format!("created user '{}'", user.full_name),
            )
            .by(actor.id)
            .on("users", user.id.into())
            .with_context(context),
        );

        Ok(user.into())
    }
}
