// src/application/commands/auth.rs
use crate::application::{
    dto::{AdminDto, AuthTokenDto, TokenSubject},
    error::{ApplicationError, ApplicationResult},
    ports::{
        security::{PasswordHasher, TokenManager},
        time::Clock,
    },
    recorder::{ActivityDraft, ActivityRecorder, RequestContext},
};
use crate::domain::admin::{Admin, AdminRepository, Email, NewAdmin, PasswordHash, Role};
use crate::domain::audit::Action;
use crate::domain::role::RoleRepository;
use std::collections::HashSet;
use std::sync::Arc;

pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginResult {
    pub token: AuthTokenDto,
    pub admin: AdminDto,
}

pub struct AuthCommandService {
    admin_repo: Arc<dyn AdminRepository>,
    role_repo: Arc<dyn RoleRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_manager: Arc<dyn TokenManager>,
    clock: Arc<dyn Clock>,
    recorder: ActivityRecorder,
}

impl AuthCommandService {
    pub fn new(
        admin_repo: Arc<dyn AdminRepository>,
        role_repo: Arc<dyn RoleRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_manager: Arc<dyn TokenManager>,
        clock: Arc<dyn Clock>,
        recorder: ActivityRecorder,
    ) -> Self {
        Self {
            admin_repo,
            role_repo,
            password_hasher,
            token_manager,
            clock,
            recorder,
        }
    }

    pub async fn login(
        &self,
        command: LoginCommand,
        context: RequestContext,
    ) -> ApplicationResult<LoginResult> {
        let email = Email::new(command.email)?;
        let admin = self
            .admin_repo
            .find_by_email(&email)
            .await?
            .ok_or_else(|| ApplicationError::unauthorized("invalid credentials"))?;

        if !admin.is_active {
            return Err(ApplicationError::forbidden("account is disabled"));
        }

        self.password_hasher
            .verify(&command.password, admin.password_hash.as_str())
            .await?;

        let role = self.resolve_role(&admin).await?;

        let subject = TokenSubject {
            admin_id: admin.id,
            email: admin.email.to_string(),
            display_name: admin.display_name.clone(),
            role,
        };
        let token = self.token_manager.issue(subject).await?;

        self.recorder.record(
            ActivityDraft::new(Action::Login, format!("{} signed in", admin.email))
                .by(admin.id)
                .with_context(context),
        );

        Ok(LoginResult {
            token,
            admin: admin.into(),
        })
    }

    /// Resolve the stored role name into the role sum type. Resolution
    /// happens exactly once, here; everything downstream works with the
    /// resolved [`Role`]. A dangling role name yields an empty grant set,
    /// which denies everything.
    async fn resolve_role(&self, admin: &Admin) -> ApplicationResult<Role> {
        if admin.role_name == Role::SUPER_ADMIN {
            return Ok(Role::SuperAdmin);
        }

        let grants = match self.role_repo.find_by_name(&admin.role_name).await? {
            Some(record) => record.grants,
            None => HashSet::new(),
        };

        Ok(Role::named(admin.role_name.clone(), grants))
    }

    /// Create the initial super admin when the store is empty. Returns
    /// whether an account was created.
    pub async fn ensure_bootstrap_admin(
        &self,
        email: &str,
        password: &str,
    ) -> ApplicationResult<bool> {
        if self.admin_repo.count().await? > 0 {
            return Ok(false);
        }

        let email = Email::new(email)?;
        let hash = self.password_hasher.hash(password).await?;
        let new_admin = NewAdmin {
            display_name: email.as_str().to_string(),
            email,
            password_hash: PasswordHash::new(hash)?,
            role_name: Role::SUPER_ADMIN.to_string(),
            is_active: true,
            created_at: self.clock.now(),
        };

        self.admin_repo.insert(new_admin).await?;
        Ok(true)
    }
}
