// src/application/commands/roles.rs
use crate::application::{
    dto::{AuthenticatedAdmin, GrantView, RoleDto},
    error::{ApplicationError, ApplicationResult},
    permission::ensure_permitted,
    ports::time::Clock,
    recorder::{ActivityDraft, ActivityRecorder, RequestContext},
};
use crate::domain::admin::{Grant, Role};
use crate::domain::audit::Action;
use crate::domain::role::{NewRoleRecord, RoleRecordUpdate, RoleRepository};
use std::collections::HashSet;
use std::sync::Arc;

pub struct CreateRoleCommand {
    pub name: String,
    pub grants: Vec<GrantView>,
}

pub struct UpdateRoleCommand {
    pub role_id: i64,
    pub name: Option<String>,
    pub grants: Option<Vec<GrantView>>,
}

pub struct RoleCommandService {
    role_repo: Arc<dyn RoleRepository>,
    clock: Arc<dyn Clock>,
    recorder: ActivityRecorder,
}

fn grant_set(views: Vec<GrantView>) -> ApplicationResult<HashSet<Grant>> {
    let mut grants = HashSet::with_capacity(views.len());
    for view in views {
        if view.resource.trim().is_empty() || view.action.trim().is_empty() {
            return Err(ApplicationError::validation(
                "grant resource and action cannot be empty",
            ));
        }
        grants.insert(Grant::new(view.resource, view.action));
    }
    Ok(grants)
}

impl RoleCommandService {
    pub fn new(
        role_repo: Arc<dyn RoleRepository>,
        clock: Arc<dyn Clock>,
        recorder: ActivityRecorder,
    ) -> Self {
        Self {
            role_repo,
            clock,
            recorder,
        }
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedAdmin,
        command: CreateRoleCommand,
        context: RequestContext,
    ) -> ApplicationResult<RoleDto> {
        ensure_permitted(actor, "roles", "create")?;

        let new_role =
            NewRoleRecord::new(command.name, grant_set(command.grants)?, self.clock.now())?;

        if self.role_repo.find_by_name(&new_role.name).await?.is_some() {
            return Err(ApplicationError::conflict(format!(
                "a role named '{}' already exists",
                new_role.name
            )));
        }

        let record = self.role_repo.insert(new_role).await?;

        self.recorder.record(
            ActivityDraft::new(Action::Create, format!("created role '{}'", record.name))
                .by(actor.id)
                .on("roles", record.id)
                .with_context(context),
        );

        Ok(record.into())
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedAdmin,
        command: UpdateRoleCommand,
        context: RequestContext,
    ) -> ApplicationResult<RoleDto> {
        ensure_permitted(actor, "roles", "update")?;

        self.role_repo
            .find_by_id(command.role_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("role {}", command.role_id)))?;

        if command.name.is_none() && command.grants.is_none() {
            return Err(ApplicationError::validation(
                "at least one field must be provided",
            ));
        }
        if let Some(name) = &command.name {
            if name.trim().is_empty() {
                return Err(ApplicationError::validation("role name cannot be empty"));
            }
            if name == Role::SUPER_ADMIN {
                return Err(ApplicationError::conflict(format!(
                    "'{}' is a reserved role name",
                    Role::SUPER_ADMIN
                )));
            }
        }

        let grants = command.grants.map(grant_set).transpose()?;

        let record = self
            .role_repo
            .update(RoleRecordUpdate {
                id: command.role_id,
                name: command.name,
                grants,
            })
            .await?;

        self.recorder.record(
            ActivityDraft::new(Action::Update, format!("updated role '{}'", record.name))
                .by(actor.id)
                .on("roles", record.id)
                .with_context(context),
        );

        Ok(record.into())
    }

    pub async fn delete(
        &self,
        actor: &AuthenticatedAdmin,
        role_id: i64,
        context: RequestContext,
    ) -> ApplicationResult<()> {
        ensure_permitted(actor, "roles", "delete")?;

        let record = self
            .role_repo
            .find_by_id(role_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("role {role_id}")))?;

        self.role_repo.delete(role_id).await?;

        self.recorder.record(
            ActivityDraft::new(Action::Delete, format!("deleted role '{}'", record.name))
                .by(actor.id)
                .on("roles", record.id)
                .with_context(context),
        );

        Ok(())
    }
}
