// src/application/commands/catalog.rs
use crate::application::{
    dto::{catalog::catalog_field_map, AuthenticatedAdmin, CatalogEntryDto},
    error::{ApplicationError, ApplicationResult},
    permission::ensure_permitted,
    ports::time::Clock,
    recorder::{ActivityDraft, ActivityRecorder, RequestContext},
};
use crate::domain::audit::{Action, ChangeSet};
use crate::domain::catalog::{CatalogEntryUpdate, CatalogKind, CatalogRepository, NewCatalogEntry};
use std::sync::Arc;

pub struct CreateCatalogEntryCommand {
    pub name: String,
    pub city: Option<String>,
}

pub struct UpdateCatalogEntryCommand {
    pub entry_id: i64,
    pub name: Option<String>,
    pub city: Option<Option<String>>,
}

/// One command service covers all three reference directories; the kind is an
/// argument rather than a type so the controllers stay thin.
pub struct CatalogCommandService {
    catalog_repo: Arc<dyn CatalogRepository>,
    clock: Arc<dyn Clock>,
    recorder: ActivityRecorder,
}

impl CatalogCommandService {
    pub fn new(
        catalog_repo: Arc<dyn CatalogRepository>,
        clock: Arc<dyn Clock>,
        recorder: ActivityRecorder,
    ) -> Self {
        Self {
            catalog_repo,
            clock,
            recorder,
        }
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedAdmin,
        kind: CatalogKind,
        command: CreateCatalogEntryCommand,
        context: RequestContext,
    ) -> ApplicationResult<CatalogEntryDto> {
        ensure_permitted(actor, kind.resource(), "create")?;

        let new_entry = NewCatalogEntry::new(command.name, command.city, self.clock.now())?;
        let entry = self.catalog_repo.insert(kind, new_entry).await?;

        self.recorder.record(
            ActivityDraft::new(
                Action::Create,
                format!("created {} '{}'", kind.noun(), entry.name),
            )
            .by(actor.id)
            .on(kind.resource(), entry.id)
            .with_context(context),
        );

        Ok(entry.into())
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedAdmin,
        kind: CatalogKind,
        command: UpdateCatalogEntryCommand,
        context: RequestContext,
    ) -> ApplicationResult<CatalogEntryDto> {
        ensure_permitted(actor, kind.resource(), "update")?;

        let before = self
            .catalog_repo
            .find_by_id(kind, command.entry_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::not_found(format!("{} {}", kind.noun(), command.entry_id))
            })?;

        if command.name.is_none() && command.city.is_none() {
            return Err(ApplicationError::validation(
                "at least one field must be provided",
            ));
        }
        if let Some(name) = &command.name {
            if name.trim().is_empty() {
                return Err(ApplicationError::validation("name cannot be empty"));
            }
        }

        let after = self
            .catalog_repo
            .update(
                kind,
                CatalogEntryUpdate {
                    id: command.entry_id,
                    name: command.name,
                    city: command.city,
                },
            )
            .await?;

        self.recorder.record(
            ActivityDraft::new(
                Action::Update,
                format!("updated {} '{}'", kind.noun(), after.name),
            )
            .by(actor.id)
            .on(kind.resource(), after.id)
            .with_changes(ChangeSet {
                old_values: catalog_field_map(&before),
                new_values: catalog_field_map(&after),
            })
            .with_context(context),
        );

        Ok(after.into())
    }

    pub async fn delete(
        &self,
        actor: &AuthenticatedAdmin,
        kind: CatalogKind,
        entry_id: i64,
        context: RequestContext,
    ) -> ApplicationResult<()> {
        ensure_permitted(actor, kind.resource(), "delete")?;

        let entry = self
            .catalog_repo
            .find_by_id(kind, entry_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::not_found(format!("{} {entry_id}", kind.noun()))
            })?;

        self.catalog_repo.delete(kind, entry_id).await?;

        self.recorder.record(
            ActivityDraft::new(
                Action::Delete,
                format!("deleted {} '{}'", kind.noun(), entry.name),
            )
            .by(actor.id)
            .on(kind.resource(), entry.id)
            .with_context(context),
        );

        Ok(())
    }
}
