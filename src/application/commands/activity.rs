// src/application/commands/activity.rs
use crate::application::{
    dto::AuthenticatedAdmin,
    error::{ApplicationError, ApplicationResult},
    recorder::{ActivityDraft, ActivityRecorder, RequestContext},
};
use crate::domain::audit::Action;
use serde_json::{json, Value};
use std::str::FromStr;

pub struct RecordActivityCommand {
    pub action: String,
    pub description: String,
    pub module: Option<String>,
    pub metadata: Option<Value>,
}

pub struct RecordNavigationCommand {
    pub from: Option<String>,
    pub to: String,
}

/// Client-initiated activity ingestion: view/search/navigate events the
/// frontend reports about itself. Server-side commands record their own
/// entries directly; this service only accepts the client-reported kinds.
pub struct ActivityCommandService {
    recorder: ActivityRecorder,
}

impl ActivityCommandService {
    pub fn new(recorder: ActivityRecorder) -> Self {
        Self { recorder }
    }

    pub fn record(
        &self,
        actor: &AuthenticatedAdmin,
        command: RecordActivityCommand,
        context: RequestContext,
    ) -> ApplicationResult<()> {
        let action = Action::from_str(&command.action)?;
        if !matches!(action, Action::View | Action::Search | Action::Navigate) {
            return Err(ApplicationError::validation(format!(
                "action '{action}' cannot be reported by clients"
            )));
        }
        if command.description.trim().is_empty() {
            return Err(ApplicationError::validation(
                "description cannot be empty",
            ));
        }

        let mut draft = ActivityDraft::new(action, command.description)
            .by(actor.id)
            .with_context(context);
        if let Some(module) = command.module {
            draft.resource_type = Some(module);
        }
        if let Some(metadata) = command.metadata {
            draft = draft.with_metadata(metadata);
        }

        self.recorder.record(draft);
        Ok(())
    }

    pub fn record_navigation(
        &self,
        actor: &AuthenticatedAdmin,
        command: RecordNavigationCommand,
        context: RequestContext,
    ) -> ApplicationResult<()> {
        if command.to.trim().is_empty() {
            return Err(ApplicationError::validation(
                "navigation target cannot be empty",
            ));
        }

        let description = match &command.from {
            Some(from) => format!("navigated from {from} to {}", command.to),
            None => format!("navigated to {}", command.to),
        };

        self.recorder.record(
            ActivityDraft::new(Action::Navigate, description)
                .by(actor.id)
                .with_metadata(json!({ "from": command.from, "to": command.to }))
                .with_context(context),
        );
        Ok(())
    }
}
