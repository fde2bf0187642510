// src/application/commands/events.rs
use crate::application::{
    dto::{events::event_field_map, AuthenticatedAdmin, EventDto},
    error::{ApplicationError, ApplicationResult},
    permission::ensure_permitted,
    ports::time::Clock,
    recorder::{ActivityDraft, ActivityRecorder, RequestContext},
};
use crate::domain::audit::{Action, ChangeSet};
use crate::domain::event::{EventRepository, EventUpdate, NewEvent};
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct CreateEventCommand {
    pub title: String,
    pub description: String,
    pub venue: String,
    pub category: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
}

pub struct UpdateEventCommand {
    pub event_id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub category: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<Option<DateTime<Utc>>>,
}

pub struct EventCommandService {
    event_repo: Arc<dyn EventRepository>,
    clock: Arc<dyn Clock>,
    recorder: ActivityRecorder,
}

impl EventCommandService {
    pub fn new(
        event_repo: Arc<dyn EventRepository>,
        clock: Arc<dyn Clock>,
        recorder: ActivityRecorder,
    ) -> Self {
        Self {
            event_repo,
            clock,
            recorder,
        }
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedAdmin,
        command: CreateEventCommand,
        context: RequestContext,
    ) -> ApplicationResult<EventDto> {
        ensure_permitted(actor, "events", "create")?;

        let new_event = NewEvent {
            title: command.title,
            description: command.description,
            venue: command.venue,
            category: command.category,
            starts_at: command.starts_at,
            ends_at: command.ends_at,
            created_at: self.clock.now(),
        };
        new_event.validate()?;

        let event = self.event_repo.insert(new_event).await?;

        self.recorder.record(
            ActivityDraft::new(Action::Create, format!("created event '{}'", event.title))
                .by(actor.id)
                .on("events", event.id)
                .with_context(context),
        );

        Ok(event.into())
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedAdmin,
        command: UpdateEventCommand,
        context: RequestContext,
    ) -> ApplicationResult<EventDto> {
        ensure_permitted(actor, "events", "update")?;

        let before = self
            .event_repo
            .find_by_id(command.event_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("event {}", command.event_id)))?;

        if command.title.is_none()
            && command.description.is_none()
            && command.venue.is_none()
            && command.category.is_none()
            && command.starts_at.is_none()
            && command.ends_at.is_none()
        {
            return Err(ApplicationError::validation(
                "at least one field must be provided",
            ));
        }

        // The end must not precede the start after the update is applied.
        let starts_at = command.starts_at.unwrap_or(before.starts_at);
        let ends_at = command.ends_at.unwrap_or(before.ends_at);
        if let Some(ends_at) = ends_at {
            if ends_at < starts_at {
                return Err(ApplicationError::validation(
                    "event cannot end before it starts",
                ));
            }
        }

        let after = self
            .event_repo
            .update(EventUpdate {
                id: command.event_id,
                title: command.title,
                description: command.description,
                venue: command.venue,
                category: command.category,
                starts_at: command.starts_at,
                ends_at: command.ends_at,
                updated_at: self.clock.now(),
            })
            .await?;

        self.recorder.record(
            ActivityDraft::new(Action::Update, format!("updated event '{}'", after.title))
                .by(actor.id)
                .on("events", after.id)
                .with_changes(ChangeSet {
                    old_values: event_field_map(&before),
                    new_values: event_field_map(&after),
                })
                .with_context(context),
        );

        Ok(after.into())
    }

    pub async fn delete(
        &self,
        actor: &AuthenticatedAdmin,
        event_id: i64,
        context: RequestContext,
    ) -> ApplicationResult<()> {
        ensure_permitted(actor, "events", "delete")?;

        let event = self
            .event_repo
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("event {event_id}")))?;

        self.event_repo.delete(event_id).await?;

        self.recorder.record(
            ActivityDraft::new(Action::Delete, format!("deleted event '{}'", event.title))
                .by(actor.id)
                .on("events", event.id)
                .with_context(context),
        );

        Ok(())
    }
}
