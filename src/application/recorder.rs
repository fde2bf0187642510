// src/application/recorder.rs
use crate::application::ports::{
    enrichment::{GeoIpResolver, UserAgentInspector},
    time::Clock,
};
use crate::domain::admin::AdminId;
use crate::domain::audit::{Action, ActivityLogRepository, ChangeSet, NewActivityLog};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::warn;

/// Client-side request context captured at the HTTP boundary and carried to
/// write time for enrichment.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// An activity entry as handed to the recorder, before enrichment.
#[derive(Debug, Clone)]
pub struct ActivityDraft {
    pub actor_id: Option<AdminId>,
    pub action: Action,
    pub resource_type: Option<String>,
    pub resource_id: Option<i64>,
    pub description: String,
    pub changes: Option<ChangeSet>,
    pub metadata: Option<Value>,
    pub context: RequestContext,
}

impl ActivityDraft {
    pub fn new(action: Action, description: impl Into<String>) -> Self {
        Self {
            actor_id: None,
            action,
            resource_type: None,
            resource_id: None,
            description: description.into(),
            changes: None,
            metadata: None,
            context: RequestContext::default(),
        }
    }

    pub fn by(mut self, actor_id: AdminId) -> Self {
        self.actor_id = Some(actor_id);
        self
    }

    pub fn on(mut self, resource_type: impl Into<String>, resource_id: i64) -> Self {
        self.resource_type = Some(resource_type.into());
        self.resource_id = Some(resource_id);
        self
    }

    pub fn with_changes(mut self, changes: ChangeSet) -> Self {
        self.changes = Some(changes);
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_context(mut self, context: RequestContext) -> Self {
        self.context = context;
        self
    }
}

/// Fire-and-forget activity-log writer.
///
/// Recording never blocks and never fails the primary action: drafts go
/// through an unbounded channel to a background worker that enriches them
/// (device parse, geo-IP lookup) and inserts the row, logging write failures
/// at `warn` and moving on.
#[derive(Clone)]
pub struct ActivityRecorder {
    tx: mpsc::UnboundedSender<ActivityDraft>,
}

impl ActivityRecorder {
    pub fn spawn(
        repo: Arc<dyn ActivityLogRepository>,
        user_agents: Arc<dyn UserAgentInspector>,
        geoip: Option<Arc<dyn GeoIpResolver>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<ActivityDraft>();

        tokio::spawn(async move {
            while let Some(draft) = rx.recv().await {
                let log = enrich(draft, user_agents.as_ref(), geoip.as_deref(), clock.as_ref()).await;
                if let Err(err) = repo.insert(log).await {
                    warn!(error = %err, "failed to insert activity log");
                }
            }
        });

        Self { tx }
    }

    /// Queue a draft for recording. A closed worker is logged, never
    /// surfaced: the caller's action has already succeeded.
    pub fn record(&self, draft: ActivityDraft) {
        if self.tx.send(draft).is_err() {
            warn!("activity recorder worker is gone; dropping entry");
        }
    }
}

async fn enrich(
    draft: ActivityDraft,
    user_agents: &dyn UserAgentInspector,
    geoip: Option<&dyn GeoIpResolver>,
    clock: &dyn Clock,
) -> NewActivityLog {
    let device = draft
        .context
        .user_agent
        .as_deref()
        .and_then(|ua| user_agents.inspect(ua));

    let location = match (geoip, draft.context.ip_address.as_deref()) {
        (Some(resolver), Some(ip)) => resolver.resolve(ip).await,
        _ => None,
    };

    NewActivityLog {
        actor_id: draft.actor_id,
        action: draft.action,
        resource_type: draft.resource_type,
        resource_id: draft.resource_id,
        description: draft.description,
        changes: draft.changes,
        ip_address: draft.context.ip_address,
        user_agent: draft.context.user_agent,
        device,
        location,
        metadata: draft.metadata,
        created_at: clock.now(),
    }
}
