// tests/activity_log_tests.rs
mod support;

use backoffice_core::application::commands::activity::{
    ActivityCommandService, RecordActivityCommand, RecordNavigationCommand,
};
use backoffice_core::application::dto::ListParams;
use backoffice_core::application::queries::audit::{ActivityListQuery, ActivityQueryService};
use backoffice_core::application::recorder::{ActivityRecorder, RequestContext};
use backoffice_core::application::ApplicationError;
use backoffice_core::domain::audit::{Action, NewActivityLog};
use chrono::Duration;
use std::sync::Arc;
use support::{
    fixed_now, super_admin, FixedClock, InMemoryActivityLogRepo, NullUserAgentInspector,
};

struct Fixture {
    logs: Arc<InMemoryActivityLogRepo>,
    commands: ActivityCommandService,
    queries: ActivityQueryService,
}

fn fixture() -> Fixture {
    let logs = Arc::new(InMemoryActivityLogRepo::new());
    let clock = Arc::new(FixedClock(fixed_now()));
    let recorder = ActivityRecorder::spawn(
        logs.clone(),
        Arc::new(NullUserAgentInspector),
        None,
        clock.clone(),
    );
    Fixture {
        logs: logs.clone(),
        commands: ActivityCommandService::new(recorder.clone()),
        queries: ActivityQueryService::new(logs, clock, recorder),
    }
}

fn seed_entry(action: Action, description: &str, minutes_ago: i64) -> NewActivityLog {
    NewActivityLog {
        actor_id: None,
        action,
        resource_type: Some("users".into()),
        resource_id: None,
        description: description.into(),
        changes: None,
        ip_address: None,
        user_agent: None,
        device: None,
        location: None,
        metadata: None,
        created_at: fixed_now() - Duration::minutes(minutes_ago),
    }
}

#[tokio::test]
async fn clients_may_report_only_view_search_and_navigate() {
    let fx = fixture();
    let actor = super_admin();

    fx.commands
        .record(
            &actor,
            RecordActivityCommand {
                action: "view".into(),
                description: "opened the user list".into(),
                module: Some("users".into()),
                metadata: None,
            },
            RequestContext::default(),
        )
        .unwrap();

    let err = fx
        .commands
        .record(
            &actor,
            RecordActivityCommand {
                action: "delete".into(),
                description: "tried to spoof a deletion".into(),
                module: None,
                metadata: None,
            },
            RequestContext::default(),
        )
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Validation(_)));

    let entries = fx.logs.wait_for_entries(1).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, Action::View);
    assert_eq!(entries[0].resource_type.as_deref(), Some("users"));
}

#[tokio::test]
async fn navigation_entries_carry_from_and_to_metadata() {
    let fx = fixture();
    let actor = super_admin();

    fx.commands
        .record_navigation(
            &actor,
            RecordNavigationCommand {
                from: Some("/users".into()),
                to: "/users/42".into(),
            },
            RequestContext::default(),
        )
        .unwrap();

    let entries = fx.logs.wait_for_entries(1).await;
    assert_eq!(entries[0].action, Action::Navigate);
    let metadata = entries[0].metadata.as_ref().expect("metadata recorded");
    assert_eq!(metadata["from"], "/users");
    assert_eq!(metadata["to"], "/users/42");
}

#[tokio::test]
async fn empty_and_all_action_filters_mean_no_constraint() {
    let fx = fixture();
    let actor = super_admin();

    use backoffice_core::domain::audit::ActivityLogRepository;
    fx.logs
        .insert(seed_entry(Action::Create, "created user 'A'", 3))
        .await
        .unwrap();
    fx.logs
        .insert(seed_entry(Action::Update, "updated user 'A'", 2))
        .await
        .unwrap();
    fx.logs
        .insert(seed_entry(Action::Trash, "moved user 'A' to trash", 1))
        .await
        .unwrap();

    for action in [None, Some(String::new()), Some("all".into()), Some("ALL".into())] {
        let page = fx
            .queries
            .list(
                &actor,
                ActivityListQuery {
                    action,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(page.total, 3);
    }

    let page = fx
        .queries
        .list(
            &actor,
            ActivityListQuery {
                action: Some("update".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].description, "updated user 'A'");
}

#[tokio::test]
async fn listing_is_newest_first_and_paginated() {
    let fx = fixture();
    let actor = super_admin();

    use backoffice_core::domain::audit::ActivityLogRepository;
    for i in 0..5 {
        fx.logs
            .insert(seed_entry(Action::View, &format!("entry {i}"), 10 - i))
            .await
            .unwrap();
    }

    let page = fx
        .queries
        .list(
            &actor,
            ActivityListQuery {
                params: ListParams {
                    page: 1,
                    limit: 2,
                    ..Default::default()
                },
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(page.total, 5);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 2);
    // smallest minutes_ago was written last, so it leads
    assert_eq!(page.items[0].description, "entry 4");
    assert_eq!(page.items[1].description, "entry 3");
}

#[tokio::test]
async fn export_produces_bom_prefixed_csv_and_records_itself() {
    let fx = fixture();
    let actor = super_admin();

    use backoffice_core::domain::audit::ActivityLogRepository;
    fx.logs
        .insert(seed_entry(Action::Login, "root signed in", 5))
        .await
        .unwrap();

    let file = fx
        .queries
        .export_csv(&actor, ActivityListQuery::default(), RequestContext::default())
        .await
        .unwrap();

    assert!(file.filename.starts_with("activity-logs-"));
    assert!(file.filename.ends_with(".csv"));
    assert_eq!(&file.bytes[..3], b"\xef\xbb\xbf");

    let text = String::from_utf8(file.bytes[3..].to_vec()).unwrap();
    let header = text.lines().next().unwrap();
    assert_eq!(
        header,
        "id,created_at,actor_id,action,resource_type,resource_id,description,ip_address"
    );
    assert!(text.contains("root signed in"));

    // the export itself lands in the trail
    let entries = fx.logs.wait_for_entries(2).await;
    assert!(entries.iter().any(|e| e.action == Action::Export));
}
