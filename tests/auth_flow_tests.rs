// tests/auth_flow_tests.rs
mod support;

use backoffice_core::application::commands::auth::{AuthCommandService, LoginCommand};
use backoffice_core::application::ports::security::{PasswordHasher, TokenManager};
use backoffice_core::application::recorder::{ActivityRecorder, RequestContext};
use backoffice_core::application::ApplicationError;
use backoffice_core::domain::admin::{Email, NewAdmin, PasswordHash, Role};
use backoffice_core::domain::role::NewRoleRecord;
use backoffice_core::domain::role::RoleRepository;
use backoffice_core::domain::admin::{AdminRepository, Grant};
use backoffice_core::infrastructure::security::{Argon2PasswordHasher, JwtTokenManager};
use std::collections::HashSet;
use std::sync::Arc;
use support::{fixed_now, FixedClock, InMemoryActivityLogRepo, InMemoryAdminRepo, InMemoryRoleRepo, NullUserAgentInspector};

const SECRET: &str = "an-integration-test-secret-of-sufficient-length";

struct Fixture {
    admins: Arc<InMemoryAdminRepo>,
    roles: Arc<InMemoryRoleRepo>,
    hasher: Arc<Argon2PasswordHasher>,
    tokens: Arc<JwtTokenManager>,
    logs: Arc<InMemoryActivityLogRepo>,
    service: AuthCommandService,
}

fn fixture() -> Fixture {
    let admins = Arc::new(InMemoryAdminRepo::new());
    let roles = Arc::new(InMemoryRoleRepo::new());
    let logs = Arc::new(InMemoryActivityLogRepo::new());
    // Token validation compares `exp` against the real clock, so issue
    // against the present rather than a fixed instant.
    let clock = Arc::new(FixedClock(chrono::Utc::now()));
    let hasher = Arc::new(Argon2PasswordHasher::default());
    let tokens = Arc::new(JwtTokenManager::new(SECRET, 3600, clock.clone()));
    let recorder = ActivityRecorder::spawn(
        logs.clone(),
        Arc::new(NullUserAgentInspector),
        None,
        clock.clone(),
    );
    let service = AuthCommandService::new(
        admins.clone(),
        roles.clone(),
        hasher.clone(),
        tokens.clone(),
        clock,
        recorder,
    );
    Fixture {
        admins,
        roles,
        hasher,
        tokens,
        logs,
        service,
    }
}

async fn seed_admin(fx: &Fixture, email: &str, password: &str, role_name: &str, is_active: bool) {
    let hash = fx.hasher.hash(password).await.unwrap();
    fx.admins
        .insert(NewAdmin {
            email: Email::new(email).unwrap(),
            display_name: "Seeded Admin".into(),
            password_hash: PasswordHash::new(hash).unwrap(),
            role_name: role_name.into(),
            is_active,
            created_at: fixed_now(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn login_issues_a_token_that_authenticates_back() {
    let fx = fixture();
    seed_admin(&fx, "root@example.com", "correct horse battery", Role::SUPER_ADMIN, true).await;

    let result = fx
        .service
        .login(
            LoginCommand {
                email: "root@example.com".into(),
                password: "correct horse battery".into(),
            },
            RequestContext::default(),
        )
        .await
        .unwrap();

    let authenticated = fx.tokens.authenticate(&result.token.token).await.unwrap();
    assert_eq!(authenticated.email, "root@example.com");
    assert_eq!(authenticated.role, Role::SuperAdmin);

    // the sign-in lands in the audit trail
    let entries = fx.logs.wait_for_entries(1).await;
    assert_eq!(
        entries[0].action,
        backoffice_core::domain::audit::Action::Login
    );
}

#[tokio::test]
async fn named_role_grants_are_resolved_at_login() {
    let fx = fixture();

    let mut grants = HashSet::new();
    grants.insert(Grant::new("users", "read"));
    fx.roles
        .insert(NewRoleRecord::new("viewer", grants, fixed_now()).unwrap())
        .await
        .unwrap();
    seed_admin(&fx, "viewer@example.com", "viewer password!", "viewer", true).await;

    let result = fx
        .service
        .login(
            LoginCommand {
                email: "viewer@example.com".into(),
                password: "viewer password!".into(),
            },
            RequestContext::default(),
        )
        .await
        .unwrap();

    let authenticated = fx.tokens.authenticate(&result.token.token).await.unwrap();
    assert!(authenticated.permits("users", "read"));
    assert!(!authenticated.permits("users", "delete"));
}

#[tokio::test]
async fn dangling_role_name_denies_everything() {
    let fx = fixture();
    seed_admin(&fx, "lost@example.com", "whatever works", "deleted_role", true).await;

    let result = fx
        .service
        .login(
            LoginCommand {
                email: "lost@example.com".into(),
                password: "whatever works".into(),
            },
            RequestContext::default(),
        )
        .await
        .unwrap();

    let authenticated = fx.tokens.authenticate(&result.token.token).await.unwrap();
    assert!(!authenticated.permits("users", "read"));
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_both_unauthorized() {
    let fx = fixture();
    seed_admin(&fx, "root@example.com", "the right one", Role::SUPER_ADMIN, true).await;

    let err = fx
        .service
        .login(
            LoginCommand {
                email: "root@example.com".into(),
                password: "the wrong one".into(),
            },
            RequestContext::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Unauthorized(_)));

    let err = fx
        .service
        .login(
            LoginCommand {
                email: "nobody@example.com".into(),
                password: "anything at all".into(),
            },
            RequestContext::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Unauthorized(_)));
}

#[tokio::test]
async fn disabled_account_is_forbidden() {
    let fx = fixture();
    seed_admin(&fx, "gone@example.com", "still remembers", Role::SUPER_ADMIN, false).await;

    let err = fx
        .service
        .login(
            LoginCommand {
                email: "gone@example.com".into(),
                password: "still remembers".into(),
            },
            RequestContext::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let fx = fixture();
    let err = fx.tokens.authenticate("not-a-jwt").await.unwrap_err();
    assert!(matches!(err, ApplicationError::Unauthorized(_)));
}

#[tokio::test]
async fn bootstrap_admin_is_created_only_into_an_empty_store() {
    let fx = fixture();

    let created = fx
        .service
        .ensure_bootstrap_admin("first@example.com", "bootstrap secret")
        .await
        .unwrap();
    assert!(created);
    assert_eq!(fx.admins.count().await.unwrap(), 1);

    let created_again = fx
        .service
        .ensure_bootstrap_admin("second@example.com", "bootstrap secret")
        .await
        .unwrap();
    assert!(!created_again);
    assert_eq!(fx.admins.count().await.unwrap(), 1);

    // and the seeded account can sign in as the super role
    let result = fx
        .service
        .login(
            LoginCommand {
                email: "first@example.com".into(),
                password: "bootstrap secret".into(),
            },
            RequestContext::default(),
        )
        .await
        .unwrap();
    let authenticated = fx.tokens.authenticate(&result.token.token).await.unwrap();
    assert_eq!(authenticated.role, Role::SuperAdmin);
}
