// tests/http_api_tests.rs
//
// End-to-end checks through the real router: authentication, permission
// enforcement and error bodies as a client would see them.
mod support;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use backoffice_core::application::ports::security::PasswordHasher;
use backoffice_core::application::services::{ApplicationServices, Repositories};
use backoffice_core::domain::admin::{AdminRepository, Email, Grant, NewAdmin, PasswordHash, Role};
use backoffice_core::domain::role::{NewRoleRecord, RoleRepository};
use backoffice_core::infrastructure::security::{Argon2PasswordHasher, JwtTokenManager};
use backoffice_core::presentation::http::routes::build_router;
use backoffice_core::presentation::http::state::HttpState;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;
use support::{
    fixed_now, FixedClock, InMemoryActivityLogRepo, InMemoryAdminRepo, InMemoryCatalogRepo,
    InMemoryEventRepo, InMemoryPostRepo, InMemoryRoleRepo, InMemoryUserRepo,
    NullUserAgentInspector,
};
use tower::util::ServiceExt as _;

const SECRET: &str = "an-integration-test-secret-of-sufficient-length";

struct TestApp {
    app: Router,
    admins: Arc<InMemoryAdminRepo>,
    roles: Arc<InMemoryRoleRepo>,
    hasher: Arc<Argon2PasswordHasher>,
}

fn test_app() -> TestApp {
    let admins = Arc::new(InMemoryAdminRepo::new());
    let roles = Arc::new(InMemoryRoleRepo::new());
    // Token validation compares `exp` against the real clock, so issue
    // against the present rather than a fixed instant.
    let clock = Arc::new(FixedClock(chrono::Utc::now()));
    let hasher = Arc::new(Argon2PasswordHasher::default());
    let tokens = Arc::new(JwtTokenManager::new(SECRET, 3600, clock.clone()));

    let services = ApplicationServices::new(
        Repositories {
            admins: admins.clone(),
            roles: roles.clone(),
            users: Arc::new(InMemoryUserRepo::new()),
            posts: Arc::new(InMemoryPostRepo::new()),
            events: Arc::new(InMemoryEventRepo::new()),
            catalog: Arc::new(InMemoryCatalogRepo::new()),
            activity_logs: Arc::new(InMemoryActivityLogRepo::new()),
        },
        hasher.clone(),
        tokens,
        Arc::new(NullUserAgentInspector),
        None,
        clock,
    );

    let state = HttpState {
        services: Arc::new(services),
    };
    let app = build_router(state, &["*".to_string()]);

    TestApp {
        app,
        admins,
        roles,
        hasher,
    }
}

impl TestApp {
    async fn seed_admin(&self, email: &str, password: &str, role_name: &str) {
        let hash = self.hasher.hash(password).await.unwrap();
        self.admins
            .insert(NewAdmin {
                email: Email::new(email).unwrap(),
                display_name: "Seeded Admin".into(),
                password_hash: PasswordHash::new(hash).unwrap(),
                role_name: role_name.into(),
                is_active: true,
                created_at: fixed_now(),
            })
            .await
            .unwrap();
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["token"]["token"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn health_endpoint_needs_no_token() {
    let tapp = test_app();
    let (status, body) = tapp.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn missing_token_yields_a_structured_401() {
    let tapp = test_app();
    let (status, body) = tapp.send(Method::GET, "/api/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
    assert!(body["message"].as_str().unwrap().contains("Authorization"));
}

#[tokio::test]
async fn login_then_manage_users_end_to_end() {
    let tapp = test_app();
    tapp.seed_admin("root@example.com", "correct horse battery", Role::SUPER_ADMIN)
        .await;
    let token = tapp.login("root@example.com", "correct horse battery").await;

    let (status, body) = tapp
        .send(
            Method::POST,
            "/api/users",
            Some(&token),
            Some(json!({ "full_name": "Ada Lovelace", "email": "ada@example.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["full_name"], "Ada Lovelace");
    let user_id = body["id"].as_i64().unwrap();

    let (status, body) = tapp
        .send(Method::GET, "/api/users", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["email"], "ada@example.com");

    let (status, body) = tapp
        .send(
            Method::DELETE,
            &format!("/api/users/{user_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["days_remaining"].as_i64().is_some());

    // trashed users leave the active listing and show up in the trash
    let (status, body) = tapp
        .send(Method::GET, "/api/users", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);

    let (status, body) = tapp
        .send(Method::GET, "/api/users/deleted", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn insufficient_grants_yield_a_structured_403() {
    let tapp = test_app();

    let mut grants = HashSet::new();
    grants.insert(Grant::new("users", "read"));
    tapp.roles
        .insert(NewRoleRecord::new("viewer", grants, fixed_now()).unwrap())
        .await
        .unwrap();
    tapp.seed_admin("viewer@example.com", "viewer password!", "viewer")
        .await;
    let token = tapp.login("viewer@example.com", "viewer password!").await;

    let (status, _) = tapp
        .send(Method::GET, "/api/users", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = tapp
        .send(
            Method::POST,
            "/api/users",
            Some(&token),
            Some(json!({ "full_name": "Nope", "email": "nope@example.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Forbidden");
    assert!(body["message"].as_str().unwrap().contains("users:create"));
}

#[tokio::test]
async fn unknown_user_id_yields_a_404() {
    let tapp = test_app();
    tapp.seed_admin("root@example.com", "correct horse battery", Role::SUPER_ADMIN)
        .await;
    let token = tapp.login("root@example.com", "correct horse battery").await;

    let (status, body) = tapp
        .send(Method::GET, "/api/users/9999", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
}
