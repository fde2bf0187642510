// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{
            activity::ActivityCommandService, auth::AuthCommandService,
            catalog::CatalogCommandService, events::EventCommandService,
            posts::PostCommandService, roles::RoleCommandService, users::UserCommandService,
        },
        ports::{
            enrichment::{GeoIpResolver, UserAgentInspector},
            security::{PasswordHasher, TokenManager},
            time::Clock,
        },
        queries::{
            admins::AdminQueryService, audit::ActivityQueryService, catalog::CatalogQueryService,
            events::EventQueryService, posts::PostQueryService, roles::RoleQueryService,
            users::UserQueryService,
        },
        recorder::ActivityRecorder,
    },
    domain::{
        admin::AdminRepository, audit::ActivityLogRepository, catalog::CatalogRepository,
        event::EventRepository, post::PostRepository, role::RoleRepository, user::UserRepository,
    },
};

/// Repository handles needed to wire the service graph.
pub struct Repositories {
    pub admins: Arc<dyn AdminRepository>,
    pub roles: Arc<dyn RoleRepository>,
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub events: Arc<dyn EventRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub activity_logs: Arc<dyn ActivityLogRepository>,
}

/// The fully wired application layer: one command and one query service per
/// resource, sharing a single activity recorder.
pub struct ApplicationServices {
    pub auth_commands: Arc<AuthCommandService>,
    pub user_commands: Arc<UserCommandService>,
    pub post_commands: Arc<PostCommandService>,
    pub event_commands: Arc<EventCommandService>,
    pub catalog_commands: Arc<CatalogCommandService>,
    pub role_commands: Arc<RoleCommandService>,
    pub activity_commands: Arc<ActivityCommandService>,
    pub admin_queries: Arc<AdminQueryService>,
    pub user_queries: Arc<UserQueryService>,
    pub post_queries: Arc<PostQueryService>,
    pub event_queries: Arc<EventQueryService>,
    pub catalog_queries: Arc<CatalogQueryService>,
    pub role_queries: Arc<RoleQueryService>,
    pub activity_queries: Arc<ActivityQueryService>,
    token_manager: Arc<dyn TokenManager>,
}

impl ApplicationServices {
    pub fn new(
        repos: Repositories,
        password_hasher: Arc<dyn PasswordHasher>,
        token_manager: Arc<dyn TokenManager>,
        user_agents: Arc<dyn UserAgentInspector>,
        geoip: Option<Arc<dyn GeoIpResolver>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let recorder = ActivityRecorder::spawn(
            Arc::clone(&repos.activity_logs),
            user_agents,
            geoip,
            Arc::clone(&clock),
        );

        let auth_commands = Arc::new(AuthCommandService::new(
            Arc::clone(&repos.admins),
            Arc::clone(&repos.roles),
            password_hasher,
            Arc::clone(&token_manager),
            Arc::clone(&clock),
            recorder.clone(),
        ));
        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&repos.users),
            Arc::clone(&clock),
            recorder.clone(),
        ));
        let post_commands = Arc::new(PostCommandService::new(
            Arc::clone(&repos.posts),
            Arc::clone(&clock),
            recorder.clone(),
        ));
        let event_commands = Arc::new(EventCommandService::new(
            Arc::clone(&repos.events),
            Arc::clone(&clock),
            recorder.clone(),
        ));
        let catalog_commands = Arc::new(CatalogCommandService::new(
            Arc::clone(&repos.catalog),
            Arc::clone(&clock),
            recorder.clone(),
        ));
        let role_commands = Arc::new(RoleCommandService::new(
            Arc::clone(&repos.roles),
            Arc::clone(&clock),
            recorder.clone(),
        ));
        let activity_commands = Arc::new(ActivityCommandService::new(recorder.clone()));

        let admin_queries = Arc::new(AdminQueryService::new(Arc::clone(&repos.admins)));
        let user_queries = Arc::new(UserQueryService::new(
            Arc::clone(&repos.users),
            Arc::clone(&clock),
            recorder.clone(),
        ));
        let post_queries = Arc::new(PostQueryService::new(Arc::clone(&repos.posts)));
        let event_queries = Arc::new(EventQueryService::new(Arc::clone(&repos.events)));
        let catalog_queries = Arc::new(CatalogQueryService::new(Arc::clone(&repos.catalog)));
        let role_queries = Arc::new(RoleQueryService::new(Arc::clone(&repos.roles)));
        let activity_queries = Arc::new(ActivityQueryService::new(
            Arc::clone(&repos.activity_logs),
            Arc::clone(&clock),
            recorder,
        ));

        Self {
            auth_commands,
            user_commands,
            post_commands,
            event_commands,
            catalog_commands,
            role_commands,
            activity_commands,
            admin_queries,
            user_queries,
            post_queries,
            event_queries,
            catalog_queries,
            role_queries,
            activity_queries,
            token_manager,
        }
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }
}
