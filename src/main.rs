// src/main.rs
use anyhow::Result;
use backoffice_core::application::{
    ports::{
        enrichment::{GeoIpResolver, UserAgentInspector},
        security::{PasswordHasher, TokenManager},
        time::Clock,
    },
    services::{ApplicationServices, Repositories},
};
use backoffice_core::config::AppConfig;
use backoffice_core::infrastructure::{
    database,
    enrichment::{MaxMindResolver, WootheeInspector},
    repositories::{
        PostgresActivityLogRepository, PostgresAdminRepository, PostgresCatalogRepository,
        PostgresEventRepository, PostgresPostRepository, PostgresRoleRepository,
        PostgresUserRepository,
    },
    security::{Argon2PasswordHasher, JwtTokenManager},
    time::SystemClock,
};
use backoffice_core::presentation::http::{routes::build_router, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let repos = Repositories {
        admins: Arc::new(PostgresAdminRepository::new(pool.clone())),
        roles: Arc::new(PostgresRoleRepository::new(pool.clone())),
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        posts: Arc::new(PostgresPostRepository::new(pool.clone())),
        events: Arc::new(PostgresEventRepository::new(pool.clone())),
        catalog: Arc::new(PostgresCatalogRepository::new(pool.clone())),
        activity_logs: Arc::new(PostgresActivityLogRepository::new(pool)),
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::default());
    let token_manager: Arc<dyn TokenManager> = Arc::new(JwtTokenManager::new(
        config.jwt_secret(),
        config.token_ttl().as_secs() as i64,
        Arc::clone(&clock),
    ));
    let user_agents: Arc<dyn UserAgentInspector> = Arc::new(WootheeInspector::new());

    let geoip: Option<Arc<dyn GeoIpResolver>> = match config.maxminddb_path() {
        Some(path) => match MaxMindResolver::open(path) {
            Ok(resolver) => Some(Arc::new(resolver)),
            Err(err) => {
                tracing::warn!(error = %err, path, "GeoIP database unavailable, entries will not carry locations");
                None
            }
        },
        None => None,
    };

    let services = Arc::new(ApplicationServices::new(
        repos,
        password_hasher,
        token_manager,
        user_agents,
        geoip,
        clock,
    ));

    if let Some(bootstrap) = config.bootstrap_admin() {
        let created = services
            .auth_commands
            .ensure_bootstrap_admin(&bootstrap.email, &bootstrap.password)
            .await?;
        if created {
            tracing::info!(email = %bootstrap.email, "bootstrap admin created");
        }
    }

    let state = HttpState {
        services: Arc::clone(&services),
    };

    let app = build_router(state, config.allowed_origins());

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install terminate handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
