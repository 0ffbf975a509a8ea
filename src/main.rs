//! Slurp API server.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use slurp::adapters::auth::JwtSessionValidator;
use slurp::adapters::http::{api_router, AppState, RouterOptions};
use slurp::adapters::memory::InMemoryProfileRepository;
use slurp::adapters::postgres::PostgresProfileRepository;
use slurp::application::ProfileService;
use slurp::config::{AppConfig, DatabaseConfig, StorageBackend};
use slurp::domain::foundation::{Clock, SystemClock};
use slurp::ports::{ProfileRepository, SessionValidator};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let repository = profile_repository(&config.database, clock.clone()).await?;
    let service = ProfileService::new(repository, clock.clone());

    let session_validator = config.auth.jwt_secret.as_ref().map(|secret| {
        Arc::new(JwtSessionValidator::new(secret, config.auth.jwt_audience.clone()))
            as Arc<dyn SessionValidator>
    });
    if session_validator.is_none() {
        tracing::warn!("no JWT secret configured, requests are not authenticated");
    }

    let options = RouterOptions {
        session_validator,
        cors_origins: config.server.cors_origins_list(),
        request_timeout: Some(config.server.request_timeout()),
    };
    let app = api_router(AppState::new(service, clock), options);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Slurp API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Slurp API stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn profile_repository(
    database: &DatabaseConfig,
    clock: Arc<dyn Clock>,
) -> Result<Arc<dyn ProfileRepository>, BoxError> {
    match database.backend {
        StorageBackend::Memory => {
            tracing::warn!("using in-memory profile storage, data is lost on restart");
            Ok(Arc::new(InMemoryProfileRepository::new(clock)))
        }
        StorageBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .min_connections(database.min_connections)
                .max_connections(database.max_connections)
                .acquire_timeout(database.acquire_timeout())
                .idle_timeout(database.idle_timeout())
                .max_lifetime(database.max_lifetime())
                .connect(&database.url)
                .await?;

            let repository = PostgresProfileRepository::new(pool);
            if database.run_migrations {
                repository.migrate().await?;
                tracing::info!("database migrations applied");
            }
            Ok(Arc::new(repository))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
