//! Learning Tracker API server.
//!
//! Configuration comes from `LEARNING_TRACKER__*` environment variables
//! (a `.env` file is honored). Without `database.url` the server runs on
//! in-memory repositories.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use learning_tracker::adapters::events::{InMemoryEventBus, LoggingEventHandler, DOMAIN_EVENT_TYPES};
use learning_tracker::adapters::http::{api_router, AppState};
use learning_tracker::adapters::postgres::{
    run_migrations, PostgresLearningPathRepository, PostgresSchoolRepository,
    PostgresUserRepository,
};
use learning_tracker::config::{AppConfig, DatabaseConfig};
use learning_tracker::ports::{EventPublisher, EventSubscriber};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    tracing::info!(
        environment = ?config.server.environment,
        persistence = if config.database.is_some() { "postgres" } else { "memory" },
        "starting learning tracker"
    );

    let bus = Arc::new(InMemoryEventBus::dispatch_only());
    if config.events.log_published {
        bus.subscribe_all(DOMAIN_EVENT_TYPES, Arc::new(LoggingEventHandler));
    }
    let events: Arc<dyn EventPublisher> = bus;

    let state = match &config.database {
        Some(database) => postgres_state(database, events).await?,
        None => {
            tracing::warn!("no database configured, data will not survive a restart");
            AppState::in_memory(events)
        }
    };

    let app = api_router(&state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// JSON output in production, human-readable otherwise. `RUST_LOG` wins
/// over the configured level.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn postgres_state(
    database: &DatabaseConfig,
    events: Arc<dyn EventPublisher>,
) -> Result<AppState, Box<dyn std::error::Error>> {
    let pool = PgPoolOptions::new()
        .min_connections(database.min_connections)
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .idle_timeout(database.idle_timeout())
        .max_lifetime(database.max_lifetime())
        .connect(&database.url)
        .await?;
    tracing::info!(max_connections = database.max_connections, "database pool ready");

    if database.run_migrations {
        run_migrations(&pool).await?;
        tracing::info!("migrations applied");
    }

    Ok(AppState::new(
        Arc::new(PostgresSchoolRepository::new(pool.clone())),
        Arc::new(PostgresLearningPathRepository::new(pool.clone())),
        Arc::new(PostgresUserRepository::new(pool)),
        events,
    ))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
