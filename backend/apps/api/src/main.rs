//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors are the crates' own error types.

mod app;
mod config;

use anyhow::Context;
use auth::domain::repository::UserRepository;
use auth::{AuthAppState, InMemoryUserRepository, PgUserRepository};
use detection::{DetectionAppState, DetectionConfig, HuggingFaceClassifier};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,detection=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(?config, "Configuration loaded");

    let classifier = HuggingFaceClassifier::new(config.huggingface_config())
        .context("Failed to initialize the Hugging Face classifier")?;
    tracing::info!(model_url = classifier.model_url(), "Classifier ready");

    if config.session_secret.is_none() {
        tracing::warn!("SESSION_SECRET not set, sessions will not survive a restart");
    }

    match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await
                .context("Failed to connect to database")?;

            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;

            tracing::info!("Migrations completed");

            serve(&config, PgUserRepository::new(pool), classifier).await
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory user store");
            serve(&config, InMemoryUserRepository::new(), classifier).await
        }
    }
}

async fn serve<R>(
    config: &ServerConfig,
    repo: R,
    classifier: HuggingFaceClassifier,
) -> anyhow::Result<()>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let app = app::build_router(
        AuthAppState::new(repo, config.auth_config()),
        DetectionAppState::new(classifier, DetectionConfig::default()),
        app::cors_layer(&config.frontend_origins),
    );

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
