use anyhow::Context;
use tracing_subscriber::EnvFilter;

use partnership_api::config::AppConfig;
use partnership_api::database::{DatabaseManager, Stores};
use partnership_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();
    tracing::info!("Starting Partnership API in {:?} mode", config.environment);

    let (stores, manager) = match config.database.url {
        Some(_) => {
            let manager = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to database")?;
            (Stores::postgres(&manager), Some(manager))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using the in-memory store, data will not persist");
            (Stores::memory(), None)
        }
    };

    let port = config.server.port;
    let in_memory = manager.is_none();
    let state = AppState::new(config, stores).context("invalid security configuration (is JWT_SECRET set?)")?;

    match state.bootstrap_super_admin().await.context("failed to create bootstrap SuperAdmin")? {
        Some(user) => tracing::info!("Bootstrap SuperAdmin {} is ready", user.email),
        None if in_memory => tracing::warn!(
            "In-memory store starts empty; set BOOTSTRAP_SUPER_ADMIN_EMAIL and BOOTSTRAP_SUPER_ADMIN_PASSWORD to sign in"
        ),
        None => {}
    }

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Partnership API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(manager) = manager {
        manager.close().await;
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
