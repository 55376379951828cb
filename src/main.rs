//! Portfolio API - REST backend for contact messages, blog posts and a gallery

mod signal;

use anyhow::Result;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portfolio_api::{
    api::{self, AppState},
    config::Config,
    db::{self, repositories::SqlxAdminRepository},
    services::AdminService,
};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portfolio_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting portfolio API...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // Initialize database
    let pool = match db::create_pool(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = ?e, "Database connection failed");
            return Err(e);
        }
    };
    tracing::info!("Database connected: {:?}", config.database.driver);

    // Run migrations
    db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    // Bootstrap admin account
    match config.admin.credentials() {
        Some((username, password)) => {
            let admins = AdminService::new(SqlxAdminRepository::boxed(pool.clone()));
            admins
                .ensure_admin(username, password, config.admin.email.clone())
                .await?;
        }
        None => tracing::debug!("No bootstrap admin configured"),
    }

    // Create app state and router
    let state = AppState::new(pool.clone(), config.static_files.path.clone());
    let app = api::build_router(state, &config.server.cors_origin);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(signal::shutdown())
        .await?;

    pool.close().await;
    tracing::info!("Database connection closed");

    Ok(())
}
