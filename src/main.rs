mod config;
mod db;
mod error;
mod generators;
mod handlers;
mod middleware;
mod models;
mod openapi;
mod startup;

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use handlers::MetricsState;

use generators::{DescriptionConfig, DescriptionGenerator, ImageConfig, ImageGenerator};

pub struct AppState {
    pub db: sqlx::SqlitePool,
    pub config: AppConfig,
    pub description_generator: DescriptionGenerator,
    pub image_generator: ImageGenerator,
    pub metrics: Arc<MetricsState>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing with conditional JSON/text output
    let use_json = std::env::var("LOG_FORMAT")
        .unwrap_or_else(|_| "text".to_string()) == "json";

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,wayfarer_axum=debug,tower_http=debug".into());

    if use_json {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        // Human-readable for development
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Configuration error: {}", e);
        e
    })?;

    // Create database pool and ensure the itinerary table exists
    let db = db::create_pool(&config.database_url).await.map_err(|e| {
        tracing::error!("Failed to create database pool: {}", e);
        e
    })?;
    db::init_schema(&db).await?;

    tracing::info!(database_url = %config.database_url, "Database ready");

    // Generated images land here; must exist before ServeDir serves from it
    tokio::fs::create_dir_all(&config.static_dir).await?;

    let description_generator =
        DescriptionGenerator::new(DescriptionConfig::new(config.google_api_key.clone()))?;

    if config.huggingface_api_key.is_none() {
        tracing::warn!("HUGGINGFACE_API_KEY not set, entries will be created without images");
    }
    let image_generator = ImageGenerator::new(ImageConfig::new(
        config.huggingface_api_key.clone(),
        config.static_dir.clone(),
        config.public_base_url.clone(),
    ))?;

    // Initialize metrics recorder
    let metrics = Arc::new(handlers::setup_metrics_recorder());

    let port = config.port;
    let state = Arc::new(AppState {
        db,
        config,
        description_generator,
        image_generator,
        metrics,
    });

    let app = startup::build_router(state);

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
