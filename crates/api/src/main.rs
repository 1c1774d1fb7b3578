use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cre8_api::config::ServerConfig;
use cre8_api::router::build_app_router;
use cre8_api::state::AppState;
use cre8_inference::InferenceClient;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cre8_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        upstream = %config.inference_base_url,
        "Loaded server configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = cre8_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    cre8_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    cre8_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Inference client ---
    let inference = Arc::new(InferenceClient::new(config.inference_base_url.clone()));

    // --- App state / router ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        inference,
    };
    let app = build_app_router(state, &config);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid HOST/PORT combination");
    tracing::info!(%addr, "Starting Cre8 API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");
    axum::serve(listener, app).await.expect("Server error");
}
