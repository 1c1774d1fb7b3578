use std::sync::Arc;

use cre8_inference::InferenceClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Nothing here is mutable between requests: handlers are stateless and
/// safe to run with arbitrary concurrency.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: cre8_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Client for the external inference service.
    pub inference: Arc<InferenceClient>,
}
