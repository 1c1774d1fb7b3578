use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// Most fields have defaults suitable for local development; the inference
/// service base URL is required.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`). Generation calls are
    /// slow; this also bounds how long a stalled upstream can hold a request.
    pub request_timeout_secs: u64,
    /// Base URL of the external inference service. Required.
    pub inference_base_url: String,
    /// JWT validation configuration (identity provider secret).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                    |
    /// |--------------------------|----------------------------|
    /// | `HOST`                   | `0.0.0.0`                  |
    /// | `PORT`                   | `3000`                     |
    /// | `CORS_ORIGINS`           | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                       |
    /// | `INFERENCE_API_BASE_URL` | **required**               |
    ///
    /// # Panics
    ///
    /// Panics if `INFERENCE_API_BASE_URL` is unset or empty: serving proxy
    /// requests with an undefined upstream is never correct, so the server
    /// refuses to start instead.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let inference_base_url = std::env::var("INFERENCE_API_BASE_URL")
            .expect("INFERENCE_API_BASE_URL must be set in the environment");
        assert!(
            !inference_base_url.is_empty(),
            "INFERENCE_API_BASE_URL must not be empty"
        );

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            inference_base_url,
            jwt,
        }
    }
}
