use hygiene_core::evaluation::DEFAULT_OUTDATED_THRESHOLD_DAYS;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Root of the record store table API.
    pub store_base_url: String,
    /// Per-call record store timeout in seconds (default: `10`).
    pub store_timeout_secs: u64,
    /// Age in whole days beyond which a date field is outdated (default: `30`).
    pub outdated_threshold_days: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                           | Default                        |
    /// |-----------------------------------|--------------------------------|
    /// | `HOST`                            | `0.0.0.0`                      |
    /// | `PORT`                            | `3000`                         |
    /// | `CORS_ORIGINS`                    | `http://localhost:5173`        |
    /// | `REQUEST_TIMEOUT_SECS`            | `30`                           |
    /// | `STORE_BASE_URL`                  | `http://localhost:8080/tables` |
    /// | `STORE_TIMEOUT_SECS`              | `10`                           |
    /// | `HYGIENE_OUTDATED_THRESHOLD_DAYS` | `30`                           |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let store_base_url = std::env::var("STORE_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080/tables".into());

        let store_timeout_secs: u64 = std::env::var("STORE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("STORE_TIMEOUT_SECS must be a valid u64");

        let outdated_threshold_days: i64 = std::env::var("HYGIENE_OUTDATED_THRESHOLD_DAYS")
            .map(|v| {
                v.parse()
                    .expect("HYGIENE_OUTDATED_THRESHOLD_DAYS must be a whole number of days")
            })
            .unwrap_or(DEFAULT_OUTDATED_THRESHOLD_DAYS);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store_base_url,
            store_timeout_secs,
            outdated_threshold_days,
        }
    }
}
