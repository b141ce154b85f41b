use crate::log_info;
use crate::shared::errors::{AppError, AppResult};
use std::env;
use std::time::Duration;

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const MAX_POOL_SIZE: u32 = 20;

/// Connection settings for the catalog database
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_idle: u32,
    pub connect_timeout: Duration,
}

impl DatabaseConfig {
    /// Load settings from the environment, reading `.env` first if present.
    ///
    /// - `DATABASE_URL` (required)
    /// - `DATABASE_MAX_CONNECTIONS` (optional)
    /// - `DATABASE_CONNECT_TIMEOUT_SECS` (optional)
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let url = env::var("DATABASE_URL").map_err(|_| {
            AppError::ConfigError("DATABASE_URL environment variable not found".to_string())
        })?;

        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw.trim().parse::<u32>().map_err(|e| {
                AppError::ConfigError(format!("Invalid DATABASE_MAX_CONNECTIONS: {}", e))
            })?,
            Err(_) => Self::default_pool_size(),
        };

        let connect_timeout = match env::var("DATABASE_CONNECT_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(raw.trim().parse::<u64>().map_err(|e| {
                AppError::ConfigError(format!("Invalid DATABASE_CONNECT_TIMEOUT_SECS: {}", e))
            })?),
            Err(_) => Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Self::new(url, max_connections, connect_timeout)
    }

    /// Build a validated config from explicit values
    pub fn new(url: String, max_connections: u32, connect_timeout: Duration) -> AppResult<Self> {
        Self::validate_url(&url)?;

        if max_connections == 0 {
            return Err(AppError::ConfigError(
                "DATABASE_MAX_CONNECTIONS must be at least 1".to_string(),
            ));
        }

        let max_connections = max_connections.min(MAX_POOL_SIZE);
        let min_idle = std::cmp::max(1, max_connections / 4);

        log_info!(
            "Database configured for {} (max_connections: {})",
            Self::redacted_host(&url),
            max_connections
        );

        Ok(Self {
            url,
            max_connections,
            min_idle,
            connect_timeout,
        })
    }

    fn validate_url(url: &str) -> AppResult<()> {
        if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
            return Err(AppError::ConfigError(
                "Invalid database URL format. Must start with postgres:// or postgresql://"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Host part of the URL, never the credentials
    pub fn redacted_host(url: &str) -> &str {
        url.rsplit('@').next().unwrap_or("unknown_host")
    }

    /// Pool size based on CPU count, capped
    fn default_pool_size() -> u32 {
        let cpu_count = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);

        std::cmp::min(cpu_count as u32 * 2, MAX_POOL_SIZE)
    }
}
