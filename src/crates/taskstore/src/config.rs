//! Configuration for the task store demo
//!
//! Everything comes from the environment, optionally seeded from a `.env`
//! file. `DATABASE_URL` selects the store; when it is unset or empty the demo
//! falls back to a local SQLite file.

use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the connection string
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Environment variable holding the log filter
pub const LOG_FILTER_ENV: &str = "RUST_LOG";

/// Connection string used when `DATABASE_URL` is not set (demo use only)
pub const FALLBACK_DATABASE_URL: &str = "sqlite://tasks.db?mode=rwc";

/// Top-level demo configuration
#[derive(Debug, Clone, Default)]
pub struct DemoConfig {
    /// Database configuration
    pub database: DatabaseConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Per-step time limits
    pub timeouts: TimeoutConfig,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// sqlx SQLite connection string
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: FALLBACK_DATABASE_URL.to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Time limits for each demo step
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Limit for the batch insert, in milliseconds
    pub create_ms: u64,

    /// Limit for each read step, in milliseconds
    pub read_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            create_ms: 5_000,
            read_ms: 3_000,
        }
    }
}

impl TimeoutConfig {
    /// Limit for the batch insert
    pub fn create(&self) -> Duration {
        Duration::from_millis(self.create_ms)
    }

    /// Limit for each read step
    pub fn read(&self) -> Duration {
        Duration::from_millis(self.read_ms)
    }
}

/// Load a `.env` file from the working directory or one of its parents
///
/// Variables already present in the process environment win. A missing
/// file is not an error; the path of the loaded file is returned.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

impl DemoConfig {
    /// Build the configuration from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    ///
    /// Unset and blank values both fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(url) = non_empty(DATABASE_URL_ENV) {
            config.database.url = url;
        }
        if let Some(filter) = non_empty(LOG_FILTER_ENV) {
            config.logging.filter = filter;
        }
        config
    }

    /// Whether the connection string is the built-in fallback
    pub fn uses_fallback_database(&self) -> bool {
        self.database.url == FALLBACK_DATABASE_URL
    }
}
