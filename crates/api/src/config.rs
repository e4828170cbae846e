use std::path::PathBuf;

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
    /// SQLite database URL (default: `sqlite://tabula.db`).
    pub database_url: String,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory uploaded avatars are written to and served from.
    pub upload_dir: PathBuf,
    /// Quiet period before a live search box change is applied (default: `150`).
    pub name_debounce_ms: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                  |
    /// |------------------------|--------------------------|
    /// | `HOST`                 | `0.0.0.0`                |
    /// | `PORT`                 | `3000`                   |
    /// | `DATABASE_URL`         | `sqlite://tabula.db`     |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                     |
    /// | `UPLOAD_DIR`           | `storage/avatars`        |
    /// | `NAME_DEBOUNCE_MS`     | `150`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = parse_var("PORT", "3000", "u16")?;
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://tabula.db".into());
        let request_timeout_secs = parse_var("REQUEST_TIMEOUT_SECS", "30", "u64")?;
        let upload_dir = std::env::var("UPLOAD_DIR")
            .unwrap_or_else(|_| "storage/avatars".into())
            .into();
        let name_debounce_ms = parse_var("NAME_DEBOUNCE_MS", "150", "u64")?;

        Ok(Self {
            host,
            port,
            database_url,
            request_timeout_secs,
            upload_dir,
            name_debounce_ms,
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    var: &'static str,
    default: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    let value = std::env::var(var).unwrap_or_else(|_| default.to_string());
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        expected,
        value,
    })
}
