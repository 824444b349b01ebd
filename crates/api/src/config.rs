use std::str::FromStr;

use duebook_core::due_status::{validate_threshold, DEFAULT_DUE_SOON_DAYS};

use crate::auth::jwt::JwtConfig;

/// Default Postgres pool size when `DATABASE_URL` is set.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// A required variable is missing or a value does not parse.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in the environment")]
    Missing(&'static str),

    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
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
    /// Due-soon threshold used when a request does not pass `dueSoonDays`.
    pub due_soon_days: u32,
    /// Postgres URL. `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `3000`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    /// | `DUE_SOON_DAYS`            | `5`                        |
    /// | `DATABASE_URL`             | unset (in-memory store)    |
    /// | `DATABASE_MAX_CONNECTIONS` | `10`                       |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_var(&lookup, "PORT", 3000u16, "a valid port number")?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs =
            parse_var(&lookup, "REQUEST_TIMEOUT_SECS", 30u64, "a whole number of seconds")?;

        let raw_days = parse_var(
            &lookup,
            "DUE_SOON_DAYS",
            i64::from(DEFAULT_DUE_SOON_DAYS),
            "an integer",
        )?;
        let due_soon_days = validate_threshold(raw_days).map_err(|_| ConfigError::Invalid {
            var: "DUE_SOON_DAYS",
            expected: "between 0 and 365",
            value: raw_days.to_string(),
        })?;

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let database_max_connections = parse_var(
            &lookup,
            "DATABASE_MAX_CONNECTIONS",
            DEFAULT_MAX_CONNECTIONS,
            "a positive integer",
        )?;

        let jwt = JwtConfig::from_lookup(&lookup)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            due_soon_days,
            database_url,
            database_max_connections,
            jwt,
        })
    }
}

/// Parse `var` with `T::from_str`, falling back to `default` when unset.
pub(crate) fn parse_var<F, T>(
    lookup: &F,
    var: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            expected,
            value,
        }),
    }
}
