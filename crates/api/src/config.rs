use library_core::resource::AliasPolicy;
use library_storage::S3Config;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the secret key have defaults suitable for local
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
    /// What deleting a character with aliases does unless the request overrides it.
    pub alias_policy: AliasPolicy,
    /// Session token configuration.
    pub jwt: JwtConfig,
    /// Upload bucket. `None` disables uploads.
    pub storage: Option<S3Config>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                  |
    /// |--------------------------|--------------------------|
    /// | `HOST`                   | `0.0.0.0`                |
    /// | `PORT`                   | `3000`                   |
    /// | `CORS_ORIGINS`           | `http://localhost:3000`  |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                     |
    /// | `CHARACTER_ALIAS_DELETE` | `restrict`               |
    /// | `S3_BUCKET_NAME`         | unset (uploads disabled) |
    /// | `AWS_ACCESS_KEY`         | unset                    |
    /// | `AWS_ACCESS_SECRET`      | unset                    |
    /// | `S3_REGION`              | `us-east-1`              |
    ///
    /// See [`JwtConfig::from_env`] for `SECRET_KEY` and `SESSION_EXPIRY_MINS`.
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

        let alias_policy: AliasPolicy = std::env::var("CHARACTER_ALIAS_DELETE")
            .map(|raw| {
                raw.parse()
                    .unwrap_or_else(|e| panic!("Invalid CHARACTER_ALIAS_DELETE: {e}"))
            })
            .unwrap_or_default();

        let storage = std::env::var("S3_BUCKET_NAME")
            .ok()
            .filter(|bucket| !bucket.trim().is_empty())
            .map(|bucket| S3Config {
                bucket,
                region: std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".into()),
                access_key: std::env::var("AWS_ACCESS_KEY").ok(),
                access_secret: std::env::var("AWS_ACCESS_SECRET").ok(),
            });

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            alias_policy,
            jwt,
            storage,
        }
    }
}
