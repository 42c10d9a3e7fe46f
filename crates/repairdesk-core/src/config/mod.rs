//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section; every section has defaults so a bare environment still boots.

pub mod app;
pub mod auth;
pub mod bootstrap;
pub mod database;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::bootstrap::BootstrapConfig;
pub use self::database::{DatabaseBackend, DatabaseConfig};
pub use self::logging::{LogFormat, LoggingConfig};

use crate::error::AppError;

/// Prefix for environment-variable overrides (`REPAIRDESK__SERVER__PORT=9000`).
pub const ENV_PREFIX: &str = "REPAIRDESK";

/// Root application configuration.
///
/// Top-level deserialization target for the merged configuration
/// (default.toml + environment overlay + environment variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Credential policy settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Default administrator created at first start.
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `config_dir`.
    ///
    /// Merges `{config_dir}/default` with the `{config_dir}/{env}` overlay
    /// and environment variables prefixed with `REPAIRDESK__`.
    pub fn load(config_dir: &str, env: &str) -> Result<Self, AppError> {
        let merged = config::Config::builder()
            .add_source(config::File::with_name(&format!("{config_dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{config_dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(merged.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_without_files_uses_defaults() {
        let config = AppConfig::load("does-not-exist", "test").expect("defaults should load");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.password_min_length, 6);
        assert_eq!(config.bootstrap.email, "admin@repair.com");
        assert_eq!(config.database.backend, DatabaseBackend::Postgres);
    }
}
