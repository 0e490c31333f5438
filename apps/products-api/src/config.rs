//! Configuration for Products API

use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_parse, server::ServerConfig};
use database::postgres::PostgresConfig;
use std::time::Duration;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Apply pending migrations before serving (`RUN_MIGRATIONS`, default true)
    pub run_migrations: bool,
    /// Upper bound on cleanup after the server stops (`SHUTDOWN_TIMEOUT_SECS`, default 30)
    pub shutdown_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            app: app_info!(),
            database: PostgresConfig::from_env()?,
            server: ServerConfig::from_env()?,
            environment: Environment::from_env(),
            run_migrations: env_parse("RUN_MIGRATIONS", "true")?,
            shutdown_timeout: Duration::from_secs(env_parse("SHUTDOWN_TIMEOUT_SECS", "30")?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_with_database_url() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/catalog")),
                ("RUN_MIGRATIONS", None),
                ("SHUTDOWN_TIMEOUT_SECS", None),
                ("PORT", None),
                ("APP_ENV", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "products_api");
                assert_eq!(config.database.url(), "postgresql://localhost/catalog");
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.environment, Environment::Development);
                assert!(config.run_migrations);
                assert_eq!(config.shutdown_timeout, Duration::from_secs(30));
            },
        );
    }

    #[test]
    fn test_missing_database_url_fails() {
        temp_env::with_var_unset("DATABASE_URL", || {
            let result = Config::from_env();
            assert!(matches!(result, Err(ConfigError::MissingEnvVar(key)) if key == "DATABASE_URL"));
        });
    }

    #[test]
    fn test_invalid_flag_fails_to_parse() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/catalog")),
                ("RUN_MIGRATIONS", Some("sometimes")),
            ],
            || {
                let result = Config::from_env();
                assert!(matches!(result, Err(ConfigError::ParseError { key, .. }) if key == "RUN_MIGRATIONS"));
            },
        );
    }
}
