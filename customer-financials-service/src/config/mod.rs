//! Configuration module for customer-financials-service.

use financials_core::config as core_config;
use financials_core::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct FinancialsConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub service_version: String,
    pub database: DatabaseConfig,
    pub settings_cache: SettingsCacheConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone)]
pub struct SettingsCacheConfig {
    pub max_age_secs: u64,
}

impl SettingsCacheConfig {
    pub fn max_age(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.max_age_secs)
    }
}

impl FinancialsConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        Ok(Self {
            common,
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| "customer-financials-service".to_string()),
            service_version: env::var("SERVICE_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string()),
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| {
                    AppError::ConfigError(anyhow::anyhow!("DATABASE_URL is required"))
                })?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(2),
            },
            settings_cache: SettingsCacheConfig {
                max_age_secs: env::var("SETTINGS_CACHE_MAX_AGE_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(300),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_requires_database_url() {
        std::env::remove_var("DATABASE_URL");
        assert!(FinancialsConfig::from_env().is_err());

        std::env::set_var("DATABASE_URL", "postgres://localhost/financials");
        let config = FinancialsConfig::from_env().expect("config should load");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.settings_cache.max_age().as_secs(), 300);
        std::env::remove_var("DATABASE_URL");
    }
}

