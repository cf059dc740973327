//! 設定の読み込み
//!
//! 優先順位（後勝ち）：
//! 1. 組み込みのデフォルト値
//! 2. `config/default.toml`（任意）
//! 3. `LIBRARY__` で始まる環境変数（例: `LIBRARY__SERVER__PORT=8080`）
//! 4. `DATABASE_URL` / `PORT`

use crate::domain;
use chrono::Duration;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// ストアの実装
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CirculationConfig {
    pub loan_period_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub circulation: CirculationConfig,
}

impl AppConfig {
    /// 設定ファイルと環境変数から読み込む
    pub fn load() -> Result<Self, ConfigError> {
        // .env は無くてもよい
        let _ = dotenvy::dotenv();

        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                Environment::with_prefix("LIBRARY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .set_override_option("server.port", env::var("PORT").ok())?
            .build()?
            .try_deserialize()
    }

    /// デフォルト値のみを設定したビルダー
    pub fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000_i64)?
            .set_default("database.url", "postgres://localhost/library")?
            .set_default("database.max_connections", 5_i64)?
            .set_default("storage.backend", "postgres")?
            .set_default("circulation.loan_period_days", domain::loan::LOAN_PERIOD_DAYS)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn loan_period(&self) -> Duration {
        Duration::days(self.circulation.loan_period_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: AppConfig = AppConfig::builder()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.storage.backend, StorageBackend::Postgres);
        assert_eq!(config.loan_period(), Duration::days(14));
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config: AppConfig = AppConfig::builder()
            .unwrap()
            .set_override("server.port", "8080")
            .unwrap()
            .set_override("storage.backend", "memory")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
    }
}
