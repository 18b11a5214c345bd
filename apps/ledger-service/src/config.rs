//! # Ledger Service 設定
//!
//! JSON ファイルと環境変数から設定を読み込む。
//!
//! ## 読み込み順（後勝ち）
//!
//! 1. JSON ファイル（`LEDGER_CONFIG`、未設定なら `config.json`）
//! 2. 環境変数 `LEDGER__<SECTION>__<KEY>`（例: `LEDGER__SERVER__PORT=9090`）
//!
//! `.env` は `main` で先に読み込まれるため、環境変数として扱われる。

use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat};
use ledger_infra::db::RetryPolicy;
use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// 設定ファイルのパスを指定する環境変数
pub const CONFIG_PATH_ENV: &str = "LEDGER_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "config.json";

/// アプリケーション全体の設定
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server:   ServerConfig,
    #[serde(default)]
    pub logging:  LoggingConfig,
}

/// データベース接続設定
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub host:                   String,
    pub port:                   u16,
    pub user:                   String,
    pub password:               String,
    pub dbname:                 String,
    /// `disable` | `allow` | `prefer` | `require` | `verify-ca` | `verify-full`
    #[serde(default = "default_sslmode")]
    pub sslmode:                String,
    #[serde(default = "default_max_retries")]
    pub max_retries:            u32,
    #[serde(default = "default_retry_interval_seconds")]
    pub retry_interval_seconds: u64,
    #[serde(default = "default_max_connections")]
    pub max_connections:        u32,
}

/// HTTP サーバー設定
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host:                    String,
    pub port:                    u16,
    /// 1 リクエストの処理時間の上限
    pub request_timeout_seconds: u64,
}

/// ログ設定
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `trace` | `debug` | `info` | `warn` | `error`
    pub level:  String,
    /// `json` | `pretty`
    pub format: String,
}

fn default_sslmode() -> String {
    "disable".to_string()
}

fn default_max_retries() -> u32 {
    5
}

fn default_retry_interval_seconds() -> u64 {
    2
}

fn default_max_connections() -> u32 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host:                    "0.0.0.0".to_string(),
            port:                    8080,
            request_timeout_seconds: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level:  "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 設定ファイルと環境変数から読み込む
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::from_sources(
            File::new(&path, FileFormat::Json).required(true),
            environment(),
        )
    }

    /// 任意のファイルソースと環境変数ソースから組み立てる
    fn from_sources<F>(file: F, env: Environment) -> Result<Self, ConfigError>
    where
        F: config::Source + Send + Sync + 'static,
    {
        Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("LEDGER")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

impl DatabaseConfig {
    /// PostgreSQL の接続オプションを組み立てる
    ///
    /// # エラー
    ///
    /// `sslmode` が不正な場合は `ConfigError::Message` を返す。
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        let ssl_mode: PgSslMode = self.sslmode.parse().map_err(|_| {
            ConfigError::Message(format!("database.sslmode が不正です: {}", self.sslmode))
        })?;

        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.dbname)
            .ssl_mode(ssl_mode))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_retries,
            Duration::from_secs(self.retry_interval_seconds),
        )
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl LoggingConfig {
    /// `RUST_LOG` 未設定時に使う EnvFilter
    ///
    /// sqlx のクエリごとのログは warn 以上に抑える。
    pub fn default_filter(&self) -> String {
        format!("{},sqlx=warn", self.level)
    }
}
