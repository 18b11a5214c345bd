//! # PostgreSQL データベース接続管理
//!
//! 接続プールの作成（リトライ付き）と死活確認を行う。
//!
//! ## 起動シーケンス
//!
//! 1. [`pool_options`] でプール設定を組み立てる
//! 2. [`connect_with_retry`] で接続を試行する。失敗したら [`RetryPolicy`] の
//!    間隔で再試行し、上限に達したらエラーを返す
//! 3. 接続できたら `SELECT 1` で死活確認する
//!
//! いずれかの失敗は起動失敗として扱う（呼び出し側で終了する）。
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use std::time::Duration;
//!
//! use ledger_infra::db::{self, RetryPolicy};
//! use sqlx::postgres::PgConnectOptions;
//!
//! let options = PgConnectOptions::new()
//!     .host("localhost")
//!     .username("postgres")
//!     .database("ledger");
//! let policy = RetryPolicy::new(5, Duration::from_secs(2));
//! let pool = db::connect_with_retry(db::pool_options(10), options, policy).await?;
//! ```

use std::time::Duration;

use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};

use crate::error::InfraError;

/// 接続取得のタイムアウト
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// 接続リトライ方針
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries:    u32,
    retry_interval: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, retry_interval: Duration) -> Self {
        Self {
            max_retries,
            retry_interval,
        }
    }

    /// 試行回数の上限
    ///
    /// `max_retries = 0` でも 1 回は試行する。
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.max(1)
    }

    pub fn retry_interval(&self) -> Duration {
        self.retry_interval
    }
}

/// 接続プールの設定を返す
pub fn pool_options(max_connections: u32) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
}

/// リトライ付きで接続プールを作成し、死活確認まで行う
///
/// # エラー
///
/// - 全試行が失敗した場合は最後の接続エラー
/// - 死活確認（`SELECT 1`）が失敗した場合はそのエラー
pub async fn connect_with_retry(
    pool_options: PgPoolOptions,
    connect_options: PgConnectOptions,
    policy: RetryPolicy,
) -> Result<PgPool, InfraError> {
    let max_attempts = policy.max_attempts();
    let mut attempt = 1;

    let pool = loop {
        match pool_options
            .clone()
            .connect_with(connect_options.clone())
            .await
        {
            Ok(pool) => break pool,
            Err(e) if attempt < max_attempts => {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    error = %e,
                    "データベースへの接続に失敗しました。リトライします"
                );
                tokio::time::sleep(policy.retry_interval()).await;
                attempt += 1;
            }
            Err(e) => {
                tracing::error!(attempts = attempt, error = %e, "データベースに接続できません");
                return Err(e.into());
            }
        }
    };

    ping(&pool).await?;
    tracing::info!(attempts = attempt, "データベースに接続しました");

    Ok(pool)
}

/// 死活確認
///
/// readiness チェックからも呼ばれる。
#[tracing::instrument(skip_all, level = "debug")]
pub async fn ping(pool: &PgPool) -> Result<(), InfraError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
