//! # Ledger Service サーバー
//!
//! 口座（Account）と取引（Transaction）を管理する HTTP サービス。
//!
//! ## エンドポイント
//!
//! | メソッド | パス | 説明 |
//! |---------|------|------|
//! | POST | `/v1/accounts` | 口座作成 |
//! | GET | `/v1/accounts/{id}` | 口座取得 |
//! | POST | `/v1/transactions` | 取引作成 |
//! | GET | `/health` | Liveness Check |
//! | GET | `/health/ready` | Readiness Check |
//! | GET | `/swagger/openapi.json` | OpenAPI ドキュメント |
//!
//! ## 設定
//!
//! `config.json`（`LEDGER_CONFIG` で変更可）と `LEDGER__*` 環境変数から読み込む。
//! 詳細は [`ledger_service::config`] を参照。
//!
//! ## 起動方法
//!
//! ```bash
//! cargo run -p ledger-service
//!
//! # 設定ファイルとポートを指定
//! LEDGER_CONFIG=/etc/ledger/config.json LEDGER__SERVER__PORT=9090 cargo run -p ledger-service --release
//! ```

use std::sync::Arc;

use anyhow::Context as _;
use ledger_domain::validation::RequestValidator;
use ledger_infra::{
    db,
    repository::{PostgresAccountRepository, PostgresTransactionRepository},
};
use ledger_service::{
    app_builder::{AppDependencies, build_app},
    config::AppConfig,
};
use ledger_shared::observability::{LogFormat, TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("設定の読み込みに失敗しました")?;

    init_tracing(TracingConfig::new(
        "ledger-service",
        LogFormat::parse(&config.logging.format),
        config.logging.default_filter(),
    ));

    tracing::info!(
        "Ledger Service サーバーを起動します: {}:{}",
        config.server.host,
        config.server.port
    );

    let pool = db::connect_with_retry(
        db::pool_options(config.database.max_connections),
        config.database.connect_options()?,
        config.database.retry_policy(),
    )
    .await
    .context("データベース接続に失敗しました")?;

    let app = build_app(AppDependencies {
        account_repository:     Arc::new(PostgresAccountRepository::new(pool.clone())),
        transaction_repository: Arc::new(PostgresTransactionRepository::new(pool.clone())),
        validator:              Arc::new(RequestValidator::with_default_rules()),
        pool,
        request_timeout:        config.server.request_timeout(),
    });

    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .with_context(|| {
            format!(
                "ポートのバインドに失敗しました: {}:{}",
                config.server.host, config.server.port
            )
        })?;
    tracing::info!("Ledger Service サーバーが起動しました: {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Ledger Service サーバーを停止しました");
    Ok(())
}

/// Ctrl+C を待つ
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "シグナルハンドラの登録に失敗しました");
    }
}
