//! # アプリケーション構築
//!
//! DI（リポジトリ → ユースケース → State）の組み立てとルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。
//!
//! ## レイヤー順序（下に書いたものが外側）
//!
//! 1. `TraceLayer`（最外）: リクエストごとのスパンと完了ログ
//! 2. `HandleErrorLayer` + `TimeoutLayer`: 上限を超えたらハンドラを破棄して 408

use std::{sync::Arc, time::Duration};

use axum::{
    BoxError,
    Router,
    error_handling::HandleErrorLayer,
    routing::{get, post},
};
use ledger_domain::validation::RequestValidator;
use ledger_infra::repository::{AccountRepository, TransactionRepository};
use ledger_shared::observability::{make_request_span, on_response};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    error::LedgerError,
    handler::{
        AccountState,
        ReadinessState,
        TransactionState,
        create_account,
        create_transaction,
        get_account,
        health_check,
        readiness_check,
    },
    openapi::openapi_json,
    usecase::{AccountUseCaseImpl, TransactionUseCaseImpl},
};

/// ルーター構築に必要な依存
pub struct AppDependencies {
    pub account_repository:     Arc<dyn AccountRepository>,
    pub transaction_repository: Arc<dyn TransactionRepository>,
    pub validator:              Arc<RequestValidator>,
    /// Readiness Check 用
    pub pool:                   PgPool,
    pub request_timeout:        Duration,
}

/// DI コンテナの構築とルーター定義を行う
pub fn build_app(deps: AppDependencies) -> Router {
    let account_state = Arc::new(AccountState {
        usecase:   AccountUseCaseImpl::new(deps.account_repository),
        validator: deps.validator.clone(),
    });
    let transaction_state = Arc::new(TransactionState {
        usecase:   TransactionUseCaseImpl::new(deps.transaction_repository),
        validator: deps.validator,
    });
    let readiness_state = Arc::new(ReadinessState { pool: deps.pool });

    let v1 = Router::new()
        .route("/accounts", post(create_account))
        .route("/accounts/{id}", get(get_account))
        .with_state(account_state)
        .merge(
            Router::new()
                .route("/transactions", post(create_transaction))
                .with_state(transaction_state),
        );

    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .with_state(readiness_state)
        .route("/swagger/openapi.json", get(openapi_json))
        .nest("/v1", v1)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(deps.request_timeout),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_request_span)
                .on_response(on_response()),
        )
}

/// ミドルウェアのエラーをレスポンスに変換する
async fn handle_middleware_error(error: BoxError) -> LedgerError {
    if error.is::<tower::timeout::error::Elapsed>() {
        LedgerError::Timeout
    } else {
        LedgerError::Internal(error.to_string())
    }
}
