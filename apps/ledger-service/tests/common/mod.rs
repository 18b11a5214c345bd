//! テスト共通ヘルパー
//!
//! インメモリリポジトリを注入した本物のルーターを組み立て、
//! `tower::ServiceExt::oneshot` でリクエストを送る。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use ledger_domain::validation::RequestValidator;
use ledger_infra::mock::{MockAccountRepository, MockTransactionRepository};
use ledger_service::app_builder::{AppDependencies, build_app};
use serde_json::Value as JsonValue;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tower::ServiceExt;

/// 接続しないプール（Readiness Check は失敗する）
pub fn unreachable_pool() -> sqlx::PgPool {
    PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy_with(
            PgConnectOptions::new()
                .host("127.0.0.1")
                .port(1)
                .username("ledger")
                .database("ledger"),
        )
}

/// テスト用アプリケーションの構成
pub struct TestApp {
    pub accounts:        MockAccountRepository,
    pub transactions:    MockTransactionRepository,
    pub request_timeout: Duration,
}

impl Default for TestApp {
    fn default() -> Self {
        let accounts = MockAccountRepository::new();
        let transactions = MockTransactionRepository::new().with_accounts(accounts.clone());
        Self {
            accounts,
            transactions,
            request_timeout: Duration::from_secs(5),
        }
    }
}

impl TestApp {
    pub fn router(&self) -> Router {
        build_app(AppDependencies {
            account_repository:     Arc::new(self.accounts.clone()),
            transaction_repository: Arc::new(self.transactions.clone()),
            validator:              Arc::new(RequestValidator::with_default_rules()),
            pool:                   unreachable_pool(),
            request_timeout:        self.request_timeout,
        })
    }
}

/// JSON ボディ付きの POST リクエスト
pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Content-Type を任意に指定した POST リクエスト（`None` はヘッダなし）
pub fn post_with_content_type(uri: &str, body: &str, content_type: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// リクエストを送り、ステータスと JSON ボディを返す
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, JsonValue) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
