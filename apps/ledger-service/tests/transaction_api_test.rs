//! 取引 API 統合テスト
//!
//! 受信 → デコード → 検証 → INSERT → 再取得 → 応答 の各段階の失敗が
//! 期待どおりのステータスとメッセージになることを検証する。

mod common;

use std::sync::Arc;

use axum::{Router, http::StatusCode};
use chrono::{DateTime, Utc};
use common::{TestApp, post_json, post_with_content_type, send};
use ledger_domain::clock::FixedClock;
use ledger_infra::mock::MockTransactionRepository;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value as JsonValue, json};

fn fixed_now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

/// 口座を 1 件作成済みのアプリケーション
async fn app_with_account(test_app: &TestApp) -> Router {
    let app = test_app.router();
    let (status, _) = send(
        &app,
        post_json("/v1/accounts", r#"{"document_number": "12345678900"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    app
}

async fn create(app: &Router, body: JsonValue) -> (StatusCode, JsonValue) {
    send(app, post_json("/v1/transactions", &body.to_string())).await
}

#[tokio::test]
async fn test_取引を作成するとdbが決めた値を含めて返す() {
    let mut test_app = TestApp::default();
    test_app.transactions =
        MockTransactionRepository::with_clock(Arc::new(FixedClock::new(fixed_now())))
            .with_accounts(test_app.accounts.clone());
    let app = app_with_account(&test_app).await;

    let (status, body) = create(
        &app,
        json!({"account_id": 1, "operation_type_id": 4, "amount": 123.45}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "transaction_id": 1,
            "account_id": 1,
            "operation_type_id": 4,
            "amount": 123.45,
            "event_date": "2023-11-14T22:13:20Z"
        })
    );
}

#[tokio::test]
async fn test_クライアント指定のidと日時は無視される() {
    let test_app = TestApp::default();
    let app = app_with_account(&test_app).await;

    let (status, body) = create(
        &app,
        json!({
            "transaction_id": 500,
            "account_id": 1,
            "operation_type_id": 1,
            "amount": 50.0,
            "event_date": "2000-01-01T00:00:00Z"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["transaction_id"], 1);
    assert_ne!(body["event_date"], "2000-01-01T00:00:00Z");
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(4)]
#[tokio::test]
async fn test_定義済みの取引種別はすべて受け付ける(#[case] operation_type_id: i64) {
    let test_app = TestApp::default();
    let app = app_with_account(&test_app).await;

    let (status, body) = create(
        &app,
        json!({"account_id": 1, "operation_type_id": operation_type_id, "amount": 10}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["operation_type_id"], operation_type_id);
}

#[tokio::test]
async fn test_取引種別が0の場合はgtとoperationtypeの両方を報告する() {
    let app = TestApp::default().router();

    let (status, body) = create(
        &app,
        json!({"account_id": 1, "operation_type_id": 0, "amount": 10.0}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "code": 400,
            "message": "Field 'operation_type_id' with value '0' failed validation, reason: 'gt'. \
                        Field 'operation_type_id' with value '0' failed validation, reason: 'operationtype'. "
        })
    );
}

#[rstest]
#[case(5)]
#[case(99)]
#[tokio::test]
async fn test_未定義の取引種別は400(#[case] operation_type_id: i64) {
    let test_app = TestApp::default();
    let app = app_with_account(&test_app).await;

    let (status, body) = create(
        &app,
        json!({"account_id": 1, "operation_type_id": operation_type_id, "amount": 10.0}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        format!(
            "Field 'operation_type_id' with value '{operation_type_id}' failed validation, reason: 'operationtype'. "
        )
    );
    assert!(test_app.transactions.transactions().is_empty());
}

#[rstest]
#[case(json!({"account_id": 0, "operation_type_id": 1, "amount": 10.0}), "account_id")]
#[case(json!({"account_id": -3, "operation_type_id": 1, "amount": 10.0}), "account_id")]
#[case(json!({"account_id": 1, "operation_type_id": 1, "amount": 0.0}), "amount")]
#[case(json!({"account_id": 1, "operation_type_id": 1, "amount": -10.5}), "amount")]
#[tokio::test]
async fn test_0以下の値はgtを報告する(#[case] payload: JsonValue, #[case] field: &str) {
    let test_app = TestApp::default();
    let app = app_with_account(&test_app).await;

    let (status, body) = create(&app, payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap();
    assert!(
        message.starts_with(&format!("Field '{field}' with value '")),
        "{message}"
    );
    assert!(message.ends_with("reason: 'gt'. "), "{message}");
    assert!(test_app.transactions.transactions().is_empty());
}

#[rstest]
#[case(json!({}))]
#[case(JsonValue::Null)]
#[tokio::test]
async fn test_欠落フィールドはすべてrequiredで報告される(#[case] payload: JsonValue) {
    let app = TestApp::default().router();

    let (status, body) = create(&app, payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Field 'account_id' with value '' failed validation, reason: 'required'. \
         Field 'operation_type_id' with value '' failed validation, reason: 'required'. \
         Field 'amount' with value '' failed validation, reason: 'required'. "
    );
}

#[rstest]
#[case(r#"{"account_id": "1", "operation_type_id": 1, "amount": 10}"#)]
#[case(r#"{"account_id": 1, "operation_type_id": 1.5, "amount": 10}"#)]
#[case("[1, 1, 10")]
#[tokio::test]
async fn test_型が合わないボディは400(#[case] body: &str) {
    let app = TestApp::default().router();

    let (status, response) = send(&app, post_json("/v1/transactions", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response, json!({"code": 400, "message": "Invalid request payload"}));
}

#[tokio::test]
async fn test_content_typeがなくてもjsonボディなら作成できる() {
    let test_app = TestApp::default();
    let app = app_with_account(&test_app).await;

    let (status, body) = send(
        &app,
        post_with_content_type(
            "/v1/transactions",
            r#"{"account_id":1,"operation_type_id":4,"amount":10}"#,
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["transaction_id"], 1);
    assert_eq!(test_app.transactions.transactions().len(), 1);
}

#[tokio::test]
async fn test_整数値の金額違反は小数部なしで報告される() {
    let test_app = TestApp::default();
    let app = app_with_account(&test_app).await;

    let (status, body) = create(
        &app,
        json!({"account_id": 1, "operation_type_id": 1, "amount": -1}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Field 'amount' with value '-1' failed validation, reason: 'gt'. "
    );
}

#[tokio::test]
async fn test_存在しない口座への取引は作成失敗の500() {
    let app = TestApp::default().router();

    let (status, body) = create(
        &app,
        json!({"account_id": 42, "operation_type_id": 1, "amount": 10.0}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"code": 500, "message": "Failed to create transaction"}));
}

#[rstest]
#[case(MockTransactionRepository::new().failing_insert(), "Failed to create transaction")]
#[case(MockTransactionRepository::new().failing_find(), "Failed to fetch transaction details")]
#[case(MockTransactionRepository::new().losing_rows(), "Failed to fetch transaction details")]
#[tokio::test]
async fn test_insertと再取得の失敗は異なるメッセージになる(
    #[case] transactions: MockTransactionRepository,
    #[case] message: &str,
) {
    let test_app = TestApp {
        transactions,
        ..TestApp::default()
    };
    let app = app_with_account(&test_app).await;

    let (status, body) = create(
        &app,
        json!({"account_id": 1, "operation_type_id": 2, "amount": 10.0}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"code": 500, "message": message}));
}
