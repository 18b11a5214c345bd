//! # OpenAPI 仕様定義
//!
//! utoipa を使用して OpenAPI 仕様を Rust の型から生成する。
//! `/swagger/openapi.json` で配信し、`generate-openapi` バイナリで YAML を出力する。

use axum::Json;
use utoipa::OpenApi;

use crate::handler::{account, health, transaction};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ledger API",
        version = "0.1.0",
        description = "口座と取引を管理する Ledger Service の API"
    ),
    paths(
        // health
        health::health_check,
        health::readiness_check,
        // accounts
        account::create_account,
        account::get_account,
        // transactions
        transaction::create_transaction,
    ),
    tags(
        (name = "health", description = "ヘルスチェック"),
        (name = "accounts", description = "口座"),
        (name = "transactions", description = "取引"),
    )
)]
pub struct ApiDoc;

/// OpenAPI ドキュメントを JSON で返す
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
