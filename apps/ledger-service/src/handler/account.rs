//! # 口座ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /v1/accounts` - 口座作成
//! - `GET /v1/accounts/{id}` - 口座取得

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use ledger_domain::{
    account::{Account, AccountId, DocumentNumber, NewAccount},
    validation::{RequestValidator, ValidatedPayload},
};
use ledger_shared::ErrorResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{error::LedgerError, handler::decode_payload, usecase::AccountUseCaseImpl};

/// 口座 API の共有状態
pub struct AccountState {
    pub usecase:   AccountUseCaseImpl,
    pub validator: Arc<RequestValidator>,
}

// --- リクエスト/レスポンス型 ---

/// 口座作成リクエスト
///
/// `account_id` が含まれていても無視する（DB が採番する）。
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CreateAccountRequest {
    /// 書類番号（11 文字）
    #[validate(required, length(equal = 11, code = "len"))]
    #[schema(example = "12345678900")]
    pub document_number: Option<String>,
}

impl ValidatedPayload for CreateAccountRequest {
    const FIELD_ORDER: &'static [&'static str] = &["document_number"];
}

impl CreateAccountRequest {
    /// 検証済みのリクエストを作成入力に変換する
    fn into_input(self) -> Result<NewAccount, LedgerError> {
        let document_number = self
            .document_number
            .ok_or_else(|| LedgerError::Internal("document_number が欠落しています".to_string()))?;
        Ok(NewAccount {
            document_number: DocumentNumber::new(document_number)?,
        })
    }
}

/// 口座レスポンス
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct AccountResponse {
    #[schema(example = 1)]
    pub account_id:      i64,
    #[schema(example = "12345678900")]
    pub document_number: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            account_id:      account.id().as_i64(),
            document_number: account.document_number().as_str().to_string(),
        }
    }
}

// --- ハンドラ ---

/// 口座を作成する
#[utoipa::path(
    post,
    path = "/v1/accounts",
    tag = "accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 200, description = "作成された口座", body = AccountResponse),
        (status = 400, description = "ペイロード不正・制約違反", body = ErrorResponse),
        (status = 500, description = "ストアの失敗", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_account(
    State(state): State<Arc<AccountState>>,
    body: Bytes,
) -> Result<Json<AccountResponse>, LedgerError> {
    let request: CreateAccountRequest = decode_payload(&body)?;
    state.validator.validate(&request)?;

    let account = state.usecase.create_account(request.into_input()?).await?;
    tracing::info!(account_id = %account.id(), "口座を作成しました");

    Ok(Json(account.into()))
}

/// ID で口座を取得する
///
/// ID は 64 ビット整数として解釈する。0 や負数は形式上有効で、存在しないため 404 になる。
#[utoipa::path(
    get,
    path = "/v1/accounts/{id}",
    tag = "accounts",
    params(("id" = i64, Path, description = "口座 ID")),
    responses(
        (status = 200, description = "口座", body = AccountResponse),
        (status = 400, description = "ID が整数でない", body = ErrorResponse),
        (status = 404, description = "口座が存在しない", body = ErrorResponse),
        (status = 500, description = "ストアの失敗", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_account(
    State(state): State<Arc<AccountState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<AccountResponse>, LedgerError> {
    let id = raw_id
        .parse::<i64>()
        .map(AccountId::from_i64)
        .map_err(|_| LedgerError::InvalidInput("Invalid account ID".to_string()))?;

    let account = state.usecase.get_account(id).await?;

    Ok(Json(account.into()))
}
