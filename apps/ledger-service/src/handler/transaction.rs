//! # 取引ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /v1/transactions` - 取引作成
//!
//! ## 処理の流れ
//!
//! ```text
//! 受信 → デコード → 検証 → INSERT → 再取得 → 応答
//!          │         │       │        │
//!          400       400     500      500
//! ```

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
};
use chrono::{DateTime, Utc};
use ledger_domain::{
    account::AccountId,
    transaction::{Amount, NewTransaction, OperationType, Transaction},
    validation::{RequestValidator, RuleTarget, ValidatedPayload, tag},
};
use ledger_shared::ErrorResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{error::LedgerError, handler::decode_payload, usecase::TransactionUseCaseImpl};

/// 取引 API の共有状態
pub struct TransactionState {
    pub usecase:   TransactionUseCaseImpl,
    pub validator: Arc<RequestValidator>,
}

// --- リクエスト/レスポンス型 ---

/// 取引作成リクエスト
///
/// `transaction_id` / `event_date` が含まれていても無視する。
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CreateTransactionRequest {
    #[validate(required, range(exclusive_min = 0, code = "gt"))]
    #[schema(example = 1)]
    pub account_id:        Option<i64>,
    /// 1: 通常購入, 2: 分割購入, 3: 出金, 4: 入金
    #[validate(required, range(exclusive_min = 0, code = "gt"))]
    #[schema(example = 4)]
    pub operation_type_id: Option<i64>,
    #[validate(required, range(exclusive_min = 0.0, code = "gt"))]
    #[schema(example = 123.45)]
    pub amount:            Option<f64>,
}

impl ValidatedPayload for CreateTransactionRequest {
    const FIELD_ORDER: &'static [&'static str] = &["account_id", "operation_type_id", "amount"];

    fn rule_targets(&self) -> Vec<RuleTarget> {
        self.operation_type_id
            .map(|value| RuleTarget {
                field: "operation_type_id",
                rule: tag::OPERATION_TYPE,
                value,
            })
            .into_iter()
            .collect()
    }
}

impl CreateTransactionRequest {
    /// 検証済みのリクエストを作成入力に変換する
    fn into_input(self) -> Result<NewTransaction, LedgerError> {
        let (Some(account_id), Some(operation_type_id), Some(amount)) =
            (self.account_id, self.operation_type_id, self.amount)
        else {
            return Err(LedgerError::Internal(
                "検証済みのペイロードに欠落フィールドがあります".to_string(),
            ));
        };
        let operation_type = OperationType::from_id(operation_type_id).ok_or_else(|| {
            LedgerError::Internal(format!("未定義の取引種別です: {operation_type_id}"))
        })?;

        Ok(NewTransaction {
            account_id: AccountId::from_i64(account_id),
            operation_type,
            amount: Amount::new(amount)?,
        })
    }
}

/// 取引レスポンス
#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct TransactionResponse {
    #[schema(example = 1)]
    pub transaction_id:    i64,
    #[schema(example = 1)]
    pub account_id:        i64,
    #[schema(example = 4)]
    pub operation_type_id: i32,
    #[schema(example = 123.45)]
    pub amount:            f64,
    /// 発生日時（RFC 3339）
    pub event_date:        DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            transaction_id:    transaction.id().as_i64(),
            account_id:        transaction.account_id().as_i64(),
            operation_type_id: transaction.operation_type().id(),
            amount:            transaction.amount().as_f64(),
            event_date:        transaction.event_date(),
        }
    }
}

// --- ハンドラ ---

/// 取引を作成する
#[utoipa::path(
    post,
    path = "/v1/transactions",
    tag = "transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 200, description = "作成された取引", body = TransactionResponse),
        (status = 400, description = "ペイロード不正・制約違反", body = ErrorResponse),
        (status = 500, description = "作成または再取得の失敗", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_transaction(
    State(state): State<Arc<TransactionState>>,
    body: Bytes,
) -> Result<Json<TransactionResponse>, LedgerError> {
    let request: CreateTransactionRequest = decode_payload(&body)?;
    state.validator.validate(&request)?;

    let transaction = state
        .usecase
        .create_transaction(request.into_input()?)
        .await?;
    tracing::info!(
        transaction_id = %transaction.id(),
        account_id = %transaction.account_id(),
        operation_type = transaction.operation_type().as_str(),
        "取引を作成しました"
    );

    Ok(Json(transaction.into()))
}
