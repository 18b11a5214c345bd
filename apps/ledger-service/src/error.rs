//! # Ledger Service エラー定義
//!
//! リクエスト境界のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## 変換表
//!
//! | バリアント | ステータス | message |
//! |-----------|-----------|---------|
//! | `InvalidPayload` | 400 | `Invalid request payload` |
//! | `Validation` | 400 | フィールド違反の連結メッセージ |
//! | `InvalidInput` | 400 | 保持しているメッセージ |
//! | `NotFound` | 404 | 保持しているメッセージ |
//! | `Persistence` | 500 | 操作ごとの固定メッセージ |
//! | `Timeout` | 408 | `Request timed out` |
//! | `Internal` | 500 | `Internal server error` |
//!
//! 500 系では DB エラーの詳細をクライアントに返さず、ログにのみ出力する。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ledger_domain::DomainError;
use ledger_infra::InfraError;
use ledger_shared::ErrorResponse;
use thiserror::Error;

/// Ledger Service で発生するエラー
#[derive(Debug, Error)]
pub enum LedgerError {
    /// リクエストボディを JSON として解釈できない
    #[error("リクエストボディを解釈できません: {0}")]
    InvalidPayload(String),

    /// フィールド制約違反
    #[error("{0}")]
    Validation(String),

    /// パスパラメータ等の不正
    #[error("不正な入力: {0}")]
    InvalidInput(String),

    /// リソースが見つからない
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// データストアの操作に失敗
    ///
    /// `message` はクライアントに返す固定文言。
    #[error("{message}: {source}")]
    Persistence {
        message: &'static str,
        #[source]
        source:  InfraError,
    },

    /// 処理時間が上限を超えた
    #[error("リクエストがタイムアウトしました")]
    Timeout,

    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl LedgerError {
    pub fn persistence(message: &'static str, source: InfraError) -> Self {
        Self::Persistence { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidPayload(_) | Self::Validation(_) | Self::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::Persistence { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// クライアントに返すメッセージ
    pub fn client_message(&self) -> String {
        match self {
            Self::InvalidPayload(_) => "Invalid request payload".to_string(),
            Self::Validation(msg) | Self::InvalidInput(msg) | Self::NotFound(msg) => msg.clone(),
            Self::Persistence { message, .. } => (*message).to_string(),
            Self::Timeout => "Request timed out".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl From<DomainError> for LedgerError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::Validation(failure) => Self::Validation(failure.to_string()),
            DomainError::InvalidValue(msg) => Self::InvalidPayload(msg),
            DomainError::NotFound { entity_type, .. } => {
                Self::NotFound(format!("{entity_type} not found"))
            }
        }
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        match &self {
            Self::InvalidPayload(detail) => {
                tracing::warn!(detail = %detail, "リクエストボディを解釈できません");
            }
            Self::Validation(msg) => {
                tracing::warn!(violations = %msg, "フィールド制約違反");
            }
            Self::InvalidInput(msg) | Self::NotFound(msg) => {
                tracing::warn!(reason = %msg, "クライアントエラー");
            }
            Self::Persistence { message, source } => {
                tracing::error!(
                    error = %source,
                    span_trace = %source.span_trace(),
                    "{message}"
                );
            }
            Self::Timeout => {
                tracing::warn!("リクエストがタイムアウトしました");
            }
            Self::Internal(msg) => {
                tracing::error!("内部エラー: {}", msg);
            }
        }

        let status = self.status();
        (
            status,
            Json(ErrorResponse::new(status.as_u16(), self.client_message())),
        )
            .into_response()
    }
}
