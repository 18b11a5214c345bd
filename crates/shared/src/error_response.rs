//! # エラーレスポンス
//!
//! 全エンドポイントで共通のエラーレスポンス構造体 `{"code": int, "message": string}` を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換はサービス側の責務（shared に axum 依存を入れない）
//! - `code` は HTTP ステータスコードと常に一致させる

use serde::{Deserialize, Serialize};

/// エラーレスポンス
///
/// `code` に HTTP ステータスコード、`message` に人間可読なエラー内容を持つ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// HTTP ステータスコード
    #[cfg_attr(feature = "openapi", schema(example = 404))]
    pub code:    u16,
    /// エラー内容
    #[cfg_attr(feature = "openapi", schema(example = "Account not found"))]
    pub message: String,
}

impl ErrorResponse {
    /// 汎用コンストラクタ
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
