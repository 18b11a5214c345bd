//! # ドメイン層エラー定義
//!
//! ビジネスルール違反やドメイン固有の例外状態を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | リクエストペイロードの制約違反（複数まとめて報告） |
//! | `InvalidValue` | 400 Bad Request | 値オブジェクト生成時の不正値 |
//! | `NotFound` | 404 Not Found | エンティティが存在しない |

use thiserror::Error;

use crate::validation::ValidationFailure;

/// ドメイン層で発生するエラー
#[derive(Debug, Error)]
pub enum DomainError {
    /// ペイロード検証エラー
    ///
    /// 1 つ以上のフィールド制約違反を保持する。
    /// 表示形式はクライアントへ返すメッセージそのもの。
    #[error("{0}")]
    Validation(ValidationFailure),

    /// 値オブジェクトの不正値
    ///
    /// 検証済みの入力から値オブジェクトを組み立てる際の最終防衛線。
    #[error("不正な値: {0}")]
    InvalidValue(String),

    /// エンティティが見つからない
    #[error("{entity_type} が見つかりません: {id}")]
    NotFound {
        /// エンティティの種類（"Account", "Transaction"）
        entity_type: &'static str,
        /// 検索に使用した識別子
        id:          String,
    },
}
