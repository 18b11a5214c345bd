//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置し、ここで re-export する
//! - ハンドラの責務はデコード → 検証 → ユースケース呼び出し → JSON 変換のみ
//! - ボディは Content-Type に関係なく JSON としてデコードする（`decode_payload`）

use axum::body::Bytes;
use serde::de::DeserializeOwned;

use crate::error::LedgerError;

pub mod account;
pub mod health;
pub mod transaction;

pub use account::{AccountState, create_account, get_account};
pub use health::{ReadinessState, health_check, readiness_check};
pub use transaction::{TransactionState, create_transaction};

/// リクエストボディを JSON としてデコードする
///
/// Content-Type ヘッダは見ない。`null` は全フィールド欠落のペイロードとして扱い、
/// 欠落は後段の検証で `required` として報告される。
pub(crate) fn decode_payload<T>(body: &Bytes) -> Result<T, LedgerError>
where
    T: DeserializeOwned + Default,
{
    serde_json::from_slice::<Option<T>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| LedgerError::InvalidPayload(e.to_string()))
}
