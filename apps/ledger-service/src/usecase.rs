//! # ユースケース層
//!
//! リポジトリ呼び出しとエラーの意味づけを担当する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリを `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラはデコード・検証・レスポンス変換のみを行う
//! - **リトライなし**: ストアの失敗はそのまま 500 として返す

pub mod account;
pub mod transaction;

pub use account::AccountUseCaseImpl;
pub use transaction::TransactionUseCaseImpl;
