//! # Ledger ドメイン層
//!
//! 口座（Account）と取引（Transaction）のドメインモデルと、
//! リクエストペイロードのフィールド検証を定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! service → infra → domain
//!    ↘               ↑
//!      ──────────────
//! ```
//!
//! ドメイン層はインフラ層（DB、HTTP）に一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`account`] - 口座エンティティと値オブジェクト
//! - [`transaction`] - 取引エンティティ、取引種別
//! - [`validation`] - 宣言的制約 + カスタムルールによるペイロード検証
//! - [`clock`] - 時刻プロバイダ
//! - [`error`] - ドメイン層エラー
//!
//! ## 使用例
//!
//! ```rust
//! use ledger_domain::{DomainError, account::DocumentNumber};
//!
//! let document = DocumentNumber::new("12345678900").unwrap();
//! assert_eq!(document.as_str(), "12345678900");
//!
//! let error = DocumentNumber::new("123").unwrap_err();
//! assert!(matches!(error, DomainError::InvalidValue(_)));
//! ```

pub mod account;
pub mod clock;
pub mod error;
pub mod transaction;
pub mod validation;

pub use error::DomainError;
