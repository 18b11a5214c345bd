//! # Ledger インフラ層
//!
//! PostgreSQL との接続・永続化を担当する。
//!
//! ## 責務
//!
//! - **データベース接続**: リトライ付きの接続プール作成と死活確認
//! - **リポジトリ実装**: 口座・取引の INSERT と ID 検索
//! - **テスト用実装**: インメモリリポジトリ（`test-utils` feature）
//!
//! ## 依存関係
//!
//! ```text
//! service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - 接続プール管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
