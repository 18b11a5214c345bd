//! # リポジトリ実装
//!
//! 口座・取引の永続化を担当する。トレイトを介して利用することで、
//! ユースケースのテストではインメモリ実装（[`crate::mock`]）に差し替えられる。
//!
//! 全クエリは `pismo` スキーマのテーブルに対して実行する。

pub mod account_repository;
pub mod transaction_repository;

pub use account_repository::{AccountRepository, PostgresAccountRepository};
pub use transaction_repository::{PostgresTransactionRepository, TransactionRepository};
