//! # Ledger Service ライブラリ
//!
//! ルーター構築・ハンドラ・ユースケースを公開する。
//! `tests/` の統合テストと `generate-openapi` バイナリから利用する。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod openapi;
pub mod usecase;
