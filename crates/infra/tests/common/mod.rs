//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用するスキーマ適用・データ生成ヘルパー。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use ledger_domain::account::{Account, DocumentNumber, NewAccount};
use ledger_infra::repository::{AccountRepository, PostgresAccountRepository};
use sqlx::PgPool;

/// `schema/schema.sql` を適用する
///
/// `#[sqlx::test]` はテストごとに空の DB を作成するため、各テストの冒頭で呼ぶ。
pub async fn apply_schema(pool: &PgPool) {
    sqlx::raw_sql(include_str!("../../../../schema/schema.sql"))
        .execute(pool)
        .await
        .expect("スキーマの適用に失敗");
}

pub fn new_account(document_number: &str) -> NewAccount {
    NewAccount {
        document_number: DocumentNumber::new(document_number).unwrap(),
    }
}

/// 口座を 1 件作成する
pub async fn insert_account(pool: &PgPool, document_number: &str) -> Account {
    PostgresAccountRepository::new(pool.clone())
        .insert(&new_account(document_number))
        .await
        .expect("口座作成に失敗")
}
