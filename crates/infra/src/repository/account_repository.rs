//! # AccountRepository
//!
//! 口座の作成と ID 検索を担当するリポジトリ。
//! 更新・削除は提供しない（口座は作成後読み取り専用）。

use async_trait::async_trait;
use ledger_domain::account::{Account, AccountId, DocumentNumber, NewAccount};
use sqlx::PgPool;

use crate::error::InfraError;

/// 口座リポジトリトレイト
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// 口座を作成し、採番された ID を含む口座を返す
    ///
    /// リクエストに含まれる口座 ID は使わない（DB が採番する）。
    async fn insert(&self, account: &NewAccount) -> Result<Account, InfraError>;

    /// ID で口座を検索
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(account))`: 口座が見つかった場合
    /// - `Ok(None)`: 口座が見つからない場合
    /// - `Err(_)`: データベースエラー
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, InfraError>;
}

/// `pismo.accounts` の行
#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id:      i64,
    document_number: String,
}

impl TryFrom<AccountRow> for Account {
    type Error = InfraError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account::from_db(
            AccountId::from_i64(row.account_id),
            DocumentNumber::new(row.document_number)
                .map_err(|e| InfraError::unexpected(e.to_string()))?,
        ))
    }
}

/// PostgreSQL 実装の AccountRepository
#[derive(Debug, Clone)]
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, account: &NewAccount) -> Result<Account, InfraError> {
        let account_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO pismo.accounts (document_number)
            VALUES ($1)
            RETURNING account_id
            "#,
        )
        .bind(account.document_number.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(Account::from_db(
            AccountId::from_i64(account_id),
            account.document_number.clone(),
        ))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, InfraError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT account_id, document_number
            FROM pismo.accounts
            WHERE account_id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Account::try_from).transpose()
    }
}
