//! # TransactionRepository
//!
//! 取引の作成と ID 検索を担当するリポジトリ。
//!
//! 作成は INSERT と再取得の 2 ステートメントで行う。
//! `event_date` は DB の `NOW()` が決めるため、INSERT では ID のみを返し、
//! 呼び出し側が [`TransactionRepository::find_by_id`] で完全な行を取得する。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ledger_domain::{
    account::AccountId,
    transaction::{Amount, NewTransaction, OperationType, Transaction, TransactionId},
};
use sqlx::PgPool;

use crate::error::InfraError;

/// 取引リポジトリトレイト
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// 取引を作成し、採番された ID を返す
    ///
    /// 口座が存在しない場合は外部キー制約違反（`InfraErrorKind::Database`）になる。
    async fn insert(&self, transaction: &NewTransaction) -> Result<TransactionId, InfraError>;

    /// ID で取引を検索
    async fn find_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, InfraError>;
}

/// `pismo.transactions` の行
#[derive(sqlx::FromRow)]
struct TransactionRow {
    transaction_id:    i64,
    account_id:        i64,
    operation_type_id: i32,
    amount:            f64,
    event_date:        DateTime<Utc>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = InfraError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        Ok(Transaction::from_db(
            TransactionId::from_i64(row.transaction_id),
            AccountId::from_i64(row.account_id),
            OperationType::try_from(row.operation_type_id)
                .map_err(|e| InfraError::unexpected(e.to_string()))?,
            Amount::from_db(row.amount),
            row.event_date,
        ))
    }
}

/// PostgreSQL 実装の TransactionRepository
#[derive(Debug, Clone)]
pub struct PostgresTransactionRepository {
    pool: PgPool,
}

impl PostgresTransactionRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionRepository for PostgresTransactionRepository {
    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(account_id = %transaction.account_id, operation_type = transaction.operation_type.as_str())
    )]
    async fn insert(&self, transaction: &NewTransaction) -> Result<TransactionId, InfraError> {
        let transaction_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO pismo.transactions (account_id, operation_type_id, amount, event_date)
            VALUES ($1, $2, $3, NOW())
            RETURNING transaction_id
            "#,
        )
        .bind(transaction.account_id.as_i64())
        .bind(transaction.operation_type.id())
        .bind(transaction.amount.as_f64())
        .fetch_one(&self.pool)
        .await?;

        Ok(TransactionId::from_i64(transaction_id))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, InfraError> {
        let row = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT transaction_id, account_id, operation_type_id, amount, event_date
            FROM pismo.transactions
            WHERE transaction_id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Transaction::try_from).transpose()
    }
}
