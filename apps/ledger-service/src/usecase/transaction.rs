//! 取引ユースケース
//!
//! 作成は INSERT → 再取得の 2 段階で行い、DB が決めた `event_date` を含めて返す。
//! どちらの段階の失敗も区別できるよう、メッセージを分けている。

use std::sync::Arc;

use ledger_domain::transaction::{NewTransaction, Transaction};
use ledger_infra::{InfraError, repository::TransactionRepository};

use crate::error::LedgerError;

const CREATE_FAILED: &str = "Failed to create transaction";
const REFETCH_FAILED: &str = "Failed to fetch transaction details";

/// 取引ユースケース
pub struct TransactionUseCaseImpl {
    transaction_repository: Arc<dyn TransactionRepository>,
}

impl TransactionUseCaseImpl {
    pub fn new(transaction_repository: Arc<dyn TransactionRepository>) -> Self {
        Self {
            transaction_repository,
        }
    }

    /// 取引を作成し、再取得した完全な取引を返す
    ///
    /// リトライは行わない。INSERT 後の再取得に失敗しても行は残る。
    pub async fn create_transaction(
        &self,
        input: NewTransaction,
    ) -> Result<Transaction, LedgerError> {
        let id = self
            .transaction_repository
            .insert(&input)
            .await
            .map_err(|e| LedgerError::persistence(CREATE_FAILED, e))?;

        self.transaction_repository
            .find_by_id(id)
            .await
            .map_err(|e| LedgerError::persistence(REFETCH_FAILED, e))?
            .ok_or_else(|| {
                LedgerError::persistence(
                    REFETCH_FAILED,
                    InfraError::unexpected(format!("作成直後の取引が見つかりません: {id}")),
                )
            })
    }
}
