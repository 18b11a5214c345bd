//! 口座ユースケース

use std::sync::Arc;

use ledger_domain::{
    DomainError,
    account::{Account, AccountId, NewAccount},
};
use ledger_infra::repository::AccountRepository;

use crate::error::LedgerError;

/// 口座ユースケース
pub struct AccountUseCaseImpl {
    account_repository: Arc<dyn AccountRepository>,
}

impl AccountUseCaseImpl {
    pub fn new(account_repository: Arc<dyn AccountRepository>) -> Self {
        Self { account_repository }
    }

    /// 口座を作成する
    pub async fn create_account(&self, input: NewAccount) -> Result<Account, LedgerError> {
        self.account_repository
            .insert(&input)
            .await
            .map_err(|e| LedgerError::persistence("Failed to create account", e))
    }

    /// ID で口座を取得する
    ///
    /// 存在しない場合は `NotFound`、ストアの失敗は `Persistence` を返す。
    pub async fn get_account(&self, id: AccountId) -> Result<Account, LedgerError> {
        self.account_repository
            .find_by_id(id)
            .await
            .map_err(|e| LedgerError::persistence("Failed to fetch account", e))?
            .ok_or_else(|| {
                DomainError::NotFound {
                    entity_type: "Account",
                    id:          id.to_string(),
                }
                .into()
            })
    }
}
