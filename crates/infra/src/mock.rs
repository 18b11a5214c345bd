//! # テスト用モックリポジトリ
//!
//! ユースケース・ハンドラのテストで使用するインメモリリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! ledger-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! ID は 1 から連番で採番する。失敗注入（`failing_*`）で DB 障害を再現できる。

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use ledger_domain::{
    account::{Account, AccountId, NewAccount},
    clock::{Clock, SystemClock},
    transaction::{NewTransaction, Transaction, TransactionId},
};

use crate::{
    error::InfraError,
    repository::{AccountRepository, TransactionRepository},
};

// ===== MockAccountRepository =====

#[derive(Clone, Default)]
pub struct MockAccountRepository {
    accounts:    Arc<Mutex<Vec<Account>>>,
    fail_insert: bool,
    fail_find:   bool,
    delay:       Option<Duration>,
}

impl MockAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// insert が常に失敗する
    pub fn failing_insert(mut self) -> Self {
        self.fail_insert = true;
        self
    }

    /// find_by_id が常に失敗する
    pub fn failing_find(mut self) -> Self {
        self.fail_find = true;
        self
    }

    /// 各操作の前に待機する（タイムアウトの再現用）
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn wait(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    /// 保存済みの口座（作成順）
    pub fn accounts(&self) -> Vec<Account> {
        self.accounts.lock().unwrap().clone()
    }

    pub fn contains(&self, id: AccountId) -> bool {
        self.accounts.lock().unwrap().iter().any(|a| a.id() == id)
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn insert(&self, account: &NewAccount) -> Result<Account, InfraError> {
        self.wait().await;
        if self.fail_insert {
            return Err(InfraError::unexpected("口座の INSERT に失敗しました（模擬）"));
        }
        let mut accounts = self.accounts.lock().unwrap();
        let id = AccountId::from_i64(accounts.len() as i64 + 1);
        let created = Account::from_db(id, account.document_number.clone());
        accounts.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, InfraError> {
        self.wait().await;
        if self.fail_find {
            return Err(InfraError::unexpected("口座の取得に失敗しました（模擬）"));
        }
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id() == id)
            .cloned())
    }
}

// ===== MockTransactionRepository =====

/// 取引のインメモリリポジトリ
///
/// `event_date` は注入した [`Clock`] で決める。
/// [`with_accounts`](Self::with_accounts) で口座リポジトリを渡すと、
/// 存在しない口座への INSERT を外部キー違反として失敗させる。
#[derive(Clone)]
pub struct MockTransactionRepository {
    transactions:   Arc<Mutex<Vec<Transaction>>>,
    clock:          Arc<dyn Clock>,
    accounts:       Option<MockAccountRepository>,
    fail_insert:    bool,
    fail_find:      bool,
    lose_on_insert: bool,
}

impl Default for MockTransactionRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransactionRepository {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            transactions: Arc::new(Mutex::new(Vec::new())),
            clock,
            accounts: None,
            fail_insert: false,
            fail_find: false,
            lose_on_insert: false,
        }
    }

    /// 口座の存在チェックを有効にする
    pub fn with_accounts(mut self, accounts: MockAccountRepository) -> Self {
        self.accounts = Some(accounts);
        self
    }

    /// insert が常に失敗する
    pub fn failing_insert(mut self) -> Self {
        self.fail_insert = true;
        self
    }

    /// find_by_id が常に失敗する
    pub fn failing_find(mut self) -> Self {
        self.fail_find = true;
        self
    }

    /// insert は ID を返すが行を保存しない（再取得で見つからない）
    pub fn losing_rows(mut self) -> Self {
        self.lose_on_insert = true;
        self
    }

    /// 保存済みの取引（作成順）
    pub fn transactions(&self) -> Vec<Transaction> {
        self.transactions.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransactionRepository for MockTransactionRepository {
    async fn insert(&self, transaction: &NewTransaction) -> Result<TransactionId, InfraError> {
        if self.fail_insert {
            return Err(InfraError::unexpected("取引の INSERT に失敗しました（模擬）"));
        }
        if self
            .accounts
            .as_ref()
            .is_some_and(|accounts| !accounts.contains(transaction.account_id))
        {
            return Err(InfraError::unexpected(format!(
                "外部キー制約違反: account_id={}",
                transaction.account_id
            )));
        }

        let mut transactions = self.transactions.lock().unwrap();
        let id = TransactionId::from_i64(transactions.len() as i64 + 1);
        if !self.lose_on_insert {
            transactions.push(Transaction::from_db(
                id,
                transaction.account_id,
                transaction.operation_type,
                transaction.amount,
                self.clock.now(),
            ));
        }
        Ok(id)
    }

    async fn find_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, InfraError> {
        if self.fail_find {
            return Err(InfraError::unexpected("取引の取得に失敗しました（模擬）"));
        }
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id() == id)
            .cloned())
    }
}
