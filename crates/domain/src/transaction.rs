//! # 取引
//!
//! 口座に紐づく金額イベント。取引種別・金額・発生日時を持つ。
//!
//! ## ライフサイクル
//!
//! 1. 検証済みの入力から [`NewTransaction`] を組み立てる
//! 2. DB に INSERT（ID と `event_date` は DB が決定）
//! 3. 採番された ID で再取得し、完全な [`Transaction`] を得る
//!
//! 作成後は不変。
//!
//! ## 取引種別
//!
//! | ID | バリアント |
//! |----|-----------|
//! | 1 | `NormalPurchase` |
//! | 2 | `PurchaseWithInstallments` |
//! | 3 | `Withdrawal` |
//! | 4 | `CreditVoucher` |

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, FromRepr, IntoEnumIterator, IntoStaticStr};

use crate::{DomainError, account::AccountId};

/// 取引 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct TransactionId(i64);

impl TransactionId {
    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// 取引種別
///
/// JSON / DB では整数 ID として扱う。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    FromRepr,
    IntoStaticStr,
)]
#[serde(into = "i32", try_from = "i32")]
#[strum(serialize_all = "snake_case")]
#[repr(i32)]
pub enum OperationType {
    NormalPurchase = 1,
    PurchaseWithInstallments = 2,
    Withdrawal = 3,
    CreditVoucher = 4,
}

impl OperationType {
    /// 整数 ID を取得する
    pub fn id(self) -> i32 {
        self as i32
    }

    /// 整数 ID から取引種別を得る
    ///
    /// i32 の範囲外を含め、未定義の ID は `None`。
    pub fn from_id(id: i64) -> Option<Self> {
        i32::try_from(id).ok().and_then(Self::from_repr)
    }

    /// 定義済みの全 ID（昇順）
    pub fn all_ids() -> impl Iterator<Item = i64> {
        Self::iter().map(|op| i64::from(op.id()))
    }

    /// ログ出力用の名前
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

impl From<OperationType> for i32 {
    fn from(value: OperationType) -> Self {
        value.id()
    }
}

impl TryFrom<i32> for OperationType {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_repr(value)
            .ok_or_else(|| DomainError::InvalidValue(format!("未定義の取引種別です: {value}")))
    }
}

/// 取引金額（値オブジェクト）
///
/// # 不変条件
///
/// - 有限かつ 0 より大きい
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct Amount(f64);

impl Amount {
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(DomainError::InvalidValue(format!(
                "金額は 0 より大きい必要があります: {value}"
            )));
        }
        Ok(Self(value))
    }

    /// DB の値から復元する（検証しない）
    pub fn from_db(value: f64) -> Self {
        Self(value)
    }

    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

/// 取引作成の入力
///
/// ID と発生日時は DB が決定するため、ここには含めない。
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub account_id:     AccountId,
    pub operation_type: OperationType,
    pub amount:         Amount,
}

/// 取引エンティティ
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    id:             TransactionId,
    account_id:     AccountId,
    operation_type: OperationType,
    amount:         Amount,
    event_date:     DateTime<Utc>,
}

impl Transaction {
    /// DB の行から復元する
    pub fn from_db(
        id: TransactionId,
        account_id: AccountId,
        operation_type: OperationType,
        amount: Amount,
        event_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            account_id,
            operation_type,
            amount,
            event_date,
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn operation_type(&self) -> OperationType {
        self.operation_type
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn event_date(&self) -> DateTime<Utc> {
        self.event_date
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1, OperationType::NormalPurchase)]
    #[case(2, OperationType::PurchaseWithInstallments)]
    #[case(3, OperationType::Withdrawal)]
    #[case(4, OperationType::CreditVoucher)]
    fn test_定義済みidから取引種別を得る(#[case] id: i64, #[case] expected: OperationType) {
        assert_eq!(OperationType::from_id(id), Some(expected));
        assert_eq!(i64::from(expected.id()), id);
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(5)]
    #[case(i64::from(i32::MAX) + 1)]
    fn test_未定義idはnoneを返す(#[case] id: i64) {
        assert_eq!(OperationType::from_id(id), None);
    }

    #[test]
    fn test_all_idsは1から4を昇順で返す() {
        assert_eq!(OperationType::all_ids().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_取引種別は整数でシリアライズされる() {
        let json = serde_json::to_value(OperationType::Withdrawal).unwrap();
        assert_eq!(json, serde_json::json!(3));

        let parsed: OperationType = serde_json::from_value(serde_json::json!(4)).unwrap();
        assert_eq!(parsed, OperationType::CreditVoucher);

        assert!(serde_json::from_value::<OperationType>(serde_json::json!(9)).is_err());
    }

    #[test]
    fn test_as_strはスネークケース名を返す() {
        assert_eq!(
            OperationType::PurchaseWithInstallments.as_str(),
            "purchase_with_installments"
        );
    }

    #[rstest]
    #[case(0.0)]
    #[case(-10.5)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn test_正でない金額はエラー(#[case] value: f64) {
        assert!(matches!(Amount::new(value), Err(DomainError::InvalidValue(_))));
    }

    #[test]
    fn test_正の金額を作成できる() {
        assert_eq!(Amount::new(100.50).unwrap().as_f64(), 100.50);
    }

    #[test]
    fn test_from_dbで復元した取引のゲッター() {
        let event_date = Utc::now();
        let transaction = Transaction::from_db(
            TransactionId::from_i64(1),
            AccountId::from_i64(2),
            OperationType::PurchaseWithInstallments,
            Amount::from_db(100.50),
            event_date,
        );

        assert_eq!(transaction.id().as_i64(), 1);
        assert_eq!(transaction.account_id().as_i64(), 2);
        assert_eq!(transaction.operation_type(), OperationType::PurchaseWithInstallments);
        assert_eq!(transaction.amount().as_f64(), 100.50);
        assert_eq!(transaction.event_date(), event_date);
    }
}
