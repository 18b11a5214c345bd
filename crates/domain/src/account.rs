//! # 口座
//!
//! 口座は DB が採番する ID と、11 文字の書類番号（document number）のみを持つ。
//! 作成後は読み取り専用（更新・削除は提供しない）。
//!
//! ## 設計判断
//!
//! - `AccountId` は DB の `BIGINT` をラップする Newtype。生成は DB の責務のため
//!   アプリケーション側での採番手段は持たない
//! - `DocumentNumber` は生成時に長さを検証し、不正な値の存在を型レベルで排除する

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// 書類番号の文字数
pub const DOCUMENT_NUMBER_LENGTH: usize = 11;

/// 口座 ID
///
/// パスパラメータ由来の値（0 や負数を含む）もそのまま保持できる。
/// 正の値であることはペイロード検証側の責務。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct AccountId(i64);

impl AccountId {
    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// 書類番号（値オブジェクト）
///
/// # 不変条件
///
/// - ちょうど 11 文字（Unicode スカラー値で数える）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct DocumentNumber(String);

impl DocumentNumber {
    /// 書類番号を作成する
    ///
    /// # エラー
    ///
    /// 文字数が 11 でない場合は `DomainError::InvalidValue` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let length = value.chars().count();
        if length != DOCUMENT_NUMBER_LENGTH {
            return Err(DomainError::InvalidValue(format!(
                "書類番号は {DOCUMENT_NUMBER_LENGTH} 文字である必要があります（{length} 文字）"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 口座エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id:              AccountId,
    document_number: DocumentNumber,
}

impl Account {
    /// DB の行から復元する
    pub fn from_db(id: AccountId, document_number: DocumentNumber) -> Self {
        Self {
            id,
            document_number,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn document_number(&self) -> &DocumentNumber {
        &self.document_number
    }
}

/// 口座作成の入力
///
/// ID は DB が採番するため持たない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub document_number: DocumentNumber,
}
