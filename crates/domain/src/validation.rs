//! # ペイロード検証
//!
//! リクエストペイロードのフィールド制約を検証し、違反を 1 つのメッセージにまとめる。
//!
//! ## 仕組み
//!
//! 検証は 2 段構成:
//!
//! 1. **宣言的制約**: ペイロード型に `#[derive(validator::Validate)]` で付与する
//!    （`required` / `length(equal = ..)` / `range(exclusive_min = ..)`）
//! 2. **カスタムルール**: [`ValidationRules`] に名前付きで登録する述語。
//!    ペイロードは [`ValidatedPayload::rule_targets`] でどのフィールドにどのルールを
//!    適用するかを宣言する
//!
//! [`RequestValidator`] は両方を実行し、違反を**短絡せず**すべて収集する。
//! 報告順はフィールドの宣言順 → 制約の宣言順で決定的。
//!
//! ## 制約タグ
//!
//! | タグ | 意味 |
//! |------|------|
//! | `required` | フィールドが存在する |
//! | `len` | 文字数が一致する |
//! | `gt` | 0 より大きい |
//! | `operationtype` | 登録済みの取引種別 ID である |
//!
//! ## メッセージ形式
//!
//! ```text
//! Field '<name>' with value '<value>' failed validation, reason: '<tag>'.
//! ```
//!
//! 違反ごとに上記を連結する（各メッセージは空白で終わる）。

use std::{collections::HashMap, fmt, sync::Arc};

use validator::{Validate, ValidationError};

use crate::{DomainError, transaction::OperationType};

/// 制約タグ
pub mod tag {
    pub const REQUIRED: &str = "required";
    pub const LEN: &str = "len";
    pub const GT: &str = "gt";
    pub const OPERATION_TYPE: &str = "operationtype";
}

type RulePredicate = Arc<dyn Fn(i64) -> bool + Send + Sync>;

/// カスタムルールのレジストリ
///
/// 起動時に一度だけ構築し、以後は読み取り専用。
#[derive(Clone, Default)]
pub struct ValidationRules {
    rules: HashMap<&'static str, RulePredicate>,
}

impl ValidationRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// 名前付きルールを登録する
    ///
    /// 同名のルールは上書きされる。
    pub fn register(
        mut self,
        name: &'static str,
        predicate: impl Fn(i64) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.rules.insert(name, Arc::new(predicate));
        self
    }

    /// 許可する取引種別 ID の集合を `operationtype` ルールとして登録する
    pub fn register_operation_types(self, ids: impl IntoIterator<Item = i64>) -> Self {
        let allowed: Vec<i64> = ids.into_iter().collect();
        self.register(tag::OPERATION_TYPE, move |value| allowed.contains(&value))
    }

    /// ルールを評価する
    ///
    /// 未登録のルール名は `None`。
    pub fn check(&self, name: &str, value: i64) -> Option<bool> {
        self.rules.get(name).map(|predicate| predicate(value))
    }

}

impl fmt::Debug for ValidationRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.rules.keys().copied().collect();
        names.sort_unstable();
        f.debug_struct("ValidationRules")
            .field("rules", &names)
            .finish()
    }
}

/// カスタムルールの適用対象
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleTarget {
    pub field: &'static str,
    pub rule:  &'static str,
    pub value: i64,
}

/// 検証対象のペイロード
pub trait ValidatedPayload: Validate {
    /// JSON 上のフィールド名（宣言順）
    ///
    /// 違反の報告順はこの順序に従う。
    const FIELD_ORDER: &'static [&'static str];

    /// カスタムルールの適用対象
    ///
    /// 値が存在しないフィールドは含めない（`required` で報告される）。
    fn rule_targets(&self) -> Vec<RuleTarget> {
        Vec::new()
    }
}

/// 1 件のフィールド制約違反
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub value: String,
    pub tag:   String,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Field '{}' with value '{}' failed validation, reason: '{}'. ",
            self.field, self.value, self.tag
        )
    }
}

/// 検証失敗（違反は 1 件以上）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    violations: Vec<FieldViolation>,
}

impl ValidationFailure {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.violations
            .iter()
            .try_for_each(|violation| write!(f, "{violation}"))
    }
}

/// リクエストバリデータ
///
/// [`ValidationRules`] を所有し、ハンドラの State 経由で共有される。
#[derive(Debug, Clone)]
pub struct RequestValidator {
    rules: ValidationRules,
}

impl RequestValidator {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    /// 定義済みの取引種別を登録したバリデータを作成する
    pub fn with_default_rules() -> Self {
        Self::new(ValidationRules::new().register_operation_types(OperationType::all_ids()))
    }

    /// ペイロードを検証する
    ///
    /// # エラー
    ///
    /// 違反が 1 件以上ある場合は `DomainError::Validation` を返す。
    /// 未登録のカスタムルールを参照した場合も違反として扱う。
    pub fn validate<T: ValidatedPayload>(&self, payload: &T) -> Result<(), DomainError> {
        let declared = payload.validate().err();
        let targets = payload.rule_targets();

        let mut violations = Vec::new();
        for &field in T::FIELD_ORDER {
            if let Some(errors) = declared
                .as_ref()
                .and_then(|errors| errors.field_errors().get(field).copied())
            {
                violations.extend(errors.iter().map(|error| violation_from(field, error)));
            }

            for target in targets.iter().filter(|t| t.field == field) {
                if self.rules.check(target.rule, target.value) != Some(true) {
                    violations.push(FieldViolation {
                        field: field.to_string(),
                        value: target.value.to_string(),
                        tag:   target.rule.to_string(),
                    });
                }
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(ValidationFailure { violations }))
        }
    }
}

impl Default for RequestValidator {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

/// validator クレートのエラーを違反に変換する
///
/// 値は `value` パラメータから取り出す。値がない（`required` 違反）場合は空文字列。
fn violation_from(field: &str, error: &ValidationError) -> FieldViolation {
    FieldViolation {
        field: field.to_string(),
        value: render_value(error.params.get("value")),
        tag:   error.code.to_string(),
    }
}

/// 違反メッセージに埋め込む値の表記
///
/// 浮動小数点数は整数値なら小数部を付けない（`-1.0` → `-1`）。
fn render_value(value: Option<&serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) if n.is_f64() => {
            n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string())
        }
        Some(other) => other.to_string(),
    }
}
