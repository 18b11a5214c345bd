//! # ヘルスチェック共通型
//!
//! Liveness / Readiness エンドポイントで使用されるレスポンス型を提供する。

use serde::{Deserialize, Serialize};

/// Liveness レスポンス
///
/// ## 使用例
///
/// ```
/// use ledger_shared::HealthResponse;
///
/// let response = HealthResponse::healthy("0.1.0");
/// assert_eq!(response.status, "healthy");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthResponse {
    /// 稼働状態（常に `"healthy"`）
    pub status:  String,
    /// アプリケーションバージョン
    pub version: String,
}

impl HealthResponse {
    pub fn healthy(version: impl Into<String>) -> Self {
        Self {
            status:  "healthy".to_string(),
            version: version.into(),
        }
    }
}

/// 個別チェックの結果ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum CheckStatus {
    Ok,
    Error,
}

/// Readiness 全体のステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ReadinessStatus {
    /// データストアが利用可能
    Ready,
    /// データストアが利用不可
    NotReady,
}

/// Readiness レスポンス
///
/// 依存先はデータストアのみのため、個別チェックは `database` の 1 項目。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReadinessResponse {
    pub status:   ReadinessStatus,
    pub database: CheckStatus,
}

impl ReadinessResponse {
    /// データベースのチェック結果から全体ステータスを決定する
    pub fn from_database_check(database: CheckStatus) -> Self {
        let status = match database {
            CheckStatus::Ok => ReadinessStatus::Ready,
            CheckStatus::Error => ReadinessStatus::NotReady,
        };
        Self { status, database }
    }

    pub fn is_ready(&self) -> bool {
        self.status == ReadinessStatus::Ready
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_health_responseのserializeで正しいjson形状にする() {
        let json = serde_json::to_value(HealthResponse::healthy("0.1.0")).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "status": "healthy",
                "version": "0.1.0"
            })
        );
    }

    #[test]
    fn test_database_okでreadyになる() {
        let response = ReadinessResponse::from_database_check(CheckStatus::Ok);

        assert!(response.is_ready());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({ "status": "ready", "database": "ok" })
        );
    }

    #[test]
    fn test_database_errorでnot_readyになる() {
        let response = ReadinessResponse::from_database_check(CheckStatus::Error);

        assert!(!response.is_ready());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({ "status": "not_ready", "database": "error" })
        );
    }
}
