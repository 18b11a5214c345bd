//! # Observability 基盤
//!
//! トレーシング初期化とリクエストログの設定を提供する。
//! ログレベルと出力形式（JSON / Pretty）は設定ファイルから渡される。

/// ログ出力形式
///
/// 値が不正な場合は [`Pretty`](LogFormat::Pretty) にフォールバックする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON 形式（本番環境向け）
    Json,
    /// 人間が読みやすい形式（開発環境向け）
    #[default]
    Pretty,
}

impl LogFormat {
    /// 文字列からログ形式をパースする
    ///
    /// 不正な値の場合は [`Pretty`](LogFormat::Pretty) にフォールバックし、
    /// stderr に警告を出力する（subscriber 初期化前のため tracing は使えない）。
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => Self::Json,
            "pretty" | "text" => Self::Pretty,
            other => {
                eprintln!("WARNING: unknown log format {other:?}, falling back to pretty");
                Self::Pretty
            }
        }
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// サービス名（起動ログに出力）
    pub service_name:   String,
    /// ログ出力形式
    pub log_format:     LogFormat,
    /// `RUST_LOG` 未設定時に使うフィルタ（例: `"info"`, `"debug,sqlx=warn"`）
    pub default_filter: String,
}

impl TracingConfig {
    /// 新しい設定を作成する
    pub fn new(
        service_name: impl Into<String>,
        log_format: LogFormat,
        default_filter: impl Into<String>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
            default_filter: default_filter.into(),
        }
    }
}

/// トレーシングを初期化する
///
/// `RUST_LOG` 環境変数が設定されていればそちらを優先する。
/// `ErrorLayer` を登録し、エラー生成時の `SpanTrace` が取得できるようにする。
#[cfg(feature = "observability")]
pub fn init_tracing(config: TracingConfig) {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.default_filter.as_str().into());

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();

    tracing::debug!(service = %config.service_name, "トレーシングを初期化しました");
}

/// リクエストごとのスパンを生成する
///
/// `TraceLayer::make_span_with` に渡す。メソッドとパスをフィールドに持つため、
/// ハンドラ内のログにも自動的に付与される。
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
    )
}

/// レスポンス完了時のログ設定
///
/// ステータスコードと処理時間（ミリ秒）を INFO で出力する。
#[cfg(feature = "observability")]
pub fn on_response() -> tower_http::trace::DefaultOnResponse {
    tower_http::trace::DefaultOnResponse::new()
        .level(tracing::Level::INFO)
        .latency_unit(tower_http::LatencyUnit::Millis)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("json", LogFormat::Json)]
    #[case("pretty", LogFormat::Pretty)]
    #[case("text", LogFormat::Pretty)]
    #[case("unknown", LogFormat::Pretty)]
    #[case("", LogFormat::Pretty)]
    #[case("JSON", LogFormat::Pretty)]
    fn test_parseで文字列からログ形式を得る(#[case] input: &str, #[case] expected: LogFormat) {
        assert_eq!(LogFormat::parse(input), expected);
    }

    #[test]
    fn test_defaultでprettyを返す() {
        assert_eq!(LogFormat::default(), LogFormat::Pretty);
    }

    #[test]
    fn test_newでフィールドが正しく設定される() {
        let config = TracingConfig::new("ledger-service", LogFormat::Json, "debug");

        assert_eq!(config.service_name, "ledger-service");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.default_filter, "debug");
    }

    #[cfg(feature = "observability")]
    #[test]
    fn test_make_request_spanがメソッドとパスを持つスパンを返す() {
        let request = http::Request::builder()
            .method("POST")
            .uri("/v1/accounts?x=1")
            .body(())
            .unwrap();

        let span = make_request_span(&request);

        // subscriber 未登録のためスパンは無効化されるが、生成でパニックしないこと
        let _ = span.id();
    }
}
