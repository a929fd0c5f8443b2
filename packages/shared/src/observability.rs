//! # ロギング・トレーシング
//!
//! `tracing-subscriber` の初期化と、HTTP リクエストごとのスパン生成を提供する。
//!
//! | 環境変数 | 値 | 既定 |
//! |---------|----|------|
//! | `LOG_FORMAT` | `json` / `pretty`（大文字小文字を区別しない） | `pretty` |
//! | `RUST_LOG` | `EnvFilter` の書式 | `info,recipebox=debug` |

use std::str::FromStr;

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_LOG_FILTER: &str = "info,recipebox=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 行 1 イベントの JSON（本番向け）
    Json,
    #[default]
    Pretty,
}

/// 未知の `LOG_FORMAT` 値
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLogFormat(pub String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            _ => Err(UnknownLogFormat(s.to_string())),
        }
    }
}

impl LogFormat {
    /// `LOG_FORMAT` から読み取る。未知の値は `Pretty` として扱う
    pub fn from_env() -> Self {
        let Ok(raw) = std::env::var("LOG_FORMAT") else {
            return Self::default();
        };
        raw.parse().unwrap_or_else(|UnknownLogFormat(value)| {
            // subscriber 初期化前なので stderr に直接出す
            eprintln!("WARNING: unknown LOG_FORMAT={value:?}, falling back to pretty");
            Self::default()
        })
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub service_name: String,
    pub log_format:   LogFormat,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
        }
    }

    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::new(service_name, LogFormat::from_env())
    }
}

/// グローバル subscriber を登録する
///
/// `ErrorLayer` も併せて登録するため、以降に生成された `SpanTrace` には
/// 呼び出し時点のスパン階層が記録される。
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) {
    use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let output = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().with_target(false).boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .with(tracing_error::ErrorLayer::default())
        .init();

    tracing::debug!(
        service = %config.service_name,
        format = ?config.log_format,
        "トレーシングを初期化しました"
    );
}

/// `TraceLayer::make_span_with` 用のリクエストスパン
///
/// クエリ文字列とヘッダーは記録しない（`Authorization` を含むため）。
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_log_formatのパース() {
        assert_eq!("json".parse(), Ok(LogFormat::Json));
        assert_eq!("JSON".parse(), Ok(LogFormat::Json));
        assert_eq!("pretty".parse(), Ok(LogFormat::Pretty));
    }

    #[test]
    fn test_未知のlog_formatはエラー() {
        assert_eq!(
            "yaml".parse::<LogFormat>(),
            Err(UnknownLogFormat("yaml".to_string()))
        );
        assert_eq!(
            "".parse::<LogFormat>(),
            Err(UnknownLogFormat(String::new()))
        );
    }

    #[test]
    fn test_log_formatの既定値はpretty() {
        assert_eq!(LogFormat::default(), LogFormat::Pretty);
    }

    #[cfg(feature = "observability")]
    #[test]
    fn test_make_request_spanはヘッダーを含むリクエストでもスパンを返す() {
        let request = http::Request::builder()
            .uri("/recipes?x=1")
            .header("authorization", "Bearer secret")
            .body(())
            .unwrap();

        let span = make_request_span(&request);

        // subscriber 未登録なので無効なスパンになる
        assert!(span.is_disabled());
    }
}
