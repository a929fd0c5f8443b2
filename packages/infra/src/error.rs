//! # インフラ層エラー定義
//!
//! リポジトリ・パスワードハッシュ・トークン発行で発生するエラー。
//!
//! [`InfraError`] は種別（[`InfraErrorKind`]）に加えて、生成時点の
//! [`SpanTrace`] を保持する。API 層はこれをログに出し、どのユースケースの
//! どのクエリで失敗したかを追跡できるようにする。
//!
//! ```ignore
//! if let Some((entity, id)) = error.as_conflict() {
//!     // 重複登録
//! }
//! ```

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
#[derive(Debug, Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// クエリ実行・接続の失敗
    #[error("データベースエラー: {0}")]
    Database(#[source] sqlx::Error),

    /// 一意制約違反（ユーザー名の重複など）
    #[error("既に存在します: {entity}(id={id})")]
    Conflict { entity: String, id: String },

    /// 不正なハッシュ形式や、DB に保存された不正な値
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl InfraError {
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// 一意制約違反であれば entity と id を返す
    pub fn as_conflict(&self) -> Option<(&str, &str)> {
        if let InfraErrorKind::Conflict { entity, id } = &self.kind {
            Some((entity, id))
        } else {
            None
        }
    }

    pub fn conflict(entity: impl Into<String>, id: impl Into<String>) -> Self {
        InfraErrorKind::Conflict {
            entity: entity.into(),
            id:     id.into(),
        }
        .into()
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        InfraErrorKind::Unexpected(message.into()).into()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

/// 種別からエラーを生成する（現在のスパンを記録する）
impl From<InfraErrorKind> for InfraError {
    fn from(kind: InfraErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }
}

impl From<sqlx::Error> for InfraError {
    fn from(source: sqlx::Error) -> Self {
        InfraErrorKind::Database(source).into()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    fn with_error_layer(f: impl FnOnce()) {
        let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
        let _guard = tracing::subscriber::set_default(subscriber);
        f();
    }

    #[test]
    fn test_from_sqlx_errorでspan_traceがキャプチャされる() {
        with_error_layer(|| {
            let span = tracing::info_span!("find_recipe");
            let _enter = span.enter();

            let err: InfraError = sqlx::Error::RowNotFound.into();

            assert!(matches!(err.kind(), InfraErrorKind::Database(_)));
            let trace_str = format!("{}", err.span_trace());
            assert!(
                trace_str.contains("find_recipe"),
                "SpanTrace がスパン名を含むこと: {trace_str}",
            );
        });
    }

    #[test]
    fn test_conflictでspan_traceがキャプチャされる() {
        with_error_layer(|| {
            let span = tracing::info_span!("insert_user");
            let _enter = span.enter();

            let err = InfraError::conflict("User", "admin");

            assert_eq!(err.as_conflict(), Some(("User", "admin")));
            assert!(format!("{}", err.span_trace()).contains("insert_user"));
        });
    }

    #[test]
    fn test_unexpectedの種別とメッセージ() {
        let err = InfraError::unexpected("不正なハッシュ形式");

        assert!(matches!(
            err.kind(),
            InfraErrorKind::Unexpected(msg) if msg == "不正なハッシュ形式"
        ));
        assert!(err.as_conflict().is_none());
    }

    #[test]
    fn test_displayがinfra_error_kindのメッセージを出力する() {
        let err = InfraError::conflict("User", "admin");

        assert_eq!(format!("{err}"), "既に存在します: User(id=admin)");
    }

    #[test]
    fn test_sourceがinfra_error_kindに委譲する() {
        use std::error::Error;

        let err: InfraError = sqlx::Error::RowNotFound.into();

        assert!(err.source().is_some());
        assert!(InfraError::unexpected("x").source().is_none());
    }
}
