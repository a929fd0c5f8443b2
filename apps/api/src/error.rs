//! # API エラーハンドリング
//!
//! API 層のエラー定義と、axum レスポンスへの変換を行う。
//!
//! ## エラーの階層
//!
//! ```text
//! DomainError / InfraError
//!        ↓ 変換
//! ApiError
//!        ↓ IntoResponse
//! HTTP レスポンス (StatusCode + { "success": false, "message": ... })
//! ```
//!
//! | バリアント | ステータス | message |
//! |-----------|-----------|---------|
//! | `Validation` | 400 | 検証エラーの文言 |
//! | `Unauthorized` | 403 | `"Unauthorized"` |
//! | `NotFound` | 400 | `"Recipe with id <id> does not exist"` |
//! | `Internal` | 500 | 保持している公開用メッセージ |
//! | `Database` | 500 | `"internal server error"` |
//!
//! 存在しないレコードも 400 で返す（404 は使わない）。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use recipebox_domain::DomainError;
use recipebox_infra::InfraError;
use recipebox_shared::ErrorResponse;
use thiserror::Error;

/// API 層で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// 入力値の検証エラー
    #[error("{0}")]
    Validation(String),

    /// 認証エラー（トークン欠落・不正・期限切れ）
    #[error("Unauthorized")]
    Unauthorized,

    /// 対象が存在しない（ID の形式不正を含む）
    #[error("{0}")]
    NotFound(String),

    /// 内部エラー（message はクライアントにそのまま返す）
    #[error("{0}")]
    Internal(String),

    /// インフラ層のエラー
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(message) => Self::Validation(message),
            not_found @ DomainError::NotFound { .. } => Self::NotFound(not_found.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(message) | ApiError::NotFound(message) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new(message))
            }
            ApiError::Unauthorized => (StatusCode::FORBIDDEN, ErrorResponse::unauthorized()),
            ApiError::Internal(message) => {
                tracing::error!(message = %message, "内部エラー");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new(message))
            }
            ApiError::Database(e) => {
                tracing::error!(
                    error.category = "infrastructure",
                    error.kind = "database",
                    span_trace = %e.span_trace(),
                    "データベースエラー: {}",
                    e
                );
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal_error())
            }
        };

        (status, Json(body)).into_response()
    }
}
