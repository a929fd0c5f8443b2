//! # エラーレスポンス
//!
//! 全エンドポイントで共通の失敗レスポンス `{ "success": false, "message": "..." }`。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - エラー種別は HTTP ステータスコードで表現し、ボディには含めない
//! - `message` はクライアントとの契約の一部であり、文言を変えてはならない

use serde::{Deserialize, Serialize};

/// 認証エラー時の固定メッセージ
///
/// トークン欠落・署名不正・期限切れのいずれでも同じ文言を返す。
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// 内部エラー時の固定メッセージ
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// 失敗レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    /// 任意のメッセージで失敗レスポンスを作成する
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    /// 認証エラー
    pub fn unauthorized() -> Self {
        Self::new(UNAUTHORIZED_MESSAGE)
    }

    /// 内部エラー
    ///
    /// message は固定値（内部情報を漏らさないため）。
    pub fn internal_error() -> Self {
        Self::new(INTERNAL_ERROR_MESSAGE)
    }
}
