//! # API レスポンスエンベロープ
//!
//! 公開 API の成功レスポンス形式 `{ "success": true, "data": T }` を提供する。
//! 失敗時の形式は [`ErrorResponse`](crate::ErrorResponse) を参照。

use serde::{Deserialize, Serialize};

/// データを伴う成功レスポンス
///
/// ## 使用例
///
/// ```
/// use recipebox_shared::ApiResponse;
///
/// let response = ApiResponse::new("hello");
/// assert!(response.success);
/// assert_eq!(response.data, "hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data:    T,
}

impl<T> ApiResponse<T> {
    /// 新しい `ApiResponse` を作成する
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// メッセージのみの成功レスポンス
///
/// 削除のように返すべきデータがない操作で使用する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
