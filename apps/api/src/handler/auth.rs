//! # 認証ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /login` - ログインしてアクセストークンを取得

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use recipebox_domain::{
    password::PlainPassword,
    recipe::INVALID_BODY_MESSAGE,
    user::{UserId, Username},
};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, usecase::AuthUseCase};

/// 認証ハンドラの共有状態
pub struct AuthState {
    pub usecase: Arc<dyn AuthUseCase>,
}

// --- リクエスト/レスポンス型 ---

/// ログインリクエスト
///
/// 欠落したフィールドは空文字列として扱い、ユースケースで検証する。
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// ログインユーザーの公開情報
#[derive(Debug, Serialize)]
pub struct LoginUserData {
    pub id:       UserId,
    pub username: Username,
}

/// ログインレスポンス
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success:      bool,
    pub access_token: String,
    pub data:         LoginUserData,
}

// --- ハンドラ ---

/// POST /login
pub async fn login(
    State(state): State<Arc<AuthState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(req) = body.map_err(|e| {
        tracing::debug!(error = %e, "リクエストボディのパースに失敗");
        ApiError::Validation(INVALID_BODY_MESSAGE.to_string())
    })?;

    let output = state
        .usecase
        .login(&req.username, &PlainPassword::new(req.password))
        .await?;

    Ok(Json(LoginResponse {
        success:      true,
        access_token: output.access_token,
        data:         LoginUserData {
            id:       output.user_id,
            username: output.username,
        },
    }))
}
