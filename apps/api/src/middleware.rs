//! # 認証ゲート
//!
//! `Authorization: Bearer <token>` ヘッダーのアクセストークンを検証し、
//! 成功した場合は [`AuthenticatedUser`] をリクエストの extensions に格納する。
//!
//! トークンの欠落・形式不正・署名不一致・期限切れは区別せず、すべて
//! 403 `{"success": false, "message": "Unauthorized"}` を返す。
//!
//! ## 使い方
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//!
//! Router::new()
//!     .route("/recipes", post(create_recipe))
//!     .route_layer(from_fn_with_state(auth_gate_state, require_authentication))
//! ```

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use recipebox_domain::user::UserId;
use recipebox_infra::{InvalidToken, TokenService};

use crate::error::ApiError;

const BEARER_PREFIX: &str = "Bearer ";

/// 認証ゲートの状態
#[derive(Clone)]
pub struct AuthGateState {
    pub token_service: Arc<dyn TokenService>,
}

/// 認証済みユーザー
///
/// 認証ゲートを通過したリクエストでは `Extension<AuthenticatedUser>` で取得できる。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
}

/// 認証ミドルウェア
pub async fn require_authentication(
    State(state): State<AuthGateState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let verified = bearer_token(request.headers())
        .ok_or(InvalidToken)
        .and_then(|token| state.token_service.verify(token));

    match verified {
        Ok(user_id) => {
            request
                .extensions_mut()
                .insert(AuthenticatedUser { user_id });
            next.run(request).await
        }
        Err(_) => {
            tracing::warn!("アクセストークンの検証に失敗しました");
            ApiError::Unauthorized.into_response()
        }
    }
}
