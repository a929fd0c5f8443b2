//! # 認証ユースケース
//!
//! ## タイミング攻撃対策
//!
//! ユーザーが存在しない場合もダミーハッシュで検証を実行し、
//! 「ユーザーが存在しない」と「パスワードが違う」の処理時間を揃える。
//! エラーメッセージも同一にする。

use std::sync::Arc;

use async_trait::async_trait;
use recipebox_domain::{
    password::{PasswordHash, PlainPassword},
    user::{UserId, Username},
};
use recipebox_infra::{PasswordHasher, TokenService, repository::UserRepository};

use super::AuthUseCase;
use crate::error::ApiError;

pub const EMPTY_CREDENTIALS_MESSAGE: &str = "username or password can not be empty";
pub const INCORRECT_CREDENTIALS_MESSAGE: &str = "Incorrect username or password";
pub const LOGIN_FAILED_MESSAGE: &str = "login failed.";

/// 有効な Argon2id 形式のダミーハッシュ
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=65536,t=1,p=1$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// ログイン結果
#[derive(Debug, Clone)]
pub struct LoginOutput {
    pub access_token: String,
    pub user_id:      UserId,
    pub username:     Username,
}

/// 認証ユースケースの実装
pub struct AuthUseCaseImpl {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_service:   Arc<dyn TokenService>,
}

impl AuthUseCaseImpl {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_service: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            token_service,
        }
    }

    /// ダミーハッシュで検証を実行する（結果は使わない）
    fn dummy_verification(&self, password: &PlainPassword) {
        let dummy_hash = PasswordHash::new(DUMMY_HASH);
        let _ = self.password_hasher.verify(password, &dummy_hash);
    }
}

fn incorrect_credentials() -> ApiError {
    ApiError::Validation(INCORRECT_CREDENTIALS_MESSAGE.to_string())
}

fn login_failed() -> ApiError {
    ApiError::Internal(LOGIN_FAILED_MESSAGE.to_string())
}

#[async_trait]
impl AuthUseCase for AuthUseCaseImpl {
    #[tracing::instrument(skip_all)]
    async fn login(
        &self,
        username: &str,
        password: &PlainPassword,
    ) -> Result<LoginOutput, ApiError> {
        if username.is_empty() || password.is_empty() {
            return Err(ApiError::Validation(EMPTY_CREDENTIALS_MESSAGE.to_string()));
        }
        let username = Username::new(username)
            .map_err(|_| ApiError::Validation(EMPTY_CREDENTIALS_MESSAGE.to_string()))?;

        let user = self
            .user_repository
            .find_by_username(&username)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, span_trace = %e.span_trace(), "ユーザー検索に失敗");
                login_failed()
            })?;

        let Some(user) = user else {
            self.dummy_verification(password);
            tracing::warn!("ログイン失敗: ユーザーが存在しない");
            return Err(incorrect_credentials());
        };

        let verified = self
            .password_hasher
            .verify(password, user.password_hash())
            .map_err(|e| {
                tracing::error!(error = %e, user_id = %user.id(), "パスワード検証に失敗");
                login_failed()
            })?;

        if !verified.is_match() {
            tracing::warn!(user_id = %user.id(), "ログイン失敗: パスワード不一致");
            return Err(incorrect_credentials());
        }

        let access_token = self.token_service.issue(user.id()).map_err(|e| {
            tracing::error!(error = %e, user_id = %user.id(), "トークンの発行に失敗");
            login_failed()
        })?;

        tracing::info!(user_id = %user.id(), "ログイン成功");

        Ok(LoginOutput {
            access_token,
            user_id: *user.id(),
            username: user.username().clone(),
        })
    }
}
