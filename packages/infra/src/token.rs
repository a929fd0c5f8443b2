//! # アクセストークン
//!
//! HS256 で署名した JWT を発行・検証する。
//!
//! ## クレーム
//!
//! | クレーム | 内容 |
//! |---------|------|
//! | `sub` | ユーザー ID |
//! | `iat` | 発行時刻（UNIX 秒） |
//! | `exp` | 有効期限（UNIX 秒） |
//!
//! 有効期限の判定はライブラリに任せず、注入された [`Clock`] の時刻で行う
//! （`now >= exp` で期限切れ、猶予なし）。

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use recipebox_domain::{clock::Clock, user::UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::InfraError;

/// トークン検証の失敗
///
/// 署名不一致・形式不正・期限切れを区別しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid access token")]
pub struct InvalidToken;

/// アクセストークンの発行と検証を担当するトレイト
pub trait TokenService: Send + Sync {
    /// ユーザー ID を subject とするトークンを発行する
    fn issue(&self, subject: &UserId) -> Result<String, InfraError>;

    /// トークンを検証し、subject を返す
    fn verify(&self, token: &str) -> Result<UserId, InvalidToken>;
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// HS256 JWT による実装
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation:   Validation,
    ttl:          Duration,
    clock:        Arc<dyn Clock>,
}

impl JwtTokenService {
    pub fn new(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
            clock,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, subject: &UserId) -> Result<String, InfraError> {
        let now = self.clock.now();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| InfraError::unexpected(format!("トークンの署名に失敗しました: {e}")))
    }

    fn verify(&self, token: &str) -> Result<UserId, InvalidToken> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "トークンのデコードに失敗");
            InvalidToken
        })?;

        if self.clock.now().timestamp() >= data.claims.exp {
            tracing::debug!("トークンの有効期限切れ");
            return Err(InvalidToken);
        }

        let subject = Uuid::parse_str(&data.claims.sub).map_err(|_| InvalidToken)?;
        Ok(UserId::from_uuid(subject))
    }
}
