//! # ユーザー
//!
//! ログインの主体となるユーザーエンティティを定義する。
//!
//! ユーザーはアカウント作成 CLI（`create-user`）でのみ作成され、API からは
//! ユーザー名による参照しか行わない。
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use recipebox_domain::{
//!     password::PasswordHash,
//!     user::{User, UserId, Username},
//! };
//!
//! let user = User::new(
//!     UserId::new(),
//!     Username::new("okay")?,
//!     PasswordHash::new("$argon2id$v=19$m=65536,t=1,p=1$..."),
//! );
//! assert_eq!(user.username().as_str(), "okay");
//! # Ok(())
//! # }
//! ```

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{DomainError, password::PasswordHash};

define_uuid_id! {
    /// ユーザー ID
    ///
    /// アクセストークンの subject として使われる。
    pub struct UserId;
}

/// ユーザー名（値オブジェクト）
///
/// 大文字小文字を区別する。空文字列は許可しない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct Username(String);

impl Username {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::validation("username can not be empty"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// ユーザーエンティティ
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    username: Username,
    password_hash: PasswordHash,
}

impl User {
    pub fn new(id: UserId, username: Username, password_hash: PasswordHash) -> Self {
        Self {
            id,
            username,
            password_hash,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_ユーザー名は空文字列を拒否する() {
        let result = Username::new("");

        assert_eq!(
            result,
            Err(DomainError::Validation(
                "username can not be empty".to_string()
            ))
        );
    }

    #[rstest]
    #[case("okay")]
    #[case("Okay")]
    #[case("山田")]
    fn test_ユーザー名は空でなければ受け付ける(#[case] input: &str) {
        let username = Username::new(input).unwrap();

        assert_eq!(username.as_str(), input);
    }

    #[rstest]
    fn test_ユーザーidはuuidとしてシリアライズされる() {
        let id = UserId::new();

        let json = serde_json::to_value(id).unwrap();

        assert_eq!(json, serde_json::Value::String(id.to_string()));
    }

    #[rstest]
    fn test_ユーザーのdebug出力にハッシュが含まれない() {
        let user = User::new(
            UserId::new(),
            Username::new("okay").unwrap(),
            PasswordHash::new("$argon2id$v=19$secret"),
        );

        let debug = format!("{user:?}");

        assert!(!debug.contains("argon2id"));
    }
}
