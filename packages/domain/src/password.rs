//! # パスワード
//!
//! | 型 | 用途 |
//! |---|------|
//! | [`PlainPassword`] | ログイン時・アカウント作成時の入力値 |
//! | [`PasswordHash`] | 永続化されるダイジェスト（PHC 文字列） |
//! | [`PasswordVerifyResult`] | 検証の成否 |
//!
//! ハッシュ化と検証のアルゴリズムはインフラ層（`recipebox_infra::password`）が持つ。

use std::fmt;

/// 平文パスワード
///
/// Debug 出力では値をマスクする。
#[derive(Clone)]
pub struct PlainPassword(String);

impl fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PlainPassword").field(&"[REDACTED]").finish()
    }
}

impl PlainPassword {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// パスワードハッシュ（永続化用）
///
/// ハッシュ値そのものもログに残さないよう Debug をマスクする。
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PasswordHash").field(&"[REDACTED]").finish()
    }
}

impl PasswordHash {
    /// ハッシュ文字列から復元する（DB 読み込み時など）
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// パスワード検証結果
///
/// 不一致はエラーではなく通常の結果として扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordVerifyResult {
    Match,
    Mismatch,
}

impl PasswordVerifyResult {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }
}

impl From<bool> for PasswordVerifyResult {
    fn from(matched: bool) -> Self {
        if matched { Self::Match } else { Self::Mismatch }
    }
}
