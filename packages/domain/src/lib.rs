//! # RecipeBox ドメイン層
//!
//! レシピ管理サービスのドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain → (shared は api/infra から利用)
//! ```
//!
//! ドメイン層はインフラ層（DB、JWT、Argon2）に一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメインエラー
//! - [`clock`] - 時刻プロバイダ（トークン有効期限の判定に使用）
//! - [`password`] - 平文パスワードとハッシュの値オブジェクト
//! - [`user`] - ユーザーエンティティ
//! - [`recipe`] - レシピエンティティと入力ペイロードの検証
//!
//! ## 使用例
//!
//! ```rust
//! use recipebox_domain::{DomainError, recipe::RecipeId};
//!
//! let err = RecipeId::parse("sjsdjhdshjhjds").unwrap_err();
//! assert!(matches!(err, DomainError::NotFound { .. }));
//! assert_eq!(err.to_string(), "Recipe with id sjsdjhdshjhjds does not exist");
//! ```

#[macro_use]
mod macros;

pub mod clock;
pub mod error;
pub mod password;
pub mod recipe;
pub mod user;

pub use error::DomainError;
