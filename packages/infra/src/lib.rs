//! # RecipeBox インフラ層
//!
//! 外部システム（PostgreSQL）との接続と、暗号処理（Argon2id、JWT）を担当する。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理とマイグレーション
//! - **リポジトリ実装**: ユーザー・レシピの永続化
//! - **パスワードハッシュ**: Argon2id によるハッシュ化と検証
//! - **アクセストークン**: HS256 JWT の発行と検証
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`password`] - パスワードハッシュ
//! - [`repository`] - リポジトリトレイトと PostgreSQL 実装
//! - [`token`] - アクセストークンサービス
//! - `mock` - インメモリリポジトリ（`test-utils` feature）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use recipebox_infra::{db, repository::PostgresRecipeRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool("postgres://localhost/recipebox").await?;
//!     db::run_migrations(&pool).await?;
//!
//!     let recipes = PostgresRecipeRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod password;
pub mod repository;
pub mod token;

pub use error::{InfraError, InfraErrorKind};
pub use password::{Argon2PasswordHasher, PasswordHasher};
pub use token::{InvalidToken, JwtTokenService, TokenService};
