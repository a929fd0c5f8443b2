//! # リポジトリ
//!
//! 永続化操作のトレイトと PostgreSQL 実装を提供する。
//!
//! ユースケース層はトレイト経由でのみリポジトリを利用し、テストでは
//! `mock` モジュールのインメモリ実装に差し替える。

pub mod recipe_repository;
pub mod user_repository;

pub use recipe_repository::{PostgresRecipeRepository, RecipeRepository};
pub use user_repository::{PostgresUserRepository, UserRepository};
