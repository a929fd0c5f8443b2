//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュールで re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックは usecase 層に委譲
//!
//! ## ハンドラ一覧
//!
//! - `health`: ヘルスチェック
//! - `auth`: ログイン
//! - `recipe`: レシピ CRUD

pub mod auth;
pub mod health;
pub mod recipe;

pub use auth::{AuthState, login};
pub use health::{ReadinessState, health_check, readiness_check};
pub use recipe::{RecipeState, create_recipe, delete_recipe, get_recipe, list_recipes, update_recipe};
