//! # ユースケース層
//!
//! API のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **トレイトベースの設計**: ハンドラのテストでスタブに差し替えられるようトレイトを定義
//! - **依存性注入**: リポジトリ・パスワードハッシャー・トークンサービスを外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約

pub mod auth;
pub mod recipe;

use async_trait::async_trait;
pub use auth::{AuthUseCaseImpl, LoginOutput};
use recipebox_domain::{
    password::PlainPassword,
    recipe::{Recipe, RecipePayload},
};
pub use recipe::RecipeUseCaseImpl;

use crate::error::ApiError;

/// 認証ユースケーストレイト
#[async_trait]
pub trait AuthUseCase: Send + Sync {
    /// ユーザー名とパスワードでログインし、アクセストークンを発行する
    ///
    /// ## エラー
    ///
    /// - `Validation`: 入力が空、またはユーザー名かパスワードが誤っている
    /// - `Internal`: ユーザー検索やパスワード検証の失敗
    async fn login(&self, username: &str, password: &PlainPassword)
    -> Result<LoginOutput, ApiError>;
}

/// レシピユースケーストレイト
///
/// ID はパスパラメータの文字列のまま受け取り、ユースケース内で検証する。
#[async_trait]
pub trait RecipeUseCase: Send + Sync {
    /// レシピを作成する
    async fn create(&self, payload: RecipePayload) -> Result<Recipe, ApiError>;

    /// 全レシピを取得する
    async fn list(&self) -> Result<Vec<Recipe>, ApiError>;

    /// ID でレシピを取得する
    async fn get(&self, id: &str) -> Result<Recipe, ApiError>;

    /// 指定されたフィールドのみを更新する
    async fn update(&self, id: &str, payload: RecipePayload) -> Result<Recipe, ApiError>;

    /// レシピを削除する
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}
