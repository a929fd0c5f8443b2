//! # RecipeBox API サーバー
//!
//! レシピ管理 API のライブラリ部分。バイナリ（`recipebox-api`, `create-user`）と
//! 結合テストから利用される。
//!
//! ## リクエストの流れ
//!
//! ```text
//! POST /login ──────────────▶ AuthUseCase ──▶ UserRepository + PasswordHasher + TokenService
//!
//! POST/PATCH/DELETE /recipes ─▶ require_authentication ─▶ RecipeUseCase ─▶ RecipePayload 検証 ─▶ RecipeRepository
//!
//! GET /recipes ──────────────────────────────▶ RecipeUseCase ─▶ RecipeRepository
//! ```
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - DI とルーター構築
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`error`] - API エラー定義と HTTP レスポンスへの変換
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`middleware`] - 認証ゲート
//! - [`usecase`] - ビジネスロジック

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod usecase;
