//! # アプリケーション構築
//!
//! DI（ユースケース・State）の初期化とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, patch, post},
};
use recipebox_infra::{
    PasswordHasher,
    TokenService,
    repository::{RecipeRepository, UserRepository},
};
use recipebox_shared::observability::make_request_span;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        AuthState,
        RecipeState,
        create_recipe,
        delete_recipe,
        get_recipe,
        health_check,
        list_recipes,
        login,
        update_recipe,
    },
    middleware::{AuthGateState, require_authentication},
    usecase::{AuthUseCaseImpl, RecipeUseCaseImpl},
};

/// ルーター構築に必要な依存コンポーネント
pub struct AppDependencies {
    pub user_repository:   Arc<dyn UserRepository>,
    pub recipe_repository: Arc<dyn RecipeRepository>,
    pub password_hasher:   Arc<dyn PasswordHasher>,
    pub token_service:     Arc<dyn TokenService>,
}

/// DI コンテナの構築とルーター定義を行う
///
/// `/health/ready` は DB プールを必要とするため、呼び出し側で追加する。
pub fn build_app(deps: AppDependencies) -> Router {
    let auth_state = Arc::new(AuthState {
        usecase: Arc::new(AuthUseCaseImpl::new(
            deps.user_repository,
            deps.password_hasher,
            deps.token_service.clone(),
        )),
    });
    let recipe_state = Arc::new(RecipeState {
        usecase: Arc::new(RecipeUseCaseImpl::new(deps.recipe_repository)),
    });
    let auth_gate = from_fn_with_state(
        AuthGateState {
            token_service: deps.token_service,
        },
        require_authentication,
    );

    // 認証ゲートはメソッド単位で付ける（未対応メソッドは 405 のまま）
    let recipe_routes = Router::new()
        .route(
            "/recipes",
            get(list_recipes).merge(post(create_recipe).route_layer(auth_gate.clone())),
        )
        .route(
            "/recipes/{id}",
            get(get_recipe).merge(
                patch(update_recipe)
                    .delete(delete_recipe)
                    .route_layer(auth_gate),
            ),
        )
        .with_state(recipe_state);

    Router::new()
        .route("/health", get(health_check))
        .route("/login", post(login).with_state(auth_state))
        .merge(recipe_routes)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
}
