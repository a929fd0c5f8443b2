//! # RecipeBox API サーバー
//!
//! ## 環境変数
//!
//! 設定項目は [`recipebox_api::config`] を参照。
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! cargo run -p recipebox-api --bin recipebox-api
//!
//! # 本番環境
//! DATABASE_URL=postgres://... JWT_SECRET=... cargo run -p recipebox-api --bin recipebox-api --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use axum::{Router, routing::get};
use recipebox_api::{
    app_builder::{AppDependencies, build_app},
    config::ApiConfig,
    handler::{ReadinessState, readiness_check},
};
use recipebox_domain::clock::SystemClock;
use recipebox_infra::{
    Argon2PasswordHasher,
    JwtTokenService,
    db,
    repository::{PostgresRecipeRepository, PostgresUserRepository},
};
use recipebox_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// API サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("recipebox-api");
    init_tracing(&tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "recipebox-api").entered();

    // 設定読み込み
    let config = ApiConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "API サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続プールを作成
    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    // マイグレーション実行
    db::run_migrations(&pool)
        .await
        .context("マイグレーションの実行に失敗しました")?;
    tracing::info!("マイグレーションを適用しました");

    // Readiness Check 用 State（pool が move される前に clone）
    let readiness_state = Arc::new(ReadinessState { pool: pool.clone() });

    // 依存コンポーネントを初期化
    let deps = AppDependencies {
        user_repository:   Arc::new(PostgresUserRepository::new(pool.clone())),
        recipe_repository: Arc::new(PostgresRecipeRepository::new(pool)),
        password_hasher:   Arc::new(Argon2PasswordHasher::new()?),
        token_service:     Arc::new(JwtTokenService::new(
            config.jwt_secret.as_bytes(),
            config.token_ttl,
            Arc::new(SystemClock),
        )),
    };

    let app = build_app(deps).merge(
        Router::new()
            .route("/health/ready", get(readiness_check))
            .with_state(readiness_state),
    );

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("API サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
