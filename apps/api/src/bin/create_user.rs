//! # ユーザー作成 CLI
//!
//! ログイン可能なユーザーを登録する運用ツール。
//! パスワードは Argon2id でハッシュ化してから保存する。
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo run -p recipebox-api --bin create-user -- \
//!     --username admin --password okay
//! ```

use anyhow::{Context as _, bail};
use clap::Parser;
use recipebox_domain::{
    password::PlainPassword,
    user::{User, UserId, Username},
};
use recipebox_infra::{
    Argon2PasswordHasher,
    PasswordHasher as _,
    db,
    repository::{PostgresUserRepository, UserRepository as _},
};
use recipebox_shared::observability::{TracingConfig, init_tracing};

/// RecipeBox にユーザーを登録する
#[derive(Parser)]
#[command(name = "create-user")]
#[command(about = "Register a user who can log in to RecipeBox", long_about = None)]
struct Cli {
    /// Username (case-sensitive, must be unique)
    #[arg(long)]
    username: String,

    /// Plain-text password
    #[arg(long, env = "RECIPEBOX_PASSWORD", hide_env_values = true)]
    password: String,

    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_tracing(&TracingConfig::from_env("create-user"));

    let cli = Cli::parse();

    let username = Username::new(cli.username).context("ユーザー名が不正です")?;
    let password = PlainPassword::new(cli.password);
    if password.is_empty() {
        bail!("パスワードが空です");
    }

    let pool = db::create_pool(&cli.database_url)
        .await
        .context("データベース接続に失敗しました")?;
    db::run_migrations(&pool)
        .await
        .context("マイグレーションの実行に失敗しました")?;

    let hasher = Argon2PasswordHasher::new()?;
    let password_hash = hasher.hash(&password)?;
    let user = User::new(UserId::new(), username, password_hash);

    let repository = PostgresUserRepository::new(pool);
    if let Err(e) = repository.insert(&user).await {
        if let Some((_, id)) = e.as_conflict() {
            bail!("ユーザー名 {id} は既に登録されています");
        }
        return Err(e).context("ユーザーの登録に失敗しました");
    }

    tracing::info!(
        user_id = %user.id(),
        username = %user.username(),
        "ユーザーを登録しました"
    );

    Ok(())
}
