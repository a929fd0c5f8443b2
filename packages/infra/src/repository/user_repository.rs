//! # UserRepository
//!
//! ユーザー情報の永続化を担当するリポジトリ。

use async_trait::async_trait;
use recipebox_domain::{
    password::PasswordHash,
    user::{User, UserId, Username},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// ユーザーリポジトリトレイト
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザー名でユーザーを検索（大文字小文字を区別する）
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(user))`: ユーザーが見つかった場合
    /// - `Ok(None)`: ユーザーが見つからない場合
    /// - `Err(_)`: データベースエラー
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, InfraError>;

    /// ユーザーを登録する
    ///
    /// 同じユーザー名が既に存在する場合は `InfraErrorKind::Conflict` を返す。
    async fn insert(&self, user: &User) -> Result<(), InfraError>;
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id:            Uuid,
    username:      String,
    password_hash: String,
}

impl TryFrom<UserRow> for User {
    type Error = InfraError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let username =
            Username::new(row.username).map_err(|e| InfraError::unexpected(e.to_string()))?;

        Ok(User::new(
            UserId::from_uuid(row.id),
            username,
            PasswordHash::new(row.password_hash),
        ))
    }
}

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, InfraError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(user_id = %user.id()))]
    async fn insert(&self, user: &User) -> Result<(), InfraError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.username().as_str())
        .bind(user.password_hash().as_str())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                InfraError::conflict("User", user.username().as_str()),
            ),
            Err(e) => Err(e.into()),
        }
    }
}
