//! UserRepository 統合テスト
//!
//! データベースを使用したテスト。sqlx::test マクロを使用して、
//! テストごとに独立したデータベースを作成する。
//!
//! 実行方法:
//! ```bash
//! DATABASE_URL=postgres://... cargo test -p recipebox-infra --test user_repository_test
//! ```

use recipebox_domain::{
    password::PasswordHash,
    user::{User, UserId, Username},
};
use recipebox_infra::repository::{PostgresUserRepository, UserRepository};
use sqlx::PgPool;

fn admin() -> User {
    User::new(
        UserId::new(),
        Username::new("admin").unwrap(),
        PasswordHash::new("$argon2id$v=19$m=65536,t=1,p=1$c2FsdHNhbHQ$aGFzaA"),
    )
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_登録したユーザーをユーザー名で取得できる(pool: PgPool) {
    let sut = PostgresUserRepository::new(pool);
    let user = admin();

    sut.insert(&user).await.unwrap();
    let found = sut.find_by_username(user.username()).await.unwrap().unwrap();

    assert_eq!(found.id(), user.id());
    assert_eq!(found.password_hash(), user.password_hash());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_ユーザー名は大文字小文字を区別する(pool: PgPool) {
    let sut = PostgresUserRepository::new(pool);
    sut.insert(&admin()).await.unwrap();

    let found = sut
        .find_by_username(&Username::new("Admin").unwrap())
        .await
        .unwrap();

    assert!(found.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_同じユーザー名の登録はconflictになる(pool: PgPool) {
    let sut = PostgresUserRepository::new(pool);
    sut.insert(&admin()).await.unwrap();

    let result = sut.insert(&admin()).await;

    let err = result.unwrap_err();
    assert_eq!(err.as_conflict(), Some(("User", "admin")));
}
