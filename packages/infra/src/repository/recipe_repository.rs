//! # RecipeRepository
//!
//! レシピの永続化を担当するリポジトリ。
//!
//! 部分更新は `COALESCE` を使った単一の UPDATE 文で行い、読み直しをしない。

use async_trait::async_trait;
use recipebox_domain::recipe::{Difficulty, Recipe, RecipeId, RecipeName, RecipePatch};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// レシピリポジトリトレイト
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// レシピを登録する
    async fn insert(&self, recipe: &Recipe) -> Result<(), InfraError>;

    /// 全レシピを作成順で取得する
    async fn find_all(&self) -> Result<Vec<Recipe>, InfraError>;

    /// ID でレシピを検索する
    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, InfraError>;

    /// パッチに含まれるフィールドのみを更新し、更新後のレシピを返す
    ///
    /// 対象が存在しない場合は `Ok(None)`。
    async fn update(&self, id: &RecipeId, patch: &RecipePatch)
    -> Result<Option<Recipe>, InfraError>;

    /// レシピを削除する
    ///
    /// 削除した場合は `true`、対象が存在しない場合は `false` を返す。
    async fn delete(&self, id: &RecipeId) -> Result<bool, InfraError>;
}

#[derive(sqlx::FromRow)]
struct RecipeRow {
    id:         Uuid,
    name:       String,
    difficulty: f64,
    vegetarian: bool,
}

impl TryFrom<RecipeRow> for Recipe {
    type Error = InfraError;

    fn try_from(row: RecipeRow) -> Result<Self, Self::Error> {
        let name = RecipeName::new(row.name).map_err(|e| InfraError::unexpected(e.to_string()))?;

        Ok(Recipe::new(
            RecipeId::from_uuid(row.id),
            name,
            Difficulty::new(row.difficulty),
            row.vegetarian,
        ))
    }
}

/// PostgreSQL 実装の RecipeRepository
#[derive(Debug, Clone)]
pub struct PostgresRecipeRepository {
    pool: PgPool,
}

impl PostgresRecipeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeRepository for PostgresRecipeRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(recipe_id = %recipe.id()))]
    async fn insert(&self, recipe: &Recipe) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO recipes (id, name, difficulty, vegetarian)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(recipe.id().as_uuid())
        .bind(recipe.name().as_str())
        .bind(recipe.difficulty().value())
        .bind(recipe.vegetarian())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Recipe>, InfraError> {
        let rows = sqlx::query_as::<_, RecipeRow>(
            r#"
            SELECT id, name, difficulty, vegetarian
            FROM recipes
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Recipe::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(recipe_id = %id))]
    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, InfraError> {
        let row = sqlx::query_as::<_, RecipeRow>(
            r#"
            SELECT id, name, difficulty, vegetarian
            FROM recipes
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Recipe::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(recipe_id = %id))]
    async fn update(
        &self,
        id: &RecipeId,
        patch: &RecipePatch,
    ) -> Result<Option<Recipe>, InfraError> {
        let row = sqlx::query_as::<_, RecipeRow>(
            r#"
            UPDATE recipes
            SET name = COALESCE($2, name),
                difficulty = COALESCE($3, difficulty),
                vegetarian = COALESCE($4, vegetarian),
                updated_at = now()
            WHERE id = $1
            RETURNING id, name, difficulty, vegetarian
            "#,
        )
        .bind(id.as_uuid())
        .bind(patch.name.as_ref().map(RecipeName::as_str))
        .bind(patch.difficulty.map(|d| d.value()))
        .bind(patch.vegetarian)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Recipe::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(recipe_id = %id))]
    async fn delete(&self, id: &RecipeId) -> Result<bool, InfraError> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
