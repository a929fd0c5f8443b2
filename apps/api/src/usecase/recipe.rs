//! # レシピユースケース
//!
//! 各操作は「ID の検証 → ペイロードの検証 → リポジトリ呼び出し」の順で進み、
//! 検証に失敗した場合はリポジトリを呼ばない。

use std::sync::Arc;

use async_trait::async_trait;
use recipebox_domain::{
    DomainError,
    recipe::{Recipe, RecipeId, RecipePayload},
};
use recipebox_infra::repository::RecipeRepository;

use super::RecipeUseCase;
use crate::error::ApiError;

/// レシピユースケースの実装
pub struct RecipeUseCaseImpl {
    recipe_repository: Arc<dyn RecipeRepository>,
}

impl RecipeUseCaseImpl {
    pub fn new(recipe_repository: Arc<dyn RecipeRepository>) -> Self {
        Self { recipe_repository }
    }
}

/// リクエストで渡された ID をそのまま含む未存在エラー
fn not_found(raw_id: &str) -> ApiError {
    DomainError::NotFound {
        entity_type: "Recipe",
        id:          raw_id.to_string(),
    }
    .into()
}

#[async_trait]
impl RecipeUseCase for RecipeUseCaseImpl {
    #[tracing::instrument(skip_all)]
    async fn create(&self, payload: RecipePayload) -> Result<Recipe, ApiError> {
        let new_recipe = payload.validate_for_create()?;
        let recipe = Recipe::create(new_recipe);

        self.recipe_repository.insert(&recipe).await?;

        tracing::info!(recipe_id = %recipe.id(), "レシピを作成しました");
        Ok(recipe)
    }

    #[tracing::instrument(skip_all)]
    async fn list(&self) -> Result<Vec<Recipe>, ApiError> {
        Ok(self.recipe_repository.find_all().await?)
    }

    #[tracing::instrument(skip_all, fields(recipe_id = %id))]
    async fn get(&self, id: &str) -> Result<Recipe, ApiError> {
        let recipe_id = RecipeId::parse(id)?;

        self.recipe_repository
            .find_by_id(&recipe_id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    #[tracing::instrument(skip_all, fields(recipe_id = %id))]
    async fn update(&self, id: &str, payload: RecipePayload) -> Result<Recipe, ApiError> {
        let recipe_id = RecipeId::parse(id)?;
        let patch = payload.validate_for_update()?;

        let updated = self
            .recipe_repository
            .update(&recipe_id, &patch)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!("レシピを更新しました");
        Ok(updated)
    }

    #[tracing::instrument(skip_all, fields(recipe_id = %id))]
    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let recipe_id = RecipeId::parse(id)?;

        if !self.recipe_repository.delete(&recipe_id).await? {
            return Err(not_found(id));
        }

        tracing::info!("レシピを削除しました");
        Ok(())
    }
}
