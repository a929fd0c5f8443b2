//! # テスト用モックリポジトリ
//!
//! ユースケーステストと API の結合テストで使用するインメモリリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! recipebox-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use recipebox_domain::{
    recipe::{Recipe, RecipeId, RecipePatch},
    user::{User, Username},
};

use crate::{
    error::InfraError,
    repository::{RecipeRepository, UserRepository},
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ===== MockUserRepository =====

#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, user: User) {
        lock(&self.users).push(user);
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, InfraError> {
        Ok(lock(&self.users)
            .iter()
            .find(|u| u.username() == username)
            .cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), InfraError> {
        let mut users = lock(&self.users);
        if users.iter().any(|u| u.username() == user.username()) {
            return Err(InfraError::conflict("User", user.username().as_str()));
        }
        users.push(user.clone());
        Ok(())
    }
}

// ===== MockRecipeRepository =====

#[derive(Clone, Default)]
pub struct MockRecipeRepository {
    recipes: Arc<Mutex<Vec<Recipe>>>,
}

impl MockRecipeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_recipe(&self, recipe: Recipe) {
        lock(&self.recipes).push(recipe);
    }

    pub fn len(&self) -> usize {
        lock(&self.recipes).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.recipes).is_empty()
    }
}

#[async_trait]
impl RecipeRepository for MockRecipeRepository {
    async fn insert(&self, recipe: &Recipe) -> Result<(), InfraError> {
        lock(&self.recipes).push(recipe.clone());
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Recipe>, InfraError> {
        Ok(lock(&self.recipes).clone())
    }

    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, InfraError> {
        Ok(lock(&self.recipes).iter().find(|r| r.id() == id).cloned())
    }

    async fn update(
        &self,
        id: &RecipeId,
        patch: &RecipePatch,
    ) -> Result<Option<Recipe>, InfraError> {
        let mut recipes = lock(&self.recipes);
        let Some(recipe) = recipes.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };
        *recipe = recipe.apply(patch);
        Ok(Some(recipe.clone()))
    }

    async fn delete(&self, id: &RecipeId) -> Result<bool, InfraError> {
        let mut recipes = lock(&self.recipes);
        let before = recipes.len();
        recipes.retain(|r| r.id() != id);
        Ok(recipes.len() < before)
    }
}
