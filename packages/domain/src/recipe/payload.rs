//! 未検証のレシピペイロードと検証ルール
//!
//! 検証は以下の順で行い、最初に失敗したルールのメッセージを返す。
//!
//! 1. `name`: 空でない文字列
//! 2. `difficulty`: JSON の数値（`"3"` のような文字列は不可）
//! 3. `vegetarian`: JSON の真偽値（`"true"` のような文字列は不可）
//! 4. 更新時のみ: 既知のフィールドが一つも無い場合はエラー
//!
//! `null` は「型が不正な値」として扱う。

use serde_json::{Map, Value};

use super::{Difficulty, NewRecipe, RecipeName, RecipePatch};
use crate::DomainError;

pub const NAME_EMPTY_MESSAGE: &str = "name field can not be empty";
pub const DIFFICULTY_NOT_NUMBER_MESSAGE: &str = "difficulty field should be a number";
pub const VEGETARIAN_NOT_BOOLEAN_MESSAGE: &str = "vegetarian field should be boolean";
pub const EMPTY_PATCH_MESSAGE: &str = "field should not be empty";
pub const INVALID_BODY_MESSAGE: &str = "invalid request body";

/// リクエストボディをそのまま保持する未検証ペイロード
///
/// 未知のフィールドは検証時に無視される。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipePayload(Map<String, Value>);

impl RecipePayload {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// 作成用に検証する（全フィールド必須）
    pub fn validate_for_create(&self) -> Result<NewRecipe, DomainError> {
        let name = self.name().unwrap_or_else(|| Err(name_error()))?;
        let difficulty = self
            .difficulty()
            .unwrap_or_else(|| Err(difficulty_error()))?;
        let vegetarian = self
            .vegetarian()
            .unwrap_or_else(|| Err(vegetarian_error()))?;

        Ok(NewRecipe {
            name,
            difficulty,
            vegetarian,
        })
    }

    /// 部分更新用に検証する（指定されたフィールドのみ検証、最低一つ必須）
    pub fn validate_for_update(&self) -> Result<RecipePatch, DomainError> {
        let patch = RecipePatch {
            name: self.name().transpose()?,
            difficulty: self.difficulty().transpose()?,
            vegetarian: self.vegetarian().transpose()?,
        };

        if patch.is_empty() {
            return Err(DomainError::validation(EMPTY_PATCH_MESSAGE));
        }
        Ok(patch)
    }

    fn name(&self) -> Option<Result<RecipeName, DomainError>> {
        self.0.get("name").map(|value| match value {
            Value::String(s) => RecipeName::new(s.as_str()),
            _ => Err(name_error()),
        })
    }

    fn difficulty(&self) -> Option<Result<Difficulty, DomainError>> {
        self.0.get("difficulty").map(|value| {
            value
                .as_f64()
                .map(Difficulty::new)
                .ok_or_else(difficulty_error)
        })
    }

    fn vegetarian(&self) -> Option<Result<bool, DomainError>> {
        self.0
            .get("vegetarian")
            .map(|value| value.as_bool().ok_or_else(vegetarian_error))
    }
}

impl TryFrom<Value> for RecipePayload {
    type Error = DomainError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            _ => Err(DomainError::validation(INVALID_BODY_MESSAGE)),
        }
    }
}

fn name_error() -> DomainError {
    DomainError::validation(NAME_EMPTY_MESSAGE)
}

fn difficulty_error() -> DomainError {
    DomainError::validation(DIFFICULTY_NOT_NUMBER_MESSAGE)
}

fn vegetarian_error() -> DomainError {
    DomainError::validation(VEGETARIAN_NOT_BOOLEAN_MESSAGE)
}
