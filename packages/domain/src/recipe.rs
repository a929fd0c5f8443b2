//! # レシピ
//!
//! レシピエンティティと、その入力値を検証するペイロードを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 備考 |
//! |---|------------|------|
//! | [`Recipe`] | レシピ | 永続化済みのレコード |
//! | [`NewRecipe`] | 新規レシピ | 作成時の検証済み入力 |
//! | [`RecipePatch`] | レシピ部分更新 | 更新時の検証済み入力（指定されたフィールドのみ） |
//! | [`RecipePayload`] | 未検証ペイロード | リクエストボディの JSON オブジェクト |
//!
//! ## 設計方針
//!
//! - リクエストボディは型変換せずに [`RecipePayload`] として受け取り、
//!   検証に通ったものだけを [`NewRecipe`] / [`RecipePatch`] に変換する
//! - 保存されるレシピは常に「空でない名前・数値の難易度・真偽値のベジタリアン」を満たす

mod payload;

use derive_more::Display;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

pub use payload::{
    DIFFICULTY_NOT_NUMBER_MESSAGE,
    EMPTY_PATCH_MESSAGE,
    INVALID_BODY_MESSAGE,
    NAME_EMPTY_MESSAGE,
    RecipePayload,
    VEGETARIAN_NOT_BOOLEAN_MESSAGE,
};

use crate::DomainError;

define_uuid_id! {
    /// レシピ ID
    ///
    /// 挿入時に UUID v7 で採番される。
    pub struct RecipeId;
}

impl RecipeId {
    /// 外部入力（パスパラメータ）から ID を復元する
    ///
    /// UUID として解釈できない値は、存在しないレコードと同じ
    /// `DomainError::NotFound` として扱う。
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(raw).map(Self).map_err(|_| DomainError::NotFound {
            entity_type: "Recipe",
            id:          raw.to_string(),
        })
    }
}

/// レシピ名（空文字列不可）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct RecipeName(String);

impl RecipeName {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::validation(NAME_EMPTY_MESSAGE));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 難易度
///
/// 小数部を持たない値は JSON の整数としてシリアライズする（`2` は `2` のまま返る）。
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct Difficulty(f64);

/// f64 で整数を正確に表現できる上限（2^53）
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Difficulty {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    fn as_exact_integer(&self) -> Option<i64> {
        let is_integral = self.0.is_finite() && self.0.fract() == 0.0;
        (is_integral && self.0.abs() <= MAX_EXACT_INTEGER).then_some(self.0 as i64)
    }
}

impl Serialize for Difficulty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_exact_integer() {
            Some(integer) => serializer.serialize_i64(integer),
            None => serializer.serialize_f64(self.0),
        }
    }
}

/// レシピエンティティ
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    id:         RecipeId,
    name:       RecipeName,
    difficulty: Difficulty,
    vegetarian: bool,
}

impl Recipe {
    /// 永続化済みの値から復元する
    pub fn new(id: RecipeId, name: RecipeName, difficulty: Difficulty, vegetarian: bool) -> Self {
        Self {
            id,
            name,
            difficulty,
            vegetarian,
        }
    }

    /// 検証済みの入力から新しい ID を採番して作成する
    pub fn create(new_recipe: NewRecipe) -> Self {
        Self::new(
            RecipeId::new(),
            new_recipe.name,
            new_recipe.difficulty,
            new_recipe.vegetarian,
        )
    }

    pub fn id(&self) -> &RecipeId {
        &self.id
    }

    pub fn name(&self) -> &RecipeName {
        &self.name
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn vegetarian(&self) -> bool {
        self.vegetarian
    }

    /// 部分更新を適用した新しいレシピを返す
    ///
    /// パッチに含まれないフィールドは変更しない。
    pub fn apply(&self, patch: &RecipePatch) -> Self {
        Self {
            id:         self.id,
            name:       patch.name.clone().unwrap_or_else(|| self.name.clone()),
            difficulty: patch.difficulty.unwrap_or(self.difficulty),
            vegetarian: patch.vegetarian.unwrap_or(self.vegetarian),
        }
    }
}

/// 作成用の検証済み入力
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecipe {
    pub name:       RecipeName,
    pub difficulty: Difficulty,
    pub vegetarian: bool,
}

/// 部分更新用の検証済み入力
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipePatch {
    pub name:       Option<RecipeName>,
    pub difficulty: Option<Difficulty>,
    pub vegetarian: Option<bool>,
}

impl RecipePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.difficulty.is_none() && self.vegetarian.is_none()
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;

    #[fixture]
    fn rajma() -> Recipe {
        Recipe::create(NewRecipe {
            name: RecipeName::new("rajma").unwrap(),
            difficulty: Difficulty::new(2.0),
            vegetarian: true,
        })
    }

    #[rstest]
    #[case("sjsdjhdshjhjds")]
    #[case("")]
    #[case("0190a8b2-7c3e-7000-8000-00000000000")]
    fn test_uuidでないidは存在しないレコードとして扱う(#[case] raw: &str) {
        let result = RecipeId::parse(raw);

        assert_eq!(
            result,
            Err(DomainError::NotFound {
                entity_type: "Recipe",
                id: raw.to_string(),
            })
        );
    }

    #[rstest]
    fn test_表示したidを再度パースできる() {
        let id = RecipeId::new();

        let parsed = RecipeId::parse(&id.to_string()).unwrap();

        assert_eq!(parsed, id);
    }

    #[rstest]
    fn test_空のレシピ名は拒否される() {
        assert_eq!(
            RecipeName::new(""),
            Err(DomainError::Validation(NAME_EMPTY_MESSAGE.to_string()))
        );
    }

    #[rstest]
    #[case(2.0, json!(2))]
    #[case(-3.0, json!(-3))]
    #[case(2.5, json!(2.5))]
    fn test_難易度のシリアライズ(#[case] value: f64, #[case] expected: serde_json::Value) {
        let json = serde_json::to_value(Difficulty::new(value)).unwrap();

        assert_eq!(json, expected);
    }

    #[rstest]
    fn test_パッチは指定されたフィールドのみ変更する(rajma: Recipe) {
        let patch = RecipePatch {
            difficulty: Some(Difficulty::new(4.0)),
            ..Default::default()
        };

        let updated = rajma.apply(&patch);

        assert_eq!(updated.id(), rajma.id());
        assert_eq!(updated.name(), rajma.name());
        assert_eq!(updated.difficulty(), Difficulty::new(4.0));
        assert!(updated.vegetarian());
    }

    #[rstest]
    fn test_全フィールドを指定したパッチ(rajma: Recipe) {
        let patch = RecipePatch {
            name: Some(RecipeName::new("chole").unwrap()),
            difficulty: Some(Difficulty::new(1.5)),
            vegetarian: Some(false),
        };

        let updated = rajma.apply(&patch);

        assert_eq!(updated.name().as_str(), "chole");
        assert_eq!(updated.difficulty().value(), 1.5);
        assert!(!updated.vegetarian());
    }

    #[rstest]
    fn test_空のパッチ判定() {
        assert!(RecipePatch::default().is_empty());
        assert!(
            !RecipePatch {
                vegetarian: Some(false),
                ..Default::default()
            }
            .is_empty()
        );
    }
}
