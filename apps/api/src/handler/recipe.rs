//! # レシピハンドラ
//!
//! ## エンドポイント
//!
//! | メソッド | パス | 認証 | 成功時 |
//! |---------|------|------|--------|
//! | `POST` | `/recipes` | 必要 | 201 作成したレシピ |
//! | `GET` | `/recipes` | 不要 | 200 全レシピ |
//! | `GET` | `/recipes/{id}` | 不要 | 200 レシピ |
//! | `PATCH` | `/recipes/{id}` | 必要 | 200 更新後のレシピ |
//! | `DELETE` | `/recipes/{id}` | 必要 | 200 削除メッセージ |

use std::sync::Arc;

use axum::{
    Extension,
    Json,
    extract::{
        Path,
        State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, Uri},
};
use recipebox_domain::{
    DomainError,
    recipe::{Difficulty, INVALID_BODY_MESSAGE, Recipe, RecipeId, RecipePayload},
};
use recipebox_shared::{ApiResponse, MessageResponse};
use serde::Serialize;
use serde_json::Value;

use crate::{error::ApiError, middleware::AuthenticatedUser, usecase::RecipeUseCase};

pub const RECIPE_DELETED_MESSAGE: &str = "Recipe successfully deleted";

/// レシピハンドラの共有状態
pub struct RecipeState {
    pub usecase: Arc<dyn RecipeUseCase>,
}

/// レシピのレスポンス表現
#[derive(Debug, Serialize)]
pub struct RecipeData {
    pub id:         RecipeId,
    pub name:       String,
    pub difficulty: Difficulty,
    pub vegetarian: bool,
}

impl From<&Recipe> for RecipeData {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id:         *recipe.id(),
            name:       recipe.name().as_str().to_string(),
            difficulty: recipe.difficulty(),
            vegetarian: recipe.vegetarian(),
        }
    }
}

/// リクエストボディを未検証ペイロードに変換する
///
/// JSON として読めない、またはオブジェクトでないボディは検証エラーとする。
fn into_payload(body: Result<Json<Value>, JsonRejection>) -> Result<RecipePayload, ApiError> {
    let Json(value) = body.map_err(|e| {
        tracing::debug!(error = %e, "リクエストボディのパースに失敗");
        ApiError::Validation(INVALID_BODY_MESSAGE.to_string())
    })?;
    Ok(RecipePayload::try_from(value)?)
}

/// パスパラメータの ID を取り出す
///
/// UTF-8 として読めないなど抽出に失敗した場合も、最後のパスセグメントを
/// 非可逆デコードした値で未存在エラーとする。
fn recipe_id_param(
    path: Result<Path<String>, PathRejection>,
    uri: &Uri,
) -> Result<String, ApiError> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(e) => {
            tracing::debug!(error = %e, "パスパラメータの抽出に失敗");
            let segment = uri.path().rsplit('/').next().unwrap_or_default();
            let decoded = urlencoding::decode_binary(segment.as_bytes());
            Err(DomainError::NotFound {
                entity_type: "Recipe",
                id:          String::from_utf8_lossy(&decoded).into_owned(),
            }
            .into())
        }
    }
}

/// POST /recipes
pub async fn create_recipe(
    State(state): State<Arc<RecipeState>>,
    Extension(user): Extension<AuthenticatedUser>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<RecipeData>>), ApiError> {
    let payload = into_payload(body)?;
    let recipe = state.usecase.create(payload).await?;

    tracing::debug!(user_id = %user.user_id, recipe_id = %recipe.id(), "レシピを作成したユーザー");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(RecipeData::from(&recipe))),
    ))
}

/// GET /recipes
pub async fn list_recipes(
    State(state): State<Arc<RecipeState>>,
) -> Result<Json<ApiResponse<Vec<RecipeData>>>, ApiError> {
    let recipes = state.usecase.list().await?;

    Ok(Json(ApiResponse::new(
        recipes.iter().map(RecipeData::from).collect(),
    )))
}

/// GET /recipes/{id}
pub async fn get_recipe(
    State(state): State<Arc<RecipeState>>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<RecipeData>>, ApiError> {
    let id = recipe_id_param(path, &uri)?;
    let recipe = state.usecase.get(&id).await?;

    Ok(Json(ApiResponse::new(RecipeData::from(&recipe))))
}

/// PATCH /recipes/{id}
pub async fn update_recipe(
    State(state): State<Arc<RecipeState>>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse<RecipeData>>, ApiError> {
    let id = recipe_id_param(path, &uri)?;
    // ID の形式不正はボディの不備より優先して返す
    let payload = match into_payload(body) {
        Ok(payload) => payload,
        Err(e) => {
            RecipeId::parse(&id)?;
            return Err(e);
        }
    };
    let recipe = state.usecase.update(&id, payload).await?;

    Ok(Json(ApiResponse::new(RecipeData::from(&recipe))))
}

/// DELETE /recipes/{id}
pub async fn delete_recipe(
    State(state): State<Arc<RecipeState>>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = recipe_id_param(path, &uri)?;
    state.usecase.delete(&id).await?;

    Ok(Json(MessageResponse::new(RECIPE_DELETED_MESSAGE)))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::{
        Router,
        body::Body,
        http::{Method, Request},
        routing::get,
    };
    use pretty_assertions::assert_eq;
    use recipebox_domain::{
        recipe::{NewRecipe, RecipeName},
        user::UserId,
    };
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;

    // テスト用スタブ: 1 件のレシピだけを持つ
    struct StubRecipeUseCase {
        recipe: Recipe,
    }

    impl StubRecipeUseCase {
        fn new() -> Self {
            Self {
                recipe: Recipe::create(NewRecipe {
                    name:       RecipeName::new("rajma").unwrap(),
                    difficulty: Difficulty::new(2.0),
                    vegetarian: true,
                }),
            }
        }

        fn find(&self, id: &str) -> Result<Recipe, ApiError> {
            let id = RecipeId::parse(id)?;
            if id == *self.recipe.id() {
                Ok(self.recipe.clone())
            } else {
                Err(DomainError::NotFound {
                    entity_type: "Recipe",
                    id:          id.to_string(),
                }
                .into())
            }
        }
    }

    #[async_trait]
    impl RecipeUseCase for StubRecipeUseCase {
        async fn create(&self, payload: RecipePayload) -> Result<Recipe, ApiError> {
            Ok(Recipe::create(payload.validate_for_create()?))
        }

        async fn list(&self) -> Result<Vec<Recipe>, ApiError> {
            Ok(vec![self.recipe.clone()])
        }

        async fn get(&self, id: &str) -> Result<Recipe, ApiError> {
            self.find(id)
        }

        async fn update(&self, id: &str, payload: RecipePayload) -> Result<Recipe, ApiError> {
            let recipe = self.find(id)?;
            let patch = payload.validate_for_update()?;
            Ok(recipe.apply(&patch))
        }

        async fn delete(&self, id: &str) -> Result<(), ApiError> {
            self.find(id).map(|_| ())
        }
    }

    /// 認証ゲートを通過した状態を Extension で再現する
    fn create_test_app(usecase: StubRecipeUseCase) -> Router {
        let state = Arc::new(RecipeState {
            usecase: Arc::new(usecase),
        });

        Router::new()
            .route("/recipes", get(list_recipes).post(create_recipe))
            .route(
                "/recipes/{id}",
                get(get_recipe).patch(update_recipe).delete(delete_recipe),
            )
            .layer(Extension(AuthenticatedUser {
                user_id: UserId::new(),
            }))
            .with_state(state)
    }

    fn request(method: Method, uri: &str, body: Option<&str>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_create_recipe_成功() {
        // Given
        let sut = create_test_app(StubRecipeUseCase::new());
        let body = r#"{"name": "rajma", "difficulty": 2, "vegetarian": true}"#;

        // When
        let (status, json) = send(sut, request(Method::POST, "/recipes", Some(body))).await;

        // Then
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["name"], "rajma");
        assert_eq!(json["data"]["difficulty"], json!(2));
        assert_eq!(json["data"]["vegetarian"], true);
        assert!(json["data"]["id"].is_string());
    }

    #[tokio::test]
    async fn test_create_recipe_検証エラー() {
        // Given
        let sut = create_test_app(StubRecipeUseCase::new());
        let body = r#"{"name": "rajma", "difficulty": "3", "vegetarian": true}"#;

        // When
        let (status, json) = send(sut, request(Method::POST, "/recipes", Some(body))).await;

        // Then
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json,
            json!({"success": false, "message": "difficulty field should be a number"})
        );
    }

    #[tokio::test]
    async fn test_create_recipe_オブジェクトでないボディ() {
        // Given
        let sut = create_test_app(StubRecipeUseCase::new());

        // When
        let (status, json) = send(sut, request(Method::POST, "/recipes", Some("[1, 2]"))).await;

        // Then
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], INVALID_BODY_MESSAGE);
    }

    #[tokio::test]
    async fn test_list_recipes_成功() {
        // Given
        let usecase = StubRecipeUseCase::new();
        let id = usecase.recipe.id().to_string();
        let sut = create_test_app(usecase);

        // When
        let (status, json) = send(sut, request(Method::GET, "/recipes", None)).await;

        // Then
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({
                "success": true,
                "data": [{"id": id, "name": "rajma", "difficulty": 2, "vegetarian": true}],
            })
        );
    }

    #[tokio::test]
    async fn test_get_recipe_形式不正なid() {
        // Given
        let sut = create_test_app(StubRecipeUseCase::new());

        // When
        let (status, json) = send(sut, request(Method::GET, "/recipes/sjsdjhdshjhjds", None)).await;

        // Then
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json,
            json!({"success": false, "message": "Recipe with id sjsdjhdshjhjds does not exist"})
        );
    }

    #[tokio::test]
    async fn test_utf8でないidも未存在エラーのエンベロープで返す() {
        let expected = json!({
            "success": false,
            "message": "Recipe with id \u{FFFD} does not exist",
        });

        for (method, body) in [
            (Method::GET, None),
            (Method::PATCH, Some(r#"{"name": "chole"}"#)),
            (Method::DELETE, None),
        ] {
            // Given
            let sut = create_test_app(StubRecipeUseCase::new());

            // When
            let (status, json) = send(sut, request(method, "/recipes/%FF", body)).await;

            // Then
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json, expected);
        }
    }

    #[tokio::test]
    async fn test_update_recipe_部分更新() {
        // Given
        let usecase = StubRecipeUseCase::new();
        let uri = format!("/recipes/{}", usecase.recipe.id());
        let sut = create_test_app(usecase);

        // When
        let (status, json) = send(
            sut,
            request(Method::PATCH, &uri, Some(r#"{"vegetarian": false}"#)),
        )
        .await;

        // Then
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["name"], "rajma");
        assert_eq!(json["data"]["vegetarian"], false);
    }

    #[tokio::test]
    async fn test_update_recipe_形式不正なidはボディより優先() {
        // Given
        let sut = create_test_app(StubRecipeUseCase::new());

        // When
        let (status, json) = send(
            sut,
            request(Method::PATCH, "/recipes/sjsdjhdshjhjds", Some("not json")),
        )
        .await;

        // Then
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Recipe with id sjsdjhdshjhjds does not exist");
    }

    #[tokio::test]
    async fn test_delete_recipe_成功() {
        // Given
        let usecase = StubRecipeUseCase::new();
        let uri = format!("/recipes/{}", usecase.recipe.id());
        let sut = create_test_app(usecase);

        // When
        let (status, json) = send(sut, request(Method::DELETE, &uri, None)).await;

        // Then
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({"success": true, "message": RECIPE_DELETED_MESSAGE})
        );
    }
}
