//! # ドメイン層エラー定義
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |
//! | `NotFound` | 400 Bad Request | ID 形式不正、またはエンティティが存在しない |
//!
//! `NotFound` が 404 ではなく 400 なのは API の契約による。
//! ID の形式不正と未存在を呼び出し側から区別できないようにしている。
//!
//! `Display` の文言はそのままレスポンスの `message` になるため、変更してはならない。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 保持する文字列はクライアントに返すメッセージそのもの。
    #[error("{0}")]
    Validation(String),

    /// エンティティが見つからない
    ///
    /// - `entity_type`: エンティティの種類（"Recipe" など）
    /// - `id`: リクエストで渡された識別子（形式不正でもそのまま保持する）
    #[error("{entity_type} with id {id} does not exist")]
    NotFound {
        entity_type: &'static str,
        id:          String,
    },
}

impl DomainError {
    /// バリデーションエラーを生成する
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
