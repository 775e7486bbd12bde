//! # ユーザーハンドラ
//!
//! `GET /user` は常に空のユーザー一覧 `{"users":[]}` を返す。
//! ユーザーの永続化やモデルは持たない。

use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `GET /user` のレスポンスボディ
///
/// 要素の型は定めていない。`users` は常に空配列になる。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct UsersResponse {
   #[schema(value_type = Vec<Object>)]
   pub users: Vec<serde_json::Value>,
}

impl UsersResponse {
   pub fn empty() -> Self {
      Self::default()
   }
}

/// ユーザー一覧を返す
///
/// リクエストの内容に関わらず、常に空のユーザー一覧を返す。
#[utoipa::path(
   get,
   path = "/user",
   tag = "user",
   responses(
      (status = 200, description = "ユーザー一覧（常に空）", body = UsersResponse,
         content_type = "application/json", example = json!({"users": []}))
   )
)]
#[tracing::instrument]
pub async fn get_users() -> Json<UsersResponse> {
   tracing::debug!("空のユーザー一覧を返します");
   Json(UsersResponse::empty())
}
