//! # OpenAPI 仕様定義
//!
//! ハンドラの `#[utoipa::path]` 注釈から OpenAPI ドキュメントを組み立てる。
//! `ApiDoc::openapi()` で取得し、`generate-api-docs` が YAML / Markdown に出力する。

use utoipa::OpenApi;

use crate::handler::{UsersResponse, auth, user};

#[derive(OpenApi)]
#[openapi(
   info(
      title = "SampleAPI",
      version = "0.1.0",
      description = "空のユーザー一覧とログイン受付のスタブを提供する API"
   ),
   paths(user::get_users, auth::login),
   components(schemas(UsersResponse)),
   tags(
      (name = "user", description = "ユーザー"),
      (name = "auth", description = "ログイン（認証処理なし）")
   )
)]
pub struct ApiDoc;
