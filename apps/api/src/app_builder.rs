//! # ルーター構築
//!
//! ルート登録とレイヤー構成を担当する。`main.rs` は設定読み込みとサーバー起動に集中する。
//!
//! | Method | Path     | Handler     |
//! |--------|----------|-------------|
//! | GET    | `/user`  | `get_users` |
//! | POST   | `/login` | `login`     |
//!
//! 宣言したパスへの他メソッドは axum 既定の 405、未宣言パスは 404 になる。
//! フォールバックは設定しない。

use axum::{
   Router,
   routing::{get, post},
};
use sampleapi_shared::{
   CanonicalLogLineLayer,
   observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
   request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
   trace::TraceLayer,
};

use crate::handler::{get_users, login};

/// ユーザー一覧のパス
pub const USER_PATH: &str = "/user";
/// ログインのパス
pub const LOGIN_PATH: &str = "/login";

/// ルートの宣言順（メソッド, パス）
///
/// Router への登録とドキュメントの並び順はこの順序に従う。
pub const ROUTE_ORDER: &[(&str, &str)] = &[("GET", USER_PATH), ("POST", LOGIN_PATH)];

/// ルートとレイヤーを組み立てた Router を返す
///
/// 状態を持たないため、何度呼んでも同じ構成の Router になる。
pub fn build_app() -> Router {
   Router::new()
      .route(USER_PATH, get(get_users))
      .route(LOGIN_PATH, post(login))
      // レイヤー順序（下に書いたものが外側）
      // 1. SetRequestIdLayer（最外）: x-request-id が無ければ UUID v7 を付与
      // 2. TraceLayer: request_id を含む request スパンを作成
      // 3. CanonicalLogLineLayer: スパン内でリクエスト完了サマリを出力
      // 4. PropagateRequestIdLayer: レスポンスヘッダに x-request-id をコピー
      .layer(PropagateRequestIdLayer::x_request_id())
      .layer(CanonicalLogLineLayer)
      .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
      .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
