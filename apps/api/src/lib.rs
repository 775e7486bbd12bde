//! # SampleAPI
//!
//! 2 つの固定レスポンスを返すだけの HTTP サービスと、そのルートの
//! API ドキュメント生成ツール・ドキュメントビューアの共通ライブラリ。
//!
//! ```text
//! GET  /user   → 200 {"users":[]}
//! POST /login  → 200 ok
//! ```
//!
//! データの永続化・認証・入力検証は行わない。
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - ルート登録とミドルウェア構成
//! - [`config`] - 環境変数からのサーバー設定
//! - [`error`] - 設定・ドキュメント生成のエラー
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`openapi`] - OpenAPI 仕様
//! - [`api_docs`] - OpenAPI からの Markdown 生成
//! - [`docs_cli`] - `generate-api-docs` の引数と実行処理
//! - [`viewer`] - 生成した Markdown の閲覧用 Router
//! - [`shutdown`] - 終了シグナル待ち

pub mod api_docs;
pub mod app_builder;
pub mod config;
pub mod docs_cli;
pub mod error;
pub mod handler;
pub mod openapi;
pub mod shutdown;
pub mod viewer;
