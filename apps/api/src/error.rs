//! # エラー定義
//!
//! ルートのハンドラはエラーを返さない（常に固定レスポンス）。
//! ここで扱うのはサーバー起動時の設定エラー、ドキュメント生成ツールのエラー、
//! ドキュメントビューアのエラーのみ。
//! 不正なメソッドや未定義パスへのリクエストは axum の既定動作（405 / 404）に任せる。

use std::{net::AddrParseError, num::ParseIntError, path::PathBuf};

use axum::{
   http::StatusCode,
   response::{IntoResponse, Response},
};
use thiserror::Error;

/// 設定の読み込みで発生するエラー
#[derive(Debug, Error)]
pub enum ConfigError {
   /// ポート番号が `u16` として解釈できない
   #[error("ポート番号が不正です: {value:?}")]
   InvalidPort {
      value:  String,
      #[source]
      source: ParseIntError,
   },

   /// `host:port` がソケットアドレスとして解釈できない
   #[error("バインドアドレスが不正です: {value:?}")]
   InvalidAddress {
      value:  String,
      #[source]
      source: AddrParseError,
   },
}

/// API ドキュメント生成で発生するエラー
#[derive(Debug, Error)]
pub enum DocsError {
   /// 入力の読み込み、出力ディレクトリの作成、ファイル書き込みのいずれかに失敗した
   #[error("ファイルの入出力に失敗しました: {}", .path.display())]
   Io {
      path:   PathBuf,
      #[source]
      source: std::io::Error,
   },

   /// OpenAPI ドキュメントの YAML 変換に失敗した
   #[error("OpenAPI YAML の生成に失敗しました: {0}")]
   Yaml(String),

   /// レスポンス例の JSON 整形に失敗した
   #[error("レスポンス例の整形に失敗しました")]
   Json(#[from] serde_json::Error),

   /// Markdown の組み立てに失敗した
   #[error("Markdown の組み立てに失敗しました")]
   Fmt(#[from] std::fmt::Error),

   /// 設定ファイルが JSON として解釈できない
   #[error("設定ファイルを解析できません: {}", .path.display())]
   Config {
      path:   PathBuf,
      #[source]
      source: serde_json::Error,
   },

   /// 入力の OpenAPI ドキュメントが解釈できない
   #[error("OpenAPI ドキュメントを解析できません: {}", .path.display())]
   InvalidInput {
      path:   PathBuf,
      #[source]
      source: serde_json::Error,
   },

   /// 入力パスに OpenAPI ドキュメント（`*.json`）が見つからない
   #[error("入力に OpenAPI ドキュメントがありません: {}", .0.display())]
   NoInput(PathBuf),
}

/// ドキュメントビューアのエラー
///
/// ファイルが無い場合は 404、読み込み失敗は 500 として返す。
#[derive(Debug, Error)]
pub enum ViewerError {
   /// 要求されたドキュメントが存在しない、またはファイル名が不正
   #[error("ドキュメントが見つかりません")]
   NotFound,

   /// ドキュメントディレクトリやファイルの読み込みに失敗した
   #[error("ドキュメントの読み込みに失敗しました: {}", .path.display())]
   Io {
      path:   PathBuf,
      #[source]
      source: std::io::Error,
   },
}

/// 404 の本文
pub const NOT_FOUND_MESSAGE: &str = "File not found.";

impl IntoResponse for ViewerError {
   fn into_response(self) -> Response {
      match self {
         Self::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE).into_response(),
         err @ Self::Io { .. } => {
            tracing::error!(error = ?err, "ドキュメントの読み込みに失敗しました");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
         }
      }
   }
}
