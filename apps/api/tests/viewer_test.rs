//! # ドキュメントビューアテスト
//!
//! 一時ディレクトリに置いた Markdown を `build_viewer()` 経由で取得し、
//! 一覧・表示・404 の振る舞いを検証する。

use std::fs;

use axum::body::{Body, to_bytes};
use http::{Request, StatusCode};
use pretty_assertions::assert_eq;
use rstest::rstest;
use sampleapi_api::viewer::build_viewer;
use tempfile::TempDir;
use tower::ServiceExt;

fn docs_dir() -> TempDir {
   let tmp = tempfile::tempdir().unwrap();
   fs::write(tmp.path().join("sampleapi-docs.md"), "# API Documentation (sampleapi)\n\n## GET /user\n").unwrap();
   fs::write(tmp.path().join("billing-docs.md"), "# Billing\n").unwrap();
   fs::write(tmp.path().join("notes.txt"), "not markdown").unwrap();
   fs::create_dir(tmp.path().join("archive")).unwrap();
   fs::write(tmp.path().join("archive").join("old-docs.md"), "# Old\n").unwrap();
   tmp
}

async fn get(tmp: &TempDir, uri: &str) -> (StatusCode, String) {
   let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
   let response = build_viewer(tmp.path()).oneshot(request).await.unwrap();
   let status = response.status();
   let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
   (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_一覧にはディレクトリ直下のmarkdownだけが名前順に並ぶ() {
   let tmp = docs_dir();

   let (status, body) = get(&tmp, "/").await;

   assert_eq!(status, StatusCode::OK);
   assert!(body.contains("<h1>Available Docs</h1>"), "{body}");
   let billing = body.find("/view?file=billing-docs.md").unwrap();
   let sampleapi = body.find("/view?file=sampleapi-docs.md").unwrap();
   assert!(billing < sampleapi);
   assert!(!body.contains("notes.txt"));
   assert!(!body.contains("old-docs.md"));
}

#[tokio::test]
async fn test_ディレクトリが無ければ空の一覧になる() {
   let tmp = tempfile::tempdir().unwrap();
   let request = Request::builder().uri("/").body(Body::empty()).unwrap();

   let response = build_viewer(tmp.path().join("missing")).oneshot(request).await.unwrap();

   assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_指定したmarkdownがhtmlで表示される() {
   let tmp = docs_dir();

   let (status, body) = get(&tmp, "/view?file=sampleapi-docs.md").await;

   assert_eq!(status, StatusCode::OK);
   assert!(body.contains("<h1>API Documentation (sampleapi)</h1>"), "{body}");
   assert!(body.contains("<h2>GET /user</h2>"), "{body}");
   assert!(body.contains("href=\"/\""));
}

#[rstest]
#[case::存在しないファイル("/view?file=missing-docs.md")]
#[case::ファイル指定なし("/view")]
#[case::markdown以外("/view?file=notes.txt")]
#[case::親ディレクトリ("/view?file=..%2Fsampleapi-docs.md")]
#[case::サブディレクトリ("/view?file=archive%2Fold-docs.md")]
#[tokio::test]
async fn test_表示できないファイルは404になる(#[case] uri: &str) {
   let tmp = docs_dir();

   let (status, body) = get(&tmp, uri).await;

   assert_eq!(status, StatusCode::NOT_FOUND);
   assert_eq!(body, "File not found.");
}
