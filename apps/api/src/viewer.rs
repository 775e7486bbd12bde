//! # ドキュメントビューア
//!
//! `generate-api-docs` が書き出した Markdown をブラウザで閲覧するための Router。
//!
//! | Method | Path | 説明 |
//! |--------|------|------|
//! | GET | `/` | ドキュメントディレクトリ直下の `*.md` 一覧 |
//! | GET | `/view?file=<name>.md` | 指定ファイルを HTML に変換して表示 |
//!
//! `file` がディレクトリ直下の `.md` ファイル名でない場合や、ファイルが
//! 存在しない場合は 404 `File not found.` を返す。
//! Markdown 中の生 HTML はエスケープしてテキストとして表示する。

use std::{
   io,
   path::{Component, Path, PathBuf},
   sync::Arc,
};

use axum::{
   Router,
   extract::{Query, State},
   response::Html,
   routing::get,
};
use pulldown_cmark::{Event, Options, Parser, html};
use sampleapi_shared::{CanonicalLogLineLayer, observability::make_request_span};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::error::ViewerError;

/// 一覧ページのタイトル
const PAGE_TITLE: &str = "AutoDoc Viewer";

#[derive(Debug)]
struct ViewerState {
   docs_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ViewQuery {
   file: Option<String>,
}

/// `docs_dir` を配信するビューアの Router を返す
pub fn build_viewer(docs_dir: impl Into<PathBuf>) -> Router {
   let state = Arc::new(ViewerState {
      docs_dir: docs_dir.into(),
   });

   Router::new()
      .route("/", get(list_docs))
      .route("/view", get(view_doc))
      .with_state(state)
      .layer(CanonicalLogLineLayer)
      .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
}

async fn list_docs(State(state): State<Arc<ViewerState>>) -> Result<Html<String>, ViewerError> {
   let files = list_markdown_files(&state.docs_dir).await?;
   Ok(Html(render_index(&files)))
}

async fn view_doc(
   State(state): State<Arc<ViewerState>>,
   Query(query): Query<ViewQuery>,
) -> Result<Html<String>, ViewerError> {
   let file = query
      .file
      .filter(|name| is_markdown_file_name(name))
      .ok_or(ViewerError::NotFound)?;

   let path = state.docs_dir.join(&file);
   let markdown = match tokio::fs::read_to_string(&path).await {
      Ok(markdown) => markdown,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(ViewerError::NotFound),
      Err(source) => return Err(ViewerError::Io { path, source }),
   };

   Ok(Html(render_page(&file, &markdown)))
}

/// ディレクトリ直下の `*.md` を名前順で返す
///
/// ディレクトリが無ければ空の一覧。
async fn list_markdown_files(dir: &Path) -> Result<Vec<String>, ViewerError> {
   let io_error = |source: io::Error| ViewerError::Io {
      path: dir.to_path_buf(),
      source,
   };

   let mut entries = match tokio::fs::read_dir(dir).await {
      Ok(entries) => entries,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
         tracing::warn!(dir = %dir.display(), "ドキュメントディレクトリがありません");
         return Ok(Vec::new());
      }
      Err(source) => return Err(io_error(source)),
   };

   let mut files = Vec::new();
   while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
      let name = entry.file_name().to_string_lossy().into_owned();
      if is_markdown_file_name(&name) && entry.file_type().await.map_err(io_error)?.is_file() {
         files.push(name);
      }
   }
   files.sort();
   Ok(files)
}

/// ディレクトリ直下を指す `.md` のファイル名か
fn is_markdown_file_name(name: &str) -> bool {
   let mut components = Path::new(name).components();
   matches!(
      (components.next(), components.next()),
      (Some(Component::Normal(_)), None)
   ) && !name.contains('\\')
      && name.ends_with(".md")
}

fn render_index(files: &[String]) -> String {
   let items: String = files
      .iter()
      .map(|file| {
         format!(
            "<li><a href=\"/view?file={}\">{}</a></li>",
            urlencoding::encode(file),
            escape_html(file)
         )
      })
      .collect();

   format!(
      "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{PAGE_TITLE}</title></head>\n\
       <body>\n<h1>Available Docs</h1>\n<ul>{items}</ul>\n</body>\n</html>\n"
   )
}

fn render_page(file: &str, markdown: &str) -> String {
   let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES).map(|event| match event {
      Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
      other => other,
   });
   let mut body = String::new();
   html::push_html(&mut body, parser);

   format!(
      "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n\
       <body>\n<a href=\"/\">&larr; Back to all docs</a>\n{body}</body>\n</html>\n",
      escape_html(file)
   )
}

fn escape_html(text: &str) -> String {
   let mut escaped = String::with_capacity(text.len());
   for c in text.chars() {
      match c {
         '&' => escaped.push_str("&amp;"),
         '<' => escaped.push_str("&lt;"),
         '>' => escaped.push_str("&gt;"),
         '"' => escaped.push_str("&quot;"),
         '\'' => escaped.push_str("&#39;"),
         _ => escaped.push(c),
      }
   }
   escaped
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   #[rstest]
   #[case("sampleapi-docs.md", true)]
   #[case("notes.txt", false)]
   #[case("../secret.md", false)]
   #[case("nested/a.md", false)]
   #[case("/etc/a.md", false)]
   #[case("..\\secret.md", false)]
   #[case("", false)]
   fn test_is_markdown_file_name(#[case] name: &str, #[case] expected: bool) {
      assert_eq!(is_markdown_file_name(name), expected);
   }

   #[test]
   fn test_一覧のリンクはurlエンコードされる() {
      let html = render_index(&["a b&c.md".to_string()]);

      assert!(html.contains("<a href=\"/view?file=a%20b%26c.md\">a b&amp;c.md</a>"), "{html}");
   }

   #[test]
   fn test_markdown中の生htmlはエスケープされる() {
      let html = render_page("a.md", "# 見出し\n\n<script>alert(1)</script>\n");

      assert!(html.contains("<h1>見出し</h1>"), "{html}");
      assert!(!html.contains("<script>"), "{html}");
   }
}
