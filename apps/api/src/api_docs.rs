//! # Markdown API ドキュメント
//!
//! OpenAPI ドキュメントからルートごとの説明を抽出し、Markdown に整形する。
//!
//! ## 出力形式
//!
//! ~~~text
//! # API Documentation (<title>)
//!
//! ## GET /user
//!
//! **Function**: get_users
//!
//! **Description**: ...
//!
//! **Sample Response**:
//!
//! ```json
//! { ... }
//! ```
//! ~~~
//!
//! ファイルに書き出す場合は `<出力ディレクトリ>/<name>-docs.md` になる。
//! OpenAPI YAML は `<出力ディレクトリ>/<name>-openapi.yaml`。

use std::{
   fmt::Write as _,
   fs,
   path::{Path, PathBuf},
};

use serde_json::Value;
use utoipa::openapi::{OpenApi, PathItem, RefOr, path::Operation};

use crate::{app_builder::ROUTE_ORDER, error::DocsError};

/// 説明文が無いルートに使う文言
pub const NO_DESCRIPTION: &str = "No description provided.";

/// ハンドラ名が取れないルートに使う文言
const UNKNOWN_FUNCTION: &str = "unknown";

/// レスポンス例が無いルートに使う JSON
const PLACEHOLDER_SAMPLE: &str = "{\n  \"status\": \"ok\"\n}";

/// 1 ルート分のドキュメント
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDoc {
   pub method:      &'static str,
   pub path:        String,
   pub function:    String,
   pub description: String,
   pub sample:      SampleResponse,
}

/// 成功レスポンスの例
#[derive(Debug, Clone, PartialEq)]
pub enum SampleResponse {
   /// JSON ボディ
   Json(Value),
   /// プレーンテキストのボディ
   Text(String),
   /// 例が定義されていない
   Placeholder,
}

impl SampleResponse {
   /// コードフェンスの言語タグと本文を返す
   fn fenced(&self) -> Result<(&'static str, String), DocsError> {
      match self {
         Self::Json(value) => Ok(("json", serde_json::to_string_pretty(value)?)),
         Self::Text(text) => Ok(("text", text.clone())),
         Self::Placeholder => Ok(("json", PLACEHOLDER_SAMPLE.to_string())),
      }
   }
}

/// OpenAPI ドキュメントから全ルートを抽出する
///
/// [`ROUTE_ORDER`] にあるルートはその宣言順で先頭に並ぶ。
/// それ以外はドキュメント上の順序のまま後ろに続き、同一パス内は
/// GET, POST, PUT, PATCH, DELETE の順。
pub fn collect_routes(openapi: &OpenApi) -> Vec<RouteDoc> {
   let mut routes: Vec<RouteDoc> = openapi
      .paths
      .paths
      .iter()
      .flat_map(|(path, item)| {
         operations(item)
            .into_iter()
            .map(move |(method, operation)| route_doc(method, path, operation))
      })
      .collect();

   // 安定ソートなので、宣言順に無いルート同士の順序は保たれる
   routes.sort_by_key(|route| declaration_rank(route.method, &route.path));
   routes
}

fn declaration_rank(method: &str, path: &str) -> usize {
   ROUTE_ORDER
      .iter()
      .position(|&(m, p)| m == method && p == path)
      .unwrap_or(ROUTE_ORDER.len())
}

fn operations(item: &PathItem) -> Vec<(&'static str, &Operation)> {
   [
      ("GET", item.get.as_ref()),
      ("POST", item.post.as_ref()),
      ("PUT", item.put.as_ref()),
      ("PATCH", item.patch.as_ref()),
      ("DELETE", item.delete.as_ref()),
   ]
   .into_iter()
   .filter_map(|(method, operation)| operation.map(|op| (method, op)))
   .collect()
}

fn route_doc(method: &'static str, path: &str, operation: &Operation) -> RouteDoc {
   RouteDoc {
      method,
      path: path.to_string(),
      function: operation
         .operation_id
         .clone()
         .unwrap_or_else(|| UNKNOWN_FUNCTION.to_string()),
      description: describe(operation.summary.as_deref(), operation.description.as_deref()),
      sample: sample_response(operation),
   }
}

/// summary と description を 1 行の説明にまとめる
///
/// 改行は空白に畳む。どちらも空なら [`NO_DESCRIPTION`]。
fn describe(summary: Option<&str>, description: Option<&str>) -> String {
   let summary = summary.map(str::trim).filter(|s| !s.is_empty());
   let description = description.map(str::trim).filter(|s| !s.is_empty());

   let joined = match (summary, description) {
      (Some(s), Some(d)) if d.starts_with(s) => d.to_string(),
      (Some(s), Some(d)) => format!("{s} {d}"),
      (Some(s), None) | (None, Some(s)) => s.to_string(),
      (None, None) => return NO_DESCRIPTION.to_string(),
   };

   joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 200 レスポンスの最初のコンテンツの例を取り出す
fn sample_response(operation: &Operation) -> SampleResponse {
   let Some(RefOr::T(response)) = operation.responses.responses.get("200") else {
      return SampleResponse::Placeholder;
   };

   response
      .content
      .iter()
      .find_map(|(content_type, content)| {
         let example = content.example.as_ref()?;
         Some(match example {
            Value::String(text) if !content_type.contains("json") => {
               SampleResponse::Text(text.clone())
            }
            other => SampleResponse::Json(other.clone()),
         })
      })
      .unwrap_or(SampleResponse::Placeholder)
}

/// ルート一覧を Markdown に整形する
pub fn render_markdown(title: &str, routes: &[RouteDoc]) -> Result<String, DocsError> {
   let mut out = format!("# API Documentation ({title})\n\n");

   for route in routes {
      let (lang, body) = route.sample.fenced()?;
      write!(
         out,
         "## {} {}\n\n**Function**: {}\n\n**Description**: {}\n\n**Sample Response**:\n\n```{lang}\n{body}\n```\n\n",
         route.method, route.path, route.function, route.description,
      )?;
   }

   Ok(out)
}

/// OpenAPI ドキュメントから Markdown を生成する
pub fn markdown_for(openapi: &OpenApi, title: &str) -> Result<String, DocsError> {
   render_markdown(title, &collect_routes(openapi))
}

/// Markdown を `<dir>/<name>-docs.md` に書き出し、書き込んだパスを返す
///
/// 出力ディレクトリが無ければ作成する。既存ファイルは上書きする。
pub fn write_markdown(dir: &Path, name: &str, markdown: &str) -> Result<PathBuf, DocsError> {
   write_output(dir, &format!("{name}-docs.md"), markdown)
}

/// OpenAPI YAML を `<dir>/<name>-openapi.yaml` に書き出し、書き込んだパスを返す
pub fn write_openapi_yaml(dir: &Path, name: &str, yaml: &str) -> Result<PathBuf, DocsError> {
   write_output(dir, &format!("{name}-openapi.yaml"), yaml)
}

fn write_output(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf, DocsError> {
   fs::create_dir_all(dir).map_err(|source| DocsError::Io {
      path: dir.to_path_buf(),
      source,
   })?;

   let path = dir.join(file_name);
   fs::write(&path, contents).map_err(|source| DocsError::Io {
      path: path.clone(),
      source,
   })?;

   Ok(path)
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use serde_json::json;

   use super::*;

   fn route(sample: SampleResponse) -> RouteDoc {
      RouteDoc {
         method: "GET",
         path: "/user".to_string(),
         function: "get_users".to_string(),
         description: "ユーザー一覧を返す".to_string(),
         sample,
      }
   }

   #[test]
   fn test_describe_summaryとdescriptionを連結する() {
      assert_eq!(
         describe(Some("ユーザー一覧を返す"), Some("常に空。")),
         "ユーザー一覧を返す 常に空。"
      );
   }

   #[test]
   fn test_describe_descriptionがsummaryを含む場合は重複させない() {
      assert_eq!(
         describe(Some("一覧を返す"), Some("一覧を返す\n\n常に空。")),
         "一覧を返す 常に空。"
      );
   }

   #[test]
   fn test_describe_どちらも無ければ既定の文言になる() {
      assert_eq!(describe(None, None), NO_DESCRIPTION);
      assert_eq!(describe(Some("  "), Some("")), NO_DESCRIPTION);
   }

   #[test]
   fn test_json例はjsonフェンスで整形される() {
      let markdown =
         render_markdown("sampleapi", &[route(SampleResponse::Json(json!({"users": []})))])
            .unwrap();

      assert_eq!(
         markdown,
         "# API Documentation (sampleapi)\n\n\
          ## GET /user\n\n\
          **Function**: get_users\n\n\
          **Description**: ユーザー一覧を返す\n\n\
          **Sample Response**:\n\n\
          ```json\n{\n  \"users\": []\n}\n```\n\n"
      );
   }

   #[test]
   fn test_テキスト例はtextフェンスにそのまま出力される() {
      let markdown =
         render_markdown("sampleapi", &[route(SampleResponse::Text("ok".to_string()))]).unwrap();

      assert!(markdown.contains("```text\nok\n```"));
   }

   #[test]
   fn test_例が無いルートはプレースホルダになる() {
      let markdown = render_markdown("sampleapi", &[route(SampleResponse::Placeholder)]).unwrap();

      assert!(markdown.contains("```json\n{\n  \"status\": \"ok\"\n}\n```"));
   }

   #[test]
   fn test_declaration_rank_宣言順に無いルートは末尾になる() {
      assert_eq!(declaration_rank("GET", "/user"), 0);
      assert_eq!(declaration_rank("POST", "/login"), 1);
      assert_eq!(declaration_rank("GET", "/login"), ROUTE_ORDER.len());
      assert_eq!(declaration_rank("DELETE", "/items"), ROUTE_ORDER.len());
   }

   #[test]
   fn test_ルートが無ければ見出しのみ() {
      assert_eq!(
         render_markdown("empty", &[]).unwrap(),
         "# API Documentation (empty)\n\n"
      );
   }
}
