//! # API ドキュメント生成 CLI
//!
//! `generate-api-docs` の引数定義と実行処理。バイナリは引数の解析と
//! トレーシング初期化だけを行い、残りは [`run`] に任せる。
//!
//! ## 値の優先順位
//!
//! コマンドライン引数（対応する環境変数を含む） > 設定ファイル > 既定値
//!
//! | 引数 | 環境変数 | 設定ファイルのキー | 既定値 |
//! |------|----------|--------------------|--------|
//! | `--file` / `-f` | `API_DOCS_INPUT` | `file` | SampleAPI 自身の OpenAPI |
//! | `--format` | - | `format` | `markdown` |
//! | `--output` / `-o` | `API_DOCS_OUTPUT` | `output` | 標準出力 |
//! | `--name` | `API_DOCS_NAME` | `name` | `sampleapi` |
//!
//! 設定ファイルはカレントディレクトリの `autodocs.config.json`（`--config` で変更可）。
//! 無ければ既定値で続行し、JSON として解釈できなければエラーにする。
//!
//! ~~~text
//! {
//!   "file": "specs",
//!   "format": "markdown",
//!   "output": "output"
//! }
//! ~~~
//!
//! ## 入力
//!
//! `--file` には OpenAPI JSON ファイルかディレクトリを渡す。ディレクトリは
//! 再帰的にたどり、`*.json` をすべて処理する。各ドキュメントの名前は
//! ファイル名から拡張子を除いたものになる。

use std::{
   fs,
   io::{self, Write},
   path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use utoipa::{OpenApi as _, openapi::OpenApi};

use crate::{api_docs, error::DocsError, openapi::ApiDoc};

/// 既定の設定ファイル名
pub const CONFIG_FILE: &str = "autodocs.config.json";

/// 既定のドキュメント名
pub const DEFAULT_NAME: &str = "sampleapi";

/// 出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
   /// ルートごとの Markdown
   #[default]
   Markdown,
   /// OpenAPI YAML
   Openapi,
}

/// `generate-api-docs` のコマンドライン引数
#[derive(Debug, Parser)]
#[command(name = "generate-api-docs", version, about = "SampleAPI の API ドキュメントを生成する")]
pub struct Cli {
   /// 入力の OpenAPI JSON（ファイルまたはディレクトリ）
   #[arg(long, short, env = "API_DOCS_INPUT")]
   pub file: Option<PathBuf>,

   /// 出力形式（既定: markdown）
   #[arg(long, value_enum)]
   pub format: Option<OutputFormat>,

   /// 出力ディレクトリ（省略時は標準出力）
   #[arg(long, short, env = "API_DOCS_OUTPUT")]
   pub output: Option<PathBuf>,

   /// ドキュメント名（見出しと出力ファイル名に使う。既定: sampleapi）
   #[arg(long, env = "API_DOCS_NAME")]
   pub name: Option<String>,

   /// 設定ファイルのパス
   #[arg(long, default_value = CONFIG_FILE)]
   pub config: PathBuf,
}

/// `autodocs.config.json` の内容
///
/// 未知のキーは無視する。
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
pub struct FileConfig {
   pub file:   Option<PathBuf>,
   pub format: Option<OutputFormat>,
   pub output: Option<PathBuf>,
   pub name:   Option<String>,
}

impl FileConfig {
   /// 設定ファイルを読み込む
   ///
   /// ファイルが無ければ空の設定を返す。
   pub fn load(path: &Path) -> Result<Self, DocsError> {
      let text = match fs::read_to_string(path) {
         Ok(text) => text,
         Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "設定ファイルが無いため既定値を使います");
            return Ok(Self::default());
         }
         Err(source) => {
            return Err(DocsError::Io {
               path: path.to_path_buf(),
               source,
            });
         }
      };

      serde_json::from_str(&text).map_err(|source| DocsError::Config {
         path: path.to_path_buf(),
         source,
      })
   }
}

/// 引数と設定ファイルを合成した実行オプション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
   pub input:  Option<PathBuf>,
   pub format: OutputFormat,
   pub output: Option<PathBuf>,
   pub name:   String,
}

impl GenerateOptions {
   /// 引数にある値を優先し、無いものを設定ファイル、既定値の順で補う
   pub fn resolve(cli: &Cli, config: FileConfig) -> Self {
      Self {
         input:  cli.file.clone().or(config.file),
         format: cli.format.or(config.format).unwrap_or_default(),
         output: cli.output.clone().or(config.output),
         name:   cli
            .name
            .clone()
            .or(config.name)
            .unwrap_or_else(|| DEFAULT_NAME.to_string()),
      }
   }
}

/// ドキュメントを生成する
///
/// 出力ディレクトリがあれば書き出したファイルのパスを返す。
/// 無ければ `stdout` に書き、空の一覧を返す。
pub fn run<W: Write>(cli: &Cli, stdout: &mut W) -> anyhow::Result<Vec<PathBuf>> {
   let config = FileConfig::load(&cli.config).context("設定ファイルの読み込みに失敗しました")?;
   let options = GenerateOptions::resolve(cli, config);
   tracing::debug!(?options, "ドキュメント生成を開始します");

   let documents = load_documents(&options).context("OpenAPI ドキュメントの読み込みに失敗しました")?;

   let mut written = Vec::new();
   for (name, openapi) in &documents {
      let rendered = render(options.format, openapi, name)?;

      let Some(dir) = &options.output else {
         stdout.write_all(rendered.as_bytes())?;
         continue;
      };

      let path = match options.format {
         OutputFormat::Markdown => api_docs::write_markdown(dir, name, &rendered),
         OutputFormat::Openapi => api_docs::write_openapi_yaml(dir, name, &rendered),
      }
      .context("ドキュメントの書き出しに失敗しました")?;
      tracing::info!(path = %path.display(), "API ドキュメントを生成しました");
      written.push(path);
   }

   Ok(written)
}

fn render(format: OutputFormat, openapi: &OpenApi, name: &str) -> Result<String, DocsError> {
   match format {
      OutputFormat::Markdown => api_docs::markdown_for(openapi, name),
      OutputFormat::Openapi => openapi.to_yaml().map_err(|e| DocsError::Yaml(e.to_string())),
   }
}

/// 名前と OpenAPI ドキュメントの組を返す
///
/// 入力が無ければ SampleAPI 自身のドキュメント 1 件。
fn load_documents(options: &GenerateOptions) -> Result<Vec<(String, OpenApi)>, DocsError> {
   let Some(input) = &options.input else {
      return Ok(vec![(options.name.clone(), ApiDoc::openapi())]);
   };

   let mut files = Vec::new();
   find_openapi_files(input, &mut files)?;
   if files.is_empty() {
      return Err(DocsError::NoInput(input.clone()));
   }

   files
      .into_iter()
      .map(|path| {
         let text = fs::read_to_string(&path).map_err(|source| DocsError::Io {
            path: path.clone(),
            source,
         })?;
         let openapi = serde_json::from_str(&text).map_err(|source| DocsError::InvalidInput {
            path: path.clone(),
            source,
         })?;
         Ok((document_name(&path), openapi))
      })
      .collect()
}

/// `*.json` を集める。ディレクトリは名前順に再帰的にたどる
fn find_openapi_files(path: &Path, found: &mut Vec<PathBuf>) -> Result<(), DocsError> {
   if !path.is_dir() {
      if path.extension().is_some_and(|ext| ext == "json") {
         found.push(path.to_path_buf());
      }
      return Ok(());
   }

   let io_error = |source: io::Error| DocsError::Io {
      path: path.to_path_buf(),
      source,
   };
   let mut entries = fs::read_dir(path)
      .map_err(io_error)?
      .map(|entry| entry.map(|e| e.path()))
      .collect::<Result<Vec<_>, _>>()
      .map_err(io_error)?;
   entries.sort();

   for entry in &entries {
      find_openapi_files(entry, found)?;
   }
   Ok(())
}

fn document_name(path: &Path) -> String {
   path.file_stem()
      .map_or_else(|| DEFAULT_NAME.to_string(), |stem| stem.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   fn cli(args: &[&str]) -> Cli {
      let argv = std::iter::once("generate-api-docs").chain(args.iter().copied());
      Cli::try_parse_from(argv).unwrap()
   }

   #[test]
   fn test_resolve_引数が無ければ既定値になる() {
      let options = GenerateOptions::resolve(&cli(&[]), FileConfig::default());

      assert_eq!(
         options,
         GenerateOptions {
            input:  None,
            format: OutputFormat::Markdown,
            output: None,
            name:   DEFAULT_NAME.to_string(),
         }
      );
   }

   #[test]
   fn test_resolve_引数は設定ファイルより優先される() {
      let config = FileConfig {
         file:   Some(PathBuf::from("specs")),
         format: Some(OutputFormat::Openapi),
         output: Some(PathBuf::from("from-config")),
         name:   Some("config-name".to_string()),
      };

      let options = GenerateOptions::resolve(
         &cli(&["--format", "markdown", "--name", "cli-name"]),
         config,
      );

      assert_eq!(options.format, OutputFormat::Markdown);
      assert_eq!(options.name, "cli-name");
      assert_eq!(options.input, Some(PathBuf::from("specs")));
      assert_eq!(options.output, Some(PathBuf::from("from-config")));
   }

   #[test]
   fn test_設定ファイルの形式名は小文字で書く() {
      let config: FileConfig = serde_json::from_str(r#"{"format": "openapi", "lang": "py"}"#).unwrap();

      assert_eq!(config.format, Some(OutputFormat::Openapi));
   }

   #[test]
   fn test_document_nameは拡張子を除いたファイル名() {
      assert_eq!(document_name(Path::new("specs/v1/billing.json")), "billing");
   }
}
