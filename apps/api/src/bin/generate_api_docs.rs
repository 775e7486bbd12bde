//! # API ドキュメント生成ツール
//!
//! ハンドラの OpenAPI 注釈（または入力の OpenAPI JSON）から、ルートごとの
//! Markdown ドキュメントまたは OpenAPI YAML を生成する。
//! 引数と設定ファイルの扱いは [`sampleapi_api::docs_cli`] を参照。
//!
//! ## 使い方
//!
//! ```bash
//! # Markdown を標準出力へ
//! cargo run --bin generate-api-docs -p sampleapi-api
//!
//! # output/sampleapi-docs.md に書き出す
//! cargo run --bin generate-api-docs -p sampleapi-api -- --output output
//!
//! # output/sampleapi-openapi.yaml に書き出す
//! cargo run --bin generate-api-docs -p sampleapi-api -- --format openapi --output output
//!
//! # specs/ 以下の *.json をすべて Markdown に変換する
//! cargo run --bin generate-api-docs -p sampleapi-api -- --file specs --output output
//! ```

use clap::Parser as _;
use sampleapi_api::docs_cli::{self, Cli};
use sampleapi_shared::observability::{TracingConfig, init_tracing};

fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   let cli = Cli::parse();

   // 標準出力は成果物に使うため、ログは標準エラー出力へ
   init_tracing(TracingConfig::from_env("generate-api-docs").with_stderr());

   docs_cli::run(&cli, &mut std::io::stdout().lock())?;
   Ok(())
}
