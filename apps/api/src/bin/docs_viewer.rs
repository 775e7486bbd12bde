//! # ドキュメントビューア
//!
//! `generate-api-docs` の出力ディレクトリにある Markdown を HTML で配信する。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `API_DOCS_DIR` | No | 配信するディレクトリ（デフォルト: `output`） |
//! | `DOCS_VIEWER_HOST` | No | バインドアドレス（デフォルト: `127.0.0.1`） |
//! | `DOCS_VIEWER_PORT` | No | ポート番号（デフォルト: `3000`） |
//!
//! ## 起動方法
//!
//! ```bash
//! cargo run --bin docs-viewer -p sampleapi-api -- --dir output
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use sampleapi_api::{config::ServerConfig, shutdown::shutdown_signal, viewer::build_viewer};
use sampleapi_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

const SERVICE_NAME: &str = "docs-viewer";

#[derive(Debug, Parser)]
#[command(name = "docs-viewer", version, about = "生成した API ドキュメントをブラウザで閲覧する")]
struct Cli {
   /// 配信する Markdown のディレクトリ
   #[arg(long, env = "API_DOCS_DIR", default_value = "output")]
   dir: PathBuf,

   /// バインドアドレス
   #[arg(long, env = "DOCS_VIEWER_HOST", default_value = "127.0.0.1")]
   host: String,

   /// ポート番号
   #[arg(long, env = "DOCS_VIEWER_PORT", default_value_t = 3000)]
   port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   let cli = Cli::parse();

   init_tracing(TracingConfig::from_env(SERVICE_NAME));
   let _tracing_guard = tracing::info_span!("app", service = SERVICE_NAME).entered();

   let addr = ServerConfig {
      host: cli.host,
      port: cli.port,
   }
   .socket_addr()?;

   let listener = TcpListener::bind(addr)
      .await
      .with_context(|| format!("{addr} へのバインドに失敗しました"))?;
   tracing::info!(
      dir = %cli.dir.display(),
      "ドキュメントビューアが起動しました: http://{}",
      listener.local_addr()?
   );

   axum::serve(listener, build_viewer(cli.dir))
      .with_graceful_shutdown(shutdown_signal())
      .await?;

   Ok(())
}
