//! # SampleAPI サーバー
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `SAMPLE_API_HOST` | No | バインドアドレス（デフォルト: `127.0.0.1`） |
//! | `SAMPLE_API_PORT` | No | ポート番号（デフォルト: `5000`） |
//! | `RUST_LOG` | No | ログレベル（デフォルト: `info,sampleapi=debug`） |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! cargo run -p sampleapi-api --bin sampleapi-server
//!
//! SAMPLE_API_HOST=0.0.0.0 SAMPLE_API_PORT=8080 LOG_FORMAT=json cargo run -p sampleapi-api --bin sampleapi-server --release
//! ```

use anyhow::Context as _;
use sampleapi_api::{app_builder::build_app, config::ServerConfig, shutdown::shutdown_signal};
use sampleapi_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

const SERVICE_NAME: &str = "sampleapi";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   init_tracing(TracingConfig::from_env(SERVICE_NAME));
   let _tracing_guard = tracing::info_span!("app", service = SERVICE_NAME).entered();

   let config = ServerConfig::from_env().context("設定の読み込みに失敗しました")?;
   let addr = config.socket_addr()?;

   tracing::info!("SampleAPI サーバーを起動します: {}", addr);

   let listener = TcpListener::bind(addr)
      .await
      .with_context(|| format!("{addr} へのバインドに失敗しました"))?;
   tracing::info!("SampleAPI サーバーが起動しました: {}", listener.local_addr()?);

   axum::serve(listener, build_app())
      .with_graceful_shutdown(shutdown_signal())
      .await?;

   tracing::info!("SampleAPI サーバーを停止しました");
   Ok(())
}
