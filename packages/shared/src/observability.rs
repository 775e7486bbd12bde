//! # Observability 基盤
//!
//! トレーシングの初期化と、HTTP リクエストごとの Request ID・スパン生成を提供する。
//!
//! ## 環境変数
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|------------|------|
//! | `RUST_LOG` | `info,sampleapi=debug` | ログレベルフィルタ |
//! | `LOG_FORMAT` | `pretty` | `json` または `pretty` |
//!
//! ## レイヤー構成
//!
//! ```text
//! SetRequestIdLayer(MakeRequestUuidV7) → TraceLayer(make_request_span) → handler
//! ```
//!
//! `SetRequestIdLayer` を最外に置くことで、スパン生成時点で `x-request-id` が確定している。

use http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Request ID を運ぶ HTTP ヘッダ名
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// `RUST_LOG` 未設定時のフィルタ
const DEFAULT_ENV_FILTER: &str = "info,sampleapi=debug";

/// ログ出力形式
///
/// 環境変数 `LOG_FORMAT` で切り替える。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
   /// JSON 形式（本番環境向け）
   Json,
   /// 人間が読みやすい形式（開発環境向け）
   #[default]
   Pretty,
}

impl LogFormat {
   /// 文字列からログ形式をパースする
   ///
   /// 不正な値は stderr に警告を出して [`Pretty`](LogFormat::Pretty) にフォールバックする。
   /// トレーシング初期化前に呼ばれるため `tracing` ではなく `eprintln!` を使う。
   pub fn parse(s: &str) -> Self {
      match s {
         "json" => Self::Json,
         "pretty" => Self::Pretty,
         other => {
            eprintln!("WARNING: unknown LOG_FORMAT={other:?}, falling back to pretty");
            Self::Pretty
         }
      }
   }

   /// 環境変数 `LOG_FORMAT` から読み取る
   pub fn from_env() -> Self {
      std::env::var("LOG_FORMAT")
         .map(|val| Self::parse(&val))
         .unwrap_or_default()
   }
}

/// ログの出力先
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogWriter {
   /// 標準出力（サーバー）
   #[default]
   Stdout,
   /// 標準エラー出力（標準出力を成果物に使う CLI ツール）
   Stderr,
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
   /// サービス名（`app` スパンの `service` フィールド）
   pub service_name: String,
   /// ログ出力形式
   pub log_format:   LogFormat,
   /// ログ出力先
   pub writer:       LogWriter,
}

impl TracingConfig {
   pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
      Self {
         service_name: service_name.into(),
         log_format,
         writer: LogWriter::default(),
      }
   }

   /// `LOG_FORMAT` 環境変数から出力形式を決定する
   pub fn from_env(service_name: impl Into<String>) -> Self {
      Self::new(service_name, LogFormat::from_env())
   }

   /// ログ出力先を標準エラー出力に切り替える
   pub fn with_stderr(mut self) -> Self {
      self.writer = LogWriter::Stderr;
      self
   }
}

/// グローバルなトレーシング subscriber を初期化する
///
/// プロセスにつき 1 回だけ呼び出すこと（2 回目以降はパニックする）。
pub fn init_tracing(config: TracingConfig) {
   use tracing_subscriber::{
      Layer as _,
      fmt::writer::BoxMakeWriter,
      layer::SubscriberExt,
      util::SubscriberInitExt,
   };

   let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
      .unwrap_or_else(|_| DEFAULT_ENV_FILTER.into());

   let writer = match config.writer {
      LogWriter::Stdout => BoxMakeWriter::new(std::io::stdout),
      LogWriter::Stderr => BoxMakeWriter::new(std::io::stderr),
   };

   let fmt_layer = match config.log_format {
      LogFormat::Json => tracing_subscriber::fmt::layer()
         .json()
         .flatten_event(true)
         .with_target(true)
         .with_current_span(true)
         .with_span_list(false)
         .with_writer(writer)
         .boxed(),
      LogFormat::Pretty => tracing_subscriber::fmt::layer().with_writer(writer).boxed(),
   };

   tracing_subscriber::registry()
      .with(env_filter)
      .with(fmt_layer)
      .init();
}

/// UUID v7 で Request ID を生成する
///
/// `SetRequestIdLayer` はリクエストに `x-request-id` が既にある場合は生成せず、
/// クライアント提供値をそのまま使う。
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
   fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
      HeaderValue::from_str(&Uuid::now_v7().to_string())
         .ok()
         .map(RequestId::new)
   }
}

/// `TraceLayer` 用のリクエストスパンを生成する
///
/// `x-request-id` ヘッダが無い、または ASCII でない場合は `-` を記録する。
pub fn make_request_span<B>(request: &Request<B>) -> tracing::Span {
   let request_id = request
      .headers()
      .get(REQUEST_ID_HEADER)
      .and_then(|value| value.to_str().ok())
      .unwrap_or("-");

   tracing::info_span!(
      "request",
      method = %request.method(),
      uri = %request.uri(),
      request_id = %request_id,
   )
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   #[test]
   fn test_parse_jsonでjsonを返す() {
      assert_eq!(LogFormat::parse("json"), LogFormat::Json);
   }

   #[test]
   fn test_parse_不正な値でprettyにフォールバックする() {
      assert_eq!(LogFormat::parse("yaml"), LogFormat::Pretty);
      assert_eq!(LogFormat::parse(""), LogFormat::Pretty);
      assert_eq!(LogFormat::parse("JSON"), LogFormat::Pretty);
   }

   #[test]
   fn test_tracing_configの出力先は標準出力がデフォルト() {
      let config = TracingConfig::new("sampleapi", LogFormat::Json);

      assert_eq!(config.service_name, "sampleapi");
      assert_eq!(config.log_format, LogFormat::Json);
      assert_eq!(config.writer, LogWriter::Stdout);
   }

   #[test]
   fn test_with_stderrで出力先が切り替わる() {
      let config = TracingConfig::new("generate-api-docs", LogFormat::Pretty).with_stderr();

      assert_eq!(config.writer, LogWriter::Stderr);
   }

   #[test]
   fn test_make_request_idがuuid_v7を生成する() {
      let request = Request::builder().uri("/user").body(()).unwrap();

      let id = MakeRequestUuidV7.make_request_id(&request).unwrap();
      let uuid = Uuid::parse_str(id.header_value().to_str().unwrap()).unwrap();

      assert_eq!(uuid.get_version(), Some(uuid::Version::SortRand));
   }

   #[test]
   fn test_make_request_idは呼び出しごとに異なる値を返す() {
      let request = Request::builder().uri("/login").body(()).unwrap();
      let mut make = MakeRequestUuidV7;

      let first = make.make_request_id(&request).unwrap();
      let second = make.make_request_id(&request).unwrap();

      assert_ne!(first.header_value(), second.header_value());
   }
}
