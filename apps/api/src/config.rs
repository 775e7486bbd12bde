//! # サーバー設定
//!
//! 環境変数から HTTP サーバーのバインド先を読み込む。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `SAMPLE_API_HOST` | No | `127.0.0.1` | バインドアドレス |
//! | `SAMPLE_API_PORT` | No | `5000` | ポート番号 |
//!
//! どちらも未設定なら `127.0.0.1:5000` で起動する。
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use sampleapi_api::config::ServerConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = ServerConfig::from_env()?;
//! let addr = config.socket_addr()?;
//! ```

use std::{env, net::SocketAddr};

use crate::error::ConfigError;

/// バインドアドレスの環境変数名
pub const HOST_ENV: &str = "SAMPLE_API_HOST";
/// ポート番号の環境変数名
pub const PORT_ENV: &str = "SAMPLE_API_PORT";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;

/// HTTP サーバー設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
   /// バインドアドレス（例: `127.0.0.1`, `0.0.0.0`）
   pub host: String,
   /// ポート番号
   pub port: u16,
}

impl Default for ServerConfig {
   fn default() -> Self {
      Self {
         host: DEFAULT_HOST.to_string(),
         port: DEFAULT_PORT,
      }
   }
}

impl ServerConfig {
   /// プロセスの環境変数から設定を読み込む
   pub fn from_env() -> Result<Self, ConfigError> {
      Self::from_lookup(|key| env::var(key).ok())
   }

   /// 任意のキー参照関数から設定を読み込む
   ///
   /// 未設定のキーはデフォルト値を使う。ポート番号が数値として解釈できない場合は
   /// デフォルト値に置き換えずエラーを返す。
   pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
      let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
      let port = match lookup(PORT_ENV) {
         Some(value) => value
            .trim()
            .parse::<u16>()
            .map_err(|source| ConfigError::InvalidPort { value, source })?,
         None => DEFAULT_PORT,
      };

      Ok(Self { host, port })
   }

   /// `host:port` を [`SocketAddr`] に変換する
   pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
      let value = format!("{}:{}", self.host, self.port);
      value
         .parse()
         .map_err(|source| ConfigError::InvalidAddress { value, source })
   }
}
