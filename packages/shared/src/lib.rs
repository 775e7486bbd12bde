//! # SampleAPI 共有ユーティリティ
//!
//! サーバーとドキュメント生成ツールの両方から使用される横断的関心事をまとめる。
//!
//! - [`observability`] - トレーシング初期化、Request ID 生成、リクエストスパン
//! - [`canonical_log`] - リクエスト完了時の 1 行サマリログ
//!
//! ビジネスロジック（ルート・ハンドラ）はここに置かない。

pub mod canonical_log;
pub mod observability;

pub use canonical_log::CanonicalLogLineLayer;
