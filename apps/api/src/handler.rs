//! # HTTP リクエストハンドラ
//!
//! ```text
//! handler.rs          # 親モジュール（re-export）
//! └── handler/
//!     ├── user.rs     # GET /user
//!     └── auth.rs     # POST /login
//! ```
//!
//! どのハンドラもエクストラクタを取らない。リクエストボディ・ヘッダ・クエリは
//! 一切読まれないため、ハンドラ由来のリジェクションは発生しない。

pub mod auth;
pub mod user;

pub use auth::{LOGIN_ACK, login};
pub use user::{UsersResponse, get_users};
