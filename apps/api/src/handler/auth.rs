//! # ログインハンドラ
//!
//! `POST /login` は受付済みを示す `ok` を返すだけのスタブ。
//! 資格情報の検証・セッション発行は行わない。パス名から認証処理を推測して
//! 追加しないこと（現状の no-op を維持する）。

/// `POST /login` のレスポンスボディ
pub const LOGIN_ACK: &str = "ok";

/// ログイン要求を受け付ける
///
/// リクエストボディは読まずに、常に固定文字列 `ok` を返す。
#[utoipa::path(
   post,
   path = "/login",
   tag = "auth",
   responses(
      (status = 200, description = "受付済み", body = String,
         content_type = "text/plain", example = json!("ok"))
   )
)]
#[tracing::instrument]
pub async fn login() -> &'static str {
   tracing::debug!("ログイン要求を受け付けました（資格情報は検証しません）");
   LOGIN_ACK
}
