//! # グレースフルシャットダウン
//!
//! API サーバーとドキュメントビューアが共通で使う終了シグナル待ち。

use tokio::signal;

/// Ctrl+C または SIGTERM を待つ
///
/// シグナルハンドラの登録に失敗した場合は、そのシグナルを待たない。
pub async fn shutdown_signal() {
   let ctrl_c = async {
      if let Err(e) = signal::ctrl_c().await {
         tracing::error!("Ctrl+C ハンドラの登録に失敗しました: {}", e);
         std::future::pending::<()>().await;
      }
   };

   #[cfg(unix)]
   let terminate = async {
      match signal::unix::signal(signal::unix::SignalKind::terminate()) {
         Ok(mut stream) => {
            stream.recv().await;
         }
         Err(e) => {
            tracing::error!("SIGTERM ハンドラの登録に失敗しました: {}", e);
            std::future::pending::<()>().await;
         }
      }
   };

   #[cfg(not(unix))]
   let terminate = std::future::pending::<()>();

   tokio::select! {
      () = ctrl_c => tracing::info!("SIGINT を受信しました。シャットダウンを開始します"),
      () = terminate => tracing::info!("SIGTERM を受信しました。シャットダウンを開始します"),
   }
}
