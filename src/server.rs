//! ルートを持たない HTTP サーバ。ホスティング側のポート監視用に待ち受けるだけ

use anyhow::{Context, Result};
use axum::Router;
use axum::http::StatusCode;
use tokio::net::TcpListener;
use tokio::sync::watch;

/// `:8080` のようにホストが無ければ全インターフェースで待つ
pub fn listen_addr(spec: &str) -> String {
    if spec.starts_with(':') {
        format!("0.0.0.0{spec}")
    } else {
        spec.to_string()
    }
}

pub fn router() -> Router {
    Router::new().fallback(not_found)
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "404 page not found\n")
}

pub async fn bind(spec: &str) -> Result<TcpListener> {
    let addr = listen_addr(spec);
    TcpListener::bind(&addr).await.with_context(|| format!("failed to listen on {addr}"))
}

/// shutdown が立つまで待ち受ける
pub async fn serve_idle(
    listener: TcpListener,
    mut shutdown: watch::Receiver<bool>,
) -> std::io::Result<()> {
    axum::serve(listener, router())
        .with_graceful_shutdown(async move {
            let _ = shutdown.wait_for(|stop| *stop).await;
        })
        .await
}
