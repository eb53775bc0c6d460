//! Twitter / Markit の代わりに立てるローカルの axum サーバ

#![allow(dead_code)]

use axum::Router;
use stream_bots::config::Credentials;
use tokio::net::TcpListener;

/// 空いているポートで `router` を立ち上げてベース URL を返す
pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn credentials() -> Credentials {
    Credentials {
        consumer_key: "consumer-key".into(),
        consumer_secret: "consumer-secret".into(),
        access_key: "access-key".into(),
        access_secret: "access-secret".into(),
    }
}

/// OAuth 1.0a の Authorization ヘッダが付いているか（署名の中身までは見ない）
pub fn is_signed(headers: &axum::http::HeaderMap) -> bool {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| {
            v.starts_with("OAuth ")
                && v.contains(r#"oauth_consumer_key="consumer-key""#)
                && v.contains(r#"oauth_token="access-key""#)
                && v.contains("oauth_signature=")
        })
        .unwrap_or(false)
}
