//! ストリーミング API を購読して、流れてきたツイートを bot の処理に渡す

use std::sync::Arc;
use std::time::Duration;

use futures_util::Stream;
use tokio::sync::watch;

use crate::actions::EventAction;
use crate::config::StreamEndpoint;
use crate::twitter::OAuthSigner;
use handler::Dispatch;

mod connection;
mod decoder;
mod error;
mod handler;

pub use decoder::{RecordDecoder, decode_event};
pub use error::StreamError;

pub struct StreamListener {
    http: reqwest::Client,
    signer: OAuthSigner,
    endpoint: StreamEndpoint,
    screen_name: String,
    action: Arc<dyn EventAction>,
}

impl StreamListener {
    pub fn new(
        http: reqwest::Client,
        signer: OAuthSigner,
        endpoint: StreamEndpoint,
        screen_name: impl Into<String>,
        action: Arc<dyn EventAction>,
    ) -> Self {
        Self { http, signer, endpoint, screen_name: screen_name.into(), action }
    }

    /// 接続して、エラーになるか shutdown が立つまでイベントを処理し続ける。
    /// 再接続はしない（呼び出し側が決める）。shutdown で抜けた時だけ `Ok(())`
    pub async fn run(&self, shutdown: &mut watch::Receiver<bool>) -> Result<(), StreamError> {
        tracing::info!(
            method = %self.endpoint.method,
            url = %self.endpoint.url,
            "Connecting to streaming API…"
        );

        let resp = tokio::select! {
            resp = connection::open_stream(&self.http, &self.signer, &self.endpoint) => resp?,
            _ = shutdown_requested(shutdown) => return Ok(()),
        };

        tracing::info!(status = %resp.status(), "Connected to streaming API");
        self.consume(resp.bytes_stream(), shutdown).await
    }

    /// `run` を回し続ける。`reconnect` が None なら最初のエラーでそのまま返す（従来どおりプロセス終了へ）。
    /// Some なら待ってから繋ぎ直す
    pub async fn run_supervised(
        &self,
        reconnect: Option<Duration>,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Result<(), StreamError> {
        loop {
            let err = match self.run(shutdown).await {
                Ok(()) => return Ok(()),
                Err(e) => e,
            };

            // 接続できなかったのか、読んでいる途中で切れたのか
            let phase = if err.is_startup() { "connect" } else { "read" };

            let Some(delay) = reconnect else {
                tracing::error!(error = %err, phase, "stream listener failed");
                return Err(err);
            };

            tracing::warn!(
                error = %err,
                phase,
                delay_secs = delay.as_secs_f64(),
                "Streaming connection lost. Reconnecting…"
            );
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = shutdown_requested(shutdown) => return Ok(()),
            }
        }
    }

    /// 開いたボディを 1 レコードずつ読んで処理する。
    /// 1 件の処理（下流への API 呼び出し込み）が終わるまで次は読まない
    pub async fn consume<S, B, E>(
        &self,
        body: S,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Result<(), StreamError>
    where
        S: Stream<Item = Result<B, E>>,
        B: AsRef<[u8]>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let mut decoder = RecordDecoder::new(body);
        let (mut handled, mut skipped) = (0u64, 0u64);

        let result = loop {
            let record = tokio::select! {
                biased;
                _ = shutdown_requested(shutdown) => {
                    tracing::info!("stream listener stopping (shutdown requested)");
                    break Ok(());
                }
                record = decoder.next_record() => match record {
                    Ok(r) => r,
                    Err(e) => break Err(e),
                },
            };

            let event = match decode_event(&record) {
                Ok(ev) => ev,
                Err(e) => break Err(e),
            };
            match handler::dispatch(&event, &self.screen_name, self.action.as_ref()).await {
                Dispatch::Handled => handled += 1,
                Dispatch::OwnTweet | Dispatch::Control => skipped += 1,
            }
        };

        tracing::info!(handled, skipped, "stopped reading status stream");
        result
    }
}

/// `true` が送られるまで待つ。送信側が先に消えたら永遠に待つ
pub(crate) async fn shutdown_requested(rx: &mut watch::Receiver<bool>) {
    let sender_gone = rx.wait_for(|stop| *stop).await.is_err();
    if sender_gone {
        std::future::pending::<()>().await;
    }
}
