//! フィルタ済みイベント 1 件に対する bot ごとの処理

use async_trait::async_trait;

use crate::twitter::StreamEvent;

mod log;
mod quote;
mod retweet;

pub use log::EventLogger;
pub use quote::QuoteReplier;
pub use retweet::Retweeter;

/// 下流 API の失敗は呼び出し元に返さない（投げっぱなし）
#[async_trait]
pub trait EventAction: Send + Sync {
    async fn handle(&self, event: &StreamEvent);
}
