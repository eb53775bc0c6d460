use std::sync::Arc;

use async_trait::async_trait;

use super::EventAction;
use crate::twitter::{StatusApi, StreamEvent};

/// echobot: 流れてきたツイートをそのままリツイート
pub struct Retweeter {
    api: Arc<dyn StatusApi>,
}

impl Retweeter {
    pub fn new(api: Arc<dyn StatusApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl EventAction for Retweeter {
    async fn handle(&self, event: &StreamEvent) {
        if let Err(e) = self.api.retweet(event.id).await {
            tracing::debug!(id = event.id, error = %e, "retweet failed (ignored)");
        }
    }
}
