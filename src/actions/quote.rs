use std::sync::Arc;

use async_trait::async_trait;

use super::EventAction;
use crate::quotes::{QuoteError, QuoteService, format_quote, requested_tokens};
use crate::twitter::{StatusApi, StreamEvent};

/// stockbot: `q:AAPL,MSFT` を含むツイートに株価を投稿する
pub struct QuoteReplier {
    quotes: Arc<dyn QuoteService>,
    api: Arc<dyn StatusApi>,
}

impl QuoteReplier {
    pub fn new(quotes: Arc<dyn QuoteService>, api: Arc<dyn StatusApi>) -> Self {
        Self { quotes, api }
    }

    /// 本文から解決できた分だけ投稿文を作る。解決できないトークンは黙って飛ばす
    pub async fn quotes_for(&self, text: &str) -> Vec<String> {
        let mut out = Vec::new();

        for token in requested_tokens(text) {
            match self.quotes.quote(&token).await {
                Ok(q) => out.push(format_quote(&q)),
                // シンボルじゃなかったので会社名として引き直す
                Err(QuoteError::NoSymbolMatch(_)) => {
                    let companies = match self.quotes.lookup(&token).await {
                        Ok(c) => c,
                        Err(e) => {
                            tracing::debug!(%token, error = %e, "company lookup failed");
                            continue;
                        }
                    };

                    for company in companies {
                        match self.quotes.quote(&company.symbol).await {
                            Ok(q) => out.push(format_quote(&q)),
                            Err(e) => {
                                let symbol = &company.symbol;
                                tracing::debug!(%symbol, error = %e, "quote failed");
                            }
                        }
                    }
                }
                Err(e) => {
                    tracing::debug!(%token, error = %e, "quote failed");
                }
            }
        }

        out
    }
}

#[async_trait]
impl EventAction for QuoteReplier {
    async fn handle(&self, event: &StreamEvent) {
        for status in self.quotes_for(&event.text).await {
            if let Err(e) = self.api.post_status(&status).await {
                tracing::debug!(error = %e, "post status failed (ignored)");
            }
        }
    }
}
