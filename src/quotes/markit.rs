use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use super::types::{Company, Quote};

/// Markit が「見つからない」時に返すメッセージの書き出し
const NO_SYMBOL_MATCH: &str = "No symbol matches found";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum QuoteError {
    /// シンボルとして存在しない。名前検索にフォールバックしてよい
    #[error("{0}")]
    NoSymbolMatch(String),

    #[error("quote API error: {0}")]
    Api(String),

    #[error("quote request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("quote response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

impl QuoteError {
    fn from_message(message: &str) -> Self {
        if message.starts_with(NO_SYMBOL_MATCH) {
            QuoteError::NoSymbolMatch(message.to_string())
        } else {
            QuoteError::Api(message.to_string())
        }
    }
}

#[async_trait]
pub trait QuoteService: Send + Sync {
    async fn quote(&self, symbol: &str) -> Result<Quote, QuoteError>;

    /// 会社名（の一部）から候補シンボルを探す
    async fn lookup(&self, name: &str) -> Result<Vec<Company>, QuoteError>;
}

pub struct MarkitClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl MarkitClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self { http, base_url: base_url.into(), timeout: DEFAULT_REQUEST_TIMEOUT }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, QuoteError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.http.get(&url).query(query).timeout(self.timeout).send().await?;

        let status = resp.status();
        let raw = resp.text().await?;

        decode_body(status.is_success(), &raw)
    }
}

/// Markit はエラーでも 200 で `{"Message": "..."}` を返してくることがある
fn decode_body<T: DeserializeOwned>(ok_status: bool, raw: &str) -> Result<T, QuoteError> {
    let v: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(_) if !ok_status => return Err(QuoteError::Api(raw.trim().to_string())),
        Err(e) => return Err(e.into()),
    };

    if let Some(msg) = v.get("Message").and_then(|m| m.as_str()) {
        return Err(QuoteError::from_message(msg));
    }
    if !ok_status {
        return Err(QuoteError::Api(raw.trim().to_string()));
    }

    Ok(serde_json::from_value(v)?)
}

#[async_trait]
impl QuoteService for MarkitClient {
    async fn quote(&self, symbol: &str) -> Result<Quote, QuoteError> {
        self.get_json("/Quote/json", &[("symbol", symbol)]).await
    }

    async fn lookup(&self, name: &str) -> Result<Vec<Company>, QuoteError> {
        self.get_json("/Lookup/json", &[("input", name)]).await
    }
}
