use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use thiserror::Error;
use url::Url;

use super::oauth::OAuthSigner;

/// ストリーム用の Client を共有するので、REST 呼び出しはリクエストごとに打ち切る
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum TwitterError {
    #[error("invalid request URL {url}: {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Twitter request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Twitter API error {status}: {body}")]
    Api { status: StatusCode, body: String },
}

/// bot が叩く Twitter の書き込み系 API
#[async_trait]
pub trait StatusApi: Send + Sync {
    async fn retweet(&self, id: u64) -> Result<(), TwitterError>;

    async fn post_status(&self, text: &str) -> Result<(), TwitterError>;
}

pub struct TwitterClient {
    http: reqwest::Client,
    signer: OAuthSigner,
    base_url: String,
    timeout: Duration,
}

impl TwitterClient {
    pub fn new(http: reqwest::Client, signer: OAuthSigner, base_url: impl Into<String>) -> Self {
        Self { http, signer, base_url: base_url.into(), timeout: DEFAULT_REQUEST_TIMEOUT }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url, TwitterError> {
        let url = format!("{}{}", self.base_url, path);
        Url::parse(&url).map_err(|source| TwitterError::Url { url, source })
    }

    async fn signed_post(&self, url: Url, form: &[(&str, &str)]) -> Result<(), TwitterError> {
        let auth = self.signer.authorization_header(&Method::POST, &url, form);

        let resp = self
            .http
            .post(url)
            .header(AUTHORIZATION, auth)
            .form(form)
            .timeout(self.timeout)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(TwitterError::Api { status, body });
        }

        Ok(())
    }
}

#[async_trait]
impl StatusApi for TwitterClient {
    async fn retweet(&self, id: u64) -> Result<(), TwitterError> {
        let url = self.endpoint(&format!("/1.1/statuses/retweet/{id}.json"))?;
        self.signed_post(url, &[]).await
    }

    async fn post_status(&self, text: &str) -> Result<(), TwitterError> {
        let url = self.endpoint("/1.1/statuses/update.json")?;
        self.signed_post(url, &[("status", text)]).await
    }
}
