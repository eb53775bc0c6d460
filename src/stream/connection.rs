use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use super::StreamError;
use crate::config::StreamEndpoint;
use crate::twitter::OAuthSigner;

/// 署名付きリクエストでストリームを開く。200 以外は本文を読み切ってエラーにする
pub(crate) async fn open_stream(
    http: &reqwest::Client,
    signer: &OAuthSigner,
    endpoint: &StreamEndpoint,
) -> Result<reqwest::Response, StreamError> {
    let auth = signer.authorization_header(&endpoint.method, &endpoint.url, &[]);

    let req = http
        .request(endpoint.method.clone(), endpoint.url.clone())
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(AUTHORIZATION, auth)
        .build()
        .map_err(StreamError::Request)?;

    let resp = http.execute(req).await.map_err(StreamError::Connect)?;

    if resp.status() != StatusCode::OK {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(StreamError::Status { status, body });
    }

    Ok(resp)
}
