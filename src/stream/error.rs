use reqwest::StatusCode;
use thiserror::Error;

/// ストリーム接続〜デコードループで起きるエラー。どれもループを止める
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("failed to create status stream request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("error getting status stream: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("error getting status stream ({status}): {body}")]
    Status { status: StatusCode, body: String },

    #[error("status stream read failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("malformed record length prefix: {0:?}")]
    Frame(String),

    #[error("stream record exceeds {0} bytes")]
    TooLarge(usize),

    #[error("decoding tweet failed: {source} (record: {record})")]
    Decode {
        #[source]
        source: serde_json::Error,
        record: String,
    },

    #[error("status stream closed by server")]
    Closed,
}

impl StreamError {
    /// 接続前に失敗したか（イベントを 1 件も読んでいない）
    pub fn is_startup(&self) -> bool {
        matches!(
            self,
            StreamError::Request(_) | StreamError::Connect(_) | StreamError::Status { .. }
        )
    }
}
