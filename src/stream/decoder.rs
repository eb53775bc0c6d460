//! レスポンスボディ（バイト列のストリーム）を 1 レコードずつに切り出す
//!
//! レコードは改行区切り、または `delimited=length` の長さ前置き
//! （10 進のバイト数の行 + その長さの本文）のどちらか。先頭が数字なら長さ前置きとみなす。
//! 空行は keep-alive なので読み捨てる。

use std::pin::Pin;

use futures_util::{Stream, StreamExt};

use super::StreamError;
use crate::twitter::StreamEvent;

/// これを超える長さ前置きは壊れているとみなす
const MAX_RECORD_LEN: usize = 16 * 1024 * 1024;

/// エラーメッセージに載せるレコードの最大長
const RECORD_PREVIEW_LEN: usize = 200;

pub struct RecordDecoder<S> {
    body: Pin<Box<S>>,
    buf: Vec<u8>,
}

impl<S, B, E> RecordDecoder<S>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    pub fn new(body: S) -> Self {
        Self { body: Box::pin(body), buf: Vec::new() }
    }

    /// 次の 1 レコード。接続が閉じたら `StreamError::Closed`
    pub async fn next_record(&mut self) -> Result<Vec<u8>, StreamError> {
        loop {
            if let Some(record) = self.take_record()? {
                return Ok(record);
            }

            match self.body.next().await {
                Some(Ok(chunk)) => self.buf.extend_from_slice(chunk.as_ref()),
                Some(Err(e)) => return Err(StreamError::Transport(e.into())),
                None => return self.finish(),
            }
        }
    }

    /// バッファから完結したレコードを 1 件取り出す。足りなければ None
    fn take_record(&mut self) -> Result<Option<Vec<u8>>, StreamError> {
        let start =
            self.buf.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(self.buf.len());
        self.buf.drain(..start);

        let Some(&first) = self.buf.first() else {
            return Ok(None);
        };
        let Some(nl) = self.buf.iter().position(|&b| b == b'\n') else {
            // 区切りが来ないまま上限を超えた
            if self.buf.len() > MAX_RECORD_LEN {
                return Err(StreamError::TooLarge(MAX_RECORD_LEN));
            }
            return Ok(None);
        };

        if !first.is_ascii_digit() {
            if nl > MAX_RECORD_LEN {
                return Err(StreamError::TooLarge(MAX_RECORD_LEN));
            }
            let record = self.buf[..nl].trim_ascii().to_vec();
            self.buf.drain(..=nl);
            return Ok(Some(record));
        }

        let len = parse_length(&self.buf[..nl])?;
        let body_start = nl + 1;
        if self.buf.len() < body_start + len {
            return Ok(None);
        }

        let record = self.buf[body_start..body_start + len].trim_ascii().to_vec();
        self.buf.drain(..body_start + len);
        Ok(Some(record))
    }

    /// 接続終了時: 改行で終わっていない最後のレコードがあればそれを返す
    fn finish(&mut self) -> Result<Vec<u8>, StreamError> {
        let rest = self.buf.trim_ascii();
        if rest.is_empty() {
            return Err(StreamError::Closed);
        }
        // 長さ前置きの途中で切れた
        if rest[0].is_ascii_digit() {
            self.buf.clear();
            return Err(StreamError::Closed);
        }

        let record = rest.to_vec();
        self.buf.clear();
        Ok(record)
    }
}

fn parse_length(line: &[u8]) -> Result<usize, StreamError> {
    let text = String::from_utf8_lossy(line.trim_ascii()).into_owned();
    match text.parse::<usize>() {
        Ok(len) if len <= MAX_RECORD_LEN => Ok(len),
        _ => Err(StreamError::Frame(text)),
    }
}

/// 1 レコードをツイートとしてデコード
pub fn decode_event(record: &[u8]) -> Result<StreamEvent, StreamError> {
    serde_json::from_slice(record).map_err(|source| {
        let mut preview = String::from_utf8_lossy(record).into_owned();
        if preview.len() > RECORD_PREVIEW_LEN {
            let mut cut = RECORD_PREVIEW_LEN;
            while !preview.is_char_boundary(cut) {
                cut -= 1;
            }
            preview.truncate(cut);
            preview.push('…');
        }
        StreamError::Decode { source, record: preview }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    type Chunk = Result<Vec<u8>, std::io::Error>;

    fn decoder(chunks: &[&str]) -> RecordDecoder<impl Stream<Item = Chunk>> {
        let owned: Vec<Chunk> = chunks.iter().map(|c| Ok(c.as_bytes().to_vec())).collect();
        RecordDecoder::new(stream::iter(owned))
    }

    async fn collect(
        mut dec: RecordDecoder<impl Stream<Item = Chunk>>,
    ) -> (Vec<String>, StreamError) {
        let mut out = Vec::new();
        loop {
            match dec.next_record().await {
                Ok(r) => out.push(String::from_utf8(r).unwrap()),
                Err(e) => return (out, e),
            }
        }
    }

    #[tokio::test]
    async fn splits_newline_delimited_records() {
        let (records, end) = collect(decoder(&["{\"a\":1}\r\n{\"b\":2}\r\n"])).await;
        assert_eq!(records, vec![r#"{"a":1}"#, r#"{"b":2}"#]);
        assert!(matches!(end, StreamError::Closed));
    }

    #[tokio::test]
    async fn reassembles_records_across_chunks_and_skips_keepalives() {
        let chunks = ["\r\n", "{\"te", "xt\":\"hi\"}", "\r\n\r\n", "{}\n"];
        let (records, _) = collect(decoder(&chunks)).await;
        assert_eq!(records, vec![r#"{"text":"hi"}"#, "{}"]);
    }

    #[tokio::test]
    async fn reads_length_delimited_records() {
        // 長さは末尾の \r\n を含む
        let (records, _) = collect(decoder(&["9\r\n{\"a\":1}\r\n", "4\r\n", "{}", "\r\n"])).await;
        assert_eq!(records, vec![r#"{"a":1}"#, "{}"]);
    }

    #[tokio::test]
    async fn length_delimited_body_may_contain_newlines() {
        let (records, _) = collect(decoder(&["10\r\n{\"a\":\n1}\r\n\r\n"])).await;
        assert_eq!(records, vec!["{\"a\":\n1}"]);
    }

    #[tokio::test]
    async fn trailing_record_without_newline_is_returned() {
        let (records, end) = collect(decoder(&["{\"a\":1}\n{\"b\":2}"])).await;
        assert_eq!(records, vec![r#"{"a":1}"#, r#"{"b":2}"#]);
        assert!(matches!(end, StreamError::Closed));
    }

    #[tokio::test]
    async fn bad_length_prefix_is_a_frame_error() {
        let (records, end) = collect(decoder(&["12x\r\n{}\r\n"])).await;
        assert!(records.is_empty());
        assert!(matches!(end, StreamError::Frame(ref s) if s == "12x"));
    }

    #[tokio::test]
    async fn unterminated_record_over_the_limit_is_rejected() {
        let mib = vec![b'{'; 1024 * 1024];
        let chunks: Vec<Chunk> = (0..17).map(|_| Ok(mib.clone())).collect();

        let (records, end) = collect(RecordDecoder::new(stream::iter(chunks))).await;

        assert!(records.is_empty());
        assert!(matches!(end, StreamError::TooLarge(MAX_RECORD_LEN)));
    }

    #[tokio::test]
    async fn newline_record_over_the_limit_is_rejected() {
        let mut big = vec![b'x'; MAX_RECORD_LEN + 1];
        big.extend_from_slice(b"\n{}\n");

        let chunks: Vec<Chunk> = vec![Ok(big)];
        let (records, end) = collect(RecordDecoder::new(stream::iter(chunks))).await;

        assert!(records.is_empty());
        assert!(matches!(end, StreamError::TooLarge(_)));
    }

    #[tokio::test]
    async fn transport_error_is_surfaced() {
        let chunks: Vec<Chunk> = vec![
            Ok(b"{}\n".to_vec()),
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset")),
        ];
        let (records, end) = collect(RecordDecoder::new(stream::iter(chunks))).await;
        assert_eq!(records, vec!["{}"]);
        assert!(matches!(end, StreamError::Transport(_)));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = decode_event(b"{not json").unwrap_err();
        match err {
            StreamError::Decode { record, .. } => assert_eq!(record, "{not json"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn decode_error_preview_is_truncated() {
        let long = format!("{{{}", "x".repeat(1000));
        let err = decode_event(long.as_bytes()).unwrap_err();
        let StreamError::Decode { record, .. } = err else { panic!("expected decode error") };
        assert!(record.ends_with('…'));
        assert!(record.len() < 300);
    }
}
