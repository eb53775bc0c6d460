use async_trait::async_trait;

use super::EventAction;
use crate::twitter::StreamEvent;
use crate::util::{single_line, unescape_entities};

/// fitstats: ログに書くだけ。Twitter には何もしない
#[derive(Debug, Default)]
pub struct EventLogger;

#[async_trait]
impl EventAction for EventLogger {
    async fn handle(&self, event: &StreamEvent) {
        let text = single_line(&unescape_entities(&event.text));
        tracing::info!(author = %event.author(), id = event.id, %text, "stream event");
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    /// fmt レイヤの出力をためておく Writer
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn writes_author_id_and_unescaped_text() {
        let ev: StreamEvent = serde_json::from_str(
            r#"{"id":5,"text":"ran 10k &amp; felt great\nagain","user":{"screen_name":"runner"}}"#,
        )
        .unwrap();

        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        // current_thread ランタイムなので await をまたいでも同じスレッド
        {
            let _guard = tracing::subscriber::set_default(subscriber);
            EventLogger.handle(&ev).await;
        }

        let out = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(out.contains("author=runner"), "{out}");
        assert!(out.contains("id=5"), "{out}");
        assert!(out.contains("ran 10k & felt great again"), "{out}");
    }
}
