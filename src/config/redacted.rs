use super::BotConfig;

pub struct Redacted<'a>(pub(crate) &'a BotConfig);

impl std::fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = self.0;
        let creds = &c.credentials;
        f.debug_struct("BotConfig")
            .field("kind", &c.kind)
            .field("screen_name", &c.screen_name)
            .field("consumer_key", &mask(&creds.consumer_key))
            .field("consumer_secret", &mask(&creds.consumer_secret))
            .field("access_key", &mask(&creds.access_key))
            .field("access_secret", &mask(&creds.access_secret))
            .field("stream_method", &c.stream.method)
            .field("stream_url", &c.stream.url.as_str())
            .field("api_base", &c.api_base)
            .field("markit_base", &c.markit_base)
            .finish()
    }
}

fn mask(s: &str) -> String {
    match s.get(..3) {
        Some(head) if s.len() > 6 => format!("{head}***"),
        _ => "***".into(),
    }
}
