use reqwest::Method;
use std::fmt::Display;

/// どの bot として動くか。環境変数のプレフィックスとストリームの接続先が決まる
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BotKind {
    Echo,
    FitStats,
    Stock,
}

const USER_STREAM_URL: &str = "https://userstream.twitter.com/1.1/user.json?with=user";
const FILTER_STREAM_URL: &str =
    "https://stream.twitter.com/1.1/statuses/filter.json?track=fitstats_en_us";

impl BotKind {
    pub fn env_prefix(self) -> &'static str {
        match self {
            BotKind::Echo => "ECHO",
            BotKind::FitStats => "TWEET_FIT",
            BotKind::Stock => "STOCK",
        }
    }

    pub fn default_stream_url(self) -> &'static str {
        match self {
            BotKind::Echo | BotKind::Stock => USER_STREAM_URL,
            BotKind::FitStats => FILTER_STREAM_URL,
        }
    }

    /// filter ストリームは POST
    pub fn stream_method(self) -> Method {
        match self {
            BotKind::Echo | BotKind::Stock => Method::GET,
            BotKind::FitStats => Method::POST,
        }
    }
}

impl Display for BotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BotKind::Echo => "echobot",
            BotKind::FitStats => "fitstats",
            BotKind::Stock => "stockbot",
        };

        write!(f, "{}", s)
    }
}
