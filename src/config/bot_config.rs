use crate::config::{BotKind, Redacted, env_parsing};
use anyhow::{Context, Result};
use reqwest::Method;
use url::Url;

const DEFAULT_API_BASE: &str = "https://api.twitter.com";
const DEFAULT_MARKIT_BASE: &str = "http://dev.markitondemand.com/MODApis/Api/v2";

/// OAuth 1.0a の鍵ペア2組。プロセスの生存期間中は不変
#[derive(Clone)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_key: String,
    pub access_secret: String,
}

/// ストリームの接続先（メソッド＋URL）
#[derive(Clone, Debug)]
pub struct StreamEndpoint {
    pub method: Method,
    pub url: Url,
}

#[derive(Clone)]
pub struct BotConfig {
    pub kind: BotKind,
    pub credentials: Credentials,
    /// 自分自身のツイートを拾わないための screen_name
    pub screen_name: String,

    pub stream: StreamEndpoint,
    pub api_base: String,   // 例: https://api.twitter.com
    pub markit_base: String,
}

impl BotConfig {
    pub fn from_env(kind: BotKind) -> Result<Self> {
        let _ = dotenvy::from_filename(".env");
        Self::from_lookup(kind, env_parsing::process_env)
    }

    /// `lookup` から設定を組み立てる。`from_env` はプロセスの環境変数を渡すだけ
    pub fn from_lookup(kind: BotKind, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let prefix = kind.env_prefix();
        let key = |k: &str| env_parsing::prefixed(prefix, k);
        let must = |k: &str| env_parsing::must(&lookup, &key(k));

        let credentials = Credentials {
            consumer_key: must("CONSUMER_KEY")?,
            consumer_secret: must("CONSUMER_SECRET")?,
            access_key: must("ACCESS_KEY")?,
            access_secret: must("ACCESS_SECRET")?,
        };
        let screen_name = must("NAME").context("bot username left blank")?;

        let stream_url = env_parsing::opt(&lookup, &key("STREAM_URL"))
            .unwrap_or_else(|| kind.default_stream_url().to_string());
        let stream = StreamEndpoint {
            method: kind.stream_method(),
            url: Url::parse(&stream_url)
                .with_context(|| format!("invalid stream URL: {stream_url}"))?,
        };

        let api_base = env_parsing::opt(&lookup, "TWITTER_API_BASE")
            .unwrap_or_else(|| DEFAULT_API_BASE.into())
            .trim_end_matches('/')
            .to_string();
        let markit_base = env_parsing::opt(&lookup, "MARKIT_BASE_URL")
            .unwrap_or_else(|| DEFAULT_MARKIT_BASE.into())
            .trim_end_matches('/')
            .to_string();

        Ok(Self { kind, credentials, screen_name, stream, api_base, markit_base })
    }

    pub fn redacted(&self) -> Redacted<'_> {
        Redacted(self)
    }
}
