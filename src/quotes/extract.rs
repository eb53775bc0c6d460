use once_cell::sync::Lazy;
use regex::Regex;

// q:AAPL / q:AAPL,MSFT,netflix
static QUOTE_REQUEST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"q:[0-9A-Za-z_]+(,[0-9A-Za-z_]+)*").expect("valid quote regex"));

/// ツイート本文から `q:` で要求された銘柄トークンを取り出す。最初の 1 件のみ
pub fn requested_tokens(text: &str) -> Vec<String> {
    let Some(m) = QUOTE_REQUEST.find(text) else {
        return Vec::new();
    };

    m.as_str()
        .trim_start_matches("q:")
        .split(',')
        .map(str::to_string)
        .collect()
}
