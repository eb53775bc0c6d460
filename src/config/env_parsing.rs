use anyhow::{Result, bail};
use std::env;

/// プロセスの環境変数を読む。テストでは代わりに HashMap などを渡す
pub fn process_env(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// 必須の値。未設定も空文字もエラー
pub fn must(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    match lookup(key) {
        Some(v) if !v.is_empty() => Ok(v),
        Some(_) => bail!("required env {key} is empty"),
        None => bail!("missing required env: {key}"),
    }
}

pub fn opt(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.is_empty())
}

/// `ECHO` + `NAME` → `ECHO_NAME`
pub fn prefixed(prefix: &str, key: &str) -> String {
    format!("{prefix}_{key}")
}
