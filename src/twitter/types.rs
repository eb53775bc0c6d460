use serde::Deserialize;

/// ストリームから流れてくる 1 レコード分（ツイート）
///
/// フィールドはどれも欠けていてもよい。friends リストや delete 通知のような
/// 制御メッセージも同じ型でデコードされ、`user` が無いことで見分ける。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamEvent {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub id_str: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct User {
    #[serde(default)]
    pub screen_name: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl StreamEvent {
    pub fn author(&self) -> &str {
        self.user.as_ref().map(|u| u.screen_name.as_str()).unwrap_or_default()
    }

    /// ツイートとして扱えるか（制御メッセージでないか）
    pub fn is_status(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_authored_by(&self, screen_name: &str) -> bool {
        self.author().to_lowercase() == screen_name.to_lowercase()
    }
}
