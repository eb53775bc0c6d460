//! Twitter API まわり（型＋署名＋HTTP）

mod client;
pub mod oauth;
mod types;

pub use client::{StatusApi, TwitterClient, TwitterError};
pub use oauth::OAuthSigner;
pub use types::{StreamEvent, User};
