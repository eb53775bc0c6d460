mod bot_config;
mod bot_kind;
pub(crate) mod env_parsing;
mod redacted;

pub use bot_config::{BotConfig, Credentials, StreamEndpoint};
pub use bot_kind::BotKind;
pub use redacted::Redacted;
