//! stockbot: replies to q:SYMBOL requests with stock quotes

use stream_bots::app;
use stream_bots::config::BotKind;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run(BotKind::Stock).await
}
