//! echobot: retweets every tweet on the bot's user stream

use stream_bots::app;
use stream_bots::config::BotKind;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run(BotKind::Echo).await
}
