//! fitstats: logs tweets tracking fitstats_en_us

use stream_bots::app;
use stream_bots::config::BotKind;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run(BotKind::FitStats).await
}
