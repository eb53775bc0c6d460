//! Twitter のストリーミング API を購読する bot 3 種の共通部分
//!
//! - `echobot`: 流れてきたツイートをリツイート
//! - `fitstats`: `fitstats_en_us` を含むツイートをログに出す
//! - `stockbot`: `q:AAPL,MSFT` のような要求に株価を投稿する

pub mod actions;
pub mod app;
pub mod config;
pub mod quotes;
pub mod server;
pub mod stream;
pub mod twitter;
pub mod util;
