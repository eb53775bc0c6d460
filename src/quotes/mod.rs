//! 株価の取得（Markit On Demand）と投稿文の整形

mod extract;
mod format;
mod markit;
mod types;

pub use extract::requested_tokens;
pub use format::format_quote;
pub use markit::{MarkitClient, QuoteError, QuoteService};
pub use types::{Company, Quote};
