use super::types::Quote;

/// 投稿用の定型文。数値はすべて小数点以下 3 桁
pub fn format_quote(q: &Quote) -> String {
    format!(
        "{}: {:.3}({:.3}%) // High: {:.3} // Low: {:.3} // Opened at {:.3} // #stockQuoted at {}",
        q.symbol, q.last_price, q.change_percent, q.high, q.low, q.open, q.timestamp
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_fixed_template() {
        let q = Quote {
            symbol: "AAPL".into(),
            last_price: 123.4,
            change_percent: -1.5,
            high: 125.0,
            low: 120.25,
            open: 121.0,
            timestamp: "Wed Oct 23 16:00:00 UTC-04:00 2013".into(),
            ..Default::default()
        };

        assert_eq!(
            format_quote(&q),
            "AAPL: 123.400(-1.500%) // High: 125.000 // Low: 120.250 // Opened at 121.000 \
             // #stockQuoted at Wed Oct 23 16:00:00 UTC-04:00 2013"
        );
    }
}
