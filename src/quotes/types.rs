use serde::Deserialize;

/// Markit の Quote API のレスポンス（必要なところだけ）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Quote {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    pub last_price: f64,
    #[serde(default)]
    pub change: f64,
    pub change_percent: f64,
    pub high: f64,
    pub low: f64,
    pub open: f64,
    /// 例: "Wed Oct 23 16:00:00 UTC-04:00 2013"
    pub timestamp: String,
    #[serde(default)]
    pub volume: Option<u64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
}

/// Lookup API の 1 件
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Company {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub exchange: String,
}
