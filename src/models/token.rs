use serde::{Deserialize, Serialize};

/// Per-window price-change percentages. The window set is closed: these
/// twelve labels are the only keys the analytics service ever returns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceChangeSet {
    #[serde(rename = "1m", default)]
    pub m1: Option<f64>,
    #[serde(rename = "5m", default)]
    pub m5: Option<f64>,
    #[serde(rename = "15m", default)]
    pub m15: Option<f64>,
    #[serde(rename = "30m", default)]
    pub m30: Option<f64>,
    #[serde(rename = "1h", default)]
    pub h1: Option<f64>,
    #[serde(rename = "2h", default)]
    pub h2: Option<f64>,
    #[serde(rename = "3h", default)]
    pub h3: Option<f64>,
    #[serde(rename = "4h", default)]
    pub h4: Option<f64>,
    #[serde(rename = "5h", default)]
    pub h5: Option<f64>,
    #[serde(rename = "6h", default)]
    pub h6: Option<f64>,
    #[serde(rename = "12h", default)]
    pub h12: Option<f64>,
    #[serde(rename = "24h", default)]
    pub h24: Option<f64>,
}

impl PriceChangeSet {
    /// Canonical window order. Observation lines and significant-move lists
    /// iterate in exactly this order.
    pub fn windows(&self) -> [(&'static str, Option<f64>); 12] {
        [
            ("1m", self.m1),
            ("5m", self.m5),
            ("15m", self.m15),
            ("30m", self.m30),
            ("1h", self.h1),
            ("2h", self.h2),
            ("3h", self.h3),
            ("4h", self.h4),
            ("5h", self.h5),
            ("6h", self.h6),
            ("12h", self.h12),
            ("24h", self.h24),
        ]
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub telegram: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    #[default]
    Normal,
    Kols,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Historic30d {
    pub realized_pnl: String,
    #[serde(default)]
    pub realized_pnl_raw: f64,
    #[serde(default)]
    pub total_change: f64,
    #[serde(default)]
    pub percentage_change: f64,
}

/// One entry in the token's top-wallet ranking. Ordering comes from the
/// service's own score ranking and is never re-sorted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopWalletEntry {
    pub address: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub twitter_url: Option<String>,
    #[serde(default)]
    pub picture_url: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: WalletKind,
    #[serde(rename = "realizedPnl", default)]
    pub realized_pnl: String,
    #[serde(rename = "realizedPnlRaw", default)]
    pub realized_pnl_raw: f64,
    #[serde(default)]
    pub winrate: f64,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub historic30d: Option<Historic30d>,
}

/// Point-in-time record of a token's market and risk metrics, as returned
/// by the analytics service. `pair_created_at` (millis) is not part of the
/// service payload; the scan pipeline fills it in from DexScreener pair data
/// when available.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSnapshot {
    pub name: String,
    pub symbol: String,
    pub address: String,
    #[serde(default)]
    pub decimals: u8,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub social: SocialLinks,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub fdv: Option<f64>,
    #[serde(default)]
    pub liquidity: Option<f64>,
    #[serde(rename = "volume24h", default)]
    pub volume_24h: Option<f64>,
    #[serde(default)]
    pub price_change: PriceChangeSet,
    #[serde(default)]
    pub risk_score: f64,
    #[serde(default)]
    pub is_rugged: bool,
    #[serde(default)]
    pub top_wallets: Vec<TopWalletEntry>,
    #[serde(default)]
    pub pair_created_at: Option<i64>,
}
