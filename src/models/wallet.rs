use serde::{Deserialize, Serialize};

use crate::models::token::WalletKind;

/// One recently traded token in a wallet's activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentTokenActivity {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub holding: f64,
    #[serde(default)]
    pub roi: String,
    #[serde(default)]
    pub realized_pnl: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
}

/// Aggregate trading profile for a wallet, fetched fresh per request and
/// never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletProfile {
    pub address: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "twitter_url", default)]
    pub twitter_url: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: WalletKind,
    #[serde(default)]
    pub winrate: f64,
    #[serde(default)]
    pub token_traded: u64,
    #[serde(default)]
    pub realized_pnl: String,
    #[serde(default)]
    pub combined_roi: String,
    #[serde(default)]
    pub total_invested_formatted: Option<String>,
    #[serde(default)]
    pub recent_tokens: Vec<RecentTokenActivity>,
}
