use serde::{Deserialize, Serialize};

use crate::error::ScoutError;
use crate::models::timeframe::Timeframe;

pub const MIN_TRENDING_COUNT: u32 = 1;
pub const MAX_TRENDING_COUNT: u32 = 20;

/// Lightweight record in a trending-tokens listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingToken {
    pub name: String,
    pub symbol: String,
    pub address: String,
    #[serde(default)]
    pub decimals: u8,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub risk_score: f64,
    #[serde(default)]
    pub liquidity: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
}

/// A fetched trending listing together with the query that produced it.
/// This is the unit stored in the cache; entries are immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingTokenSet {
    pub timeframe: Timeframe,
    pub count: u32,
    pub tokens: Vec<TrendingToken>,
}

/// Parameters extracted from conversation by the host's structured-extraction
/// capability. Extraction output is untrusted and must pass `validate`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TrendingParams {
    pub timeframe: Timeframe,
    pub count: u32,
}

impl TrendingParams {
    pub fn validate(value: &serde_json::Value) -> Result<Self, ScoutError> {
        let params: TrendingParams = serde_json::from_value(value.clone())
            .map_err(|e| ScoutError::Validation(format!("Invalid trending token parameters: {}", e)))?;

        if !(MIN_TRENDING_COUNT..=MAX_TRENDING_COUNT).contains(&params.count) {
            return Err(ScoutError::Validation(format!(
                "Invalid trending token count: {} (must be {}-{})",
                params.count, MIN_TRENDING_COUNT, MAX_TRENDING_COUNT
            )));
        }

        Ok(params)
    }

    pub fn clamped_count(count: u32) -> u32 {
        count.clamp(MIN_TRENDING_COUNT, MAX_TRENDING_COUNT)
    }
}
