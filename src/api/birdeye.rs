//! Birdeye price-candle and holder-data client. Supplies the supplementary
//! data merged into token replies: OHLCV history for the all-time-high line
//! and top-holder supply shares.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::ScoutError;

// Verified base URL
const BIRDEYE_BASE_URL: &str = "https://public-api.birdeye.so";

/// Candle granularity. Fifteen-minute candles for pairs younger than a day,
/// daily candles otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandleInterval {
    FifteenMinutes,
    OneDay,
}

impl CandleInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandleInterval::FifteenMinutes => "15m",
            CandleInterval::OneDay => "1D",
        }
    }

    /// Pick a granularity from the pair age in milliseconds. Unknown age
    /// falls back to daily candles.
    pub fn for_pair_age(pair_created_at: Option<i64>, now_millis: i64) -> Self {
        match pair_created_at {
            Some(created) if now_millis - created < 24 * 60 * 60 * 1000 => {
                CandleInterval::FifteenMinutes
            }
            _ => CandleInterval::OneDay,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candle {
    pub o: f64,
    pub h: f64,
    pub l: f64,
    pub c: f64,
    #[serde(default)]
    pub v: f64,
    pub unix_time: i64,
}

#[derive(Debug, Deserialize)]
struct OhlcvData {
    items: Vec<Candle>,
}

#[derive(Debug, Deserialize)]
struct OhlcvResponse {
    data: Option<OhlcvData>,
    success: bool,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketData {
    #[serde(default)]
    pub circulating_supply: Option<f64>,
    #[serde(default)]
    pub total_supply: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct MarketDataResponse {
    data: Option<MarketData>,
    success: bool,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HolderItem {
    pub owner: String,
    #[serde(default)]
    pub ui_amount: f64,
}

#[derive(Debug, Deserialize)]
struct HolderData {
    items: Vec<HolderItem>,
}

#[derive(Debug, Deserialize)]
struct HolderResponse {
    data: Option<HolderData>,
    success: bool,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Clone)]
pub struct BirdeyeClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl BirdeyeClient {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(BIRDEYE_BASE_URL, api_key)
    }

    pub fn with_base_url(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client: Client::builder()
                .timeout(Duration::from_secs(20))
                .build()
                .expect("Failed to create HTTP client for Birdeye"),
        }
    }

    /// Full OHLCV history for a token at the given granularity. Zero candles
    /// is an upstream failure: a listed token always has at least one.
    pub async fn get_candles(
        &self,
        address: &str,
        interval: CandleInterval,
    ) -> Result<Vec<Candle>, ScoutError> {
        let url = format!(
            "{}/defi/ohlcv?address={}&type={}&time_from=0&time_to=10000000000",
            self.base_url,
            address,
            interval.as_str()
        );
        debug!("Fetching {} candles for {}", interval.as_str(), address);

        let response = self
            .client
            .get(&url)
            .header("X-API-KEY", &self.api_key)
            .send()
            .await
            .map_err(|e| ScoutError::Upstream(format!("candle request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!("Birdeye OHLCV API error for {}: {}", address, status);
            return Err(ScoutError::Upstream(format!(
                "candle request returned {}",
                status
            )));
        }

        let body: OhlcvResponse = response
            .json()
            .await
            .map_err(|e| ScoutError::Upstream(format!("failed to parse candle response: {}", e)))?;

        let items = body.data.map(|d| d.items).unwrap_or_default();
        if !body.success || items.is_empty() {
            warn!("Birdeye returned no candles for {}: {}", address, body.message);
            return Err(ScoutError::Upstream(format!(
                "no candle data for {}",
                address
            )));
        }

        Ok(items)
    }

    /// Market data, used for the circulating supply behind holder shares.
    pub async fn get_market_data(&self, address: &str) -> Result<MarketData, ScoutError> {
        let url = format!(
            "{}/defi/v3/token/market-data?address={}",
            self.base_url, address
        );
        debug!("Fetching market data for {}", address);

        let response = self
            .client
            .get(&url)
            .header("X-API-KEY", &self.api_key)
            .send()
            .await
            .map_err(|e| ScoutError::Upstream(format!("market data request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ScoutError::Upstream(format!(
                "market data request returned {}",
                response.status()
            )));
        }

        let body: MarketDataResponse = response.json().await.map_err(|e| {
            ScoutError::Upstream(format!("failed to parse market data response: {}", e))
        })?;

        if !body.success {
            warn!("Birdeye market data failed for {}: {}", address, body.message);
            return Err(ScoutError::Upstream(body.message));
        }

        body.data
            .ok_or_else(|| ScoutError::Upstream("market data response carried no data".to_string()))
    }

    /// Largest token accounts by held amount.
    pub async fn get_top_holders(
        &self,
        address: &str,
        limit: u32,
    ) -> Result<Vec<HolderItem>, ScoutError> {
        let url = format!(
            "{}/defi/v3/token/holder?address={}&offset=0&limit={}",
            self.base_url, address, limit
        );
        debug!("Fetching top {} holders for {}", limit, address);

        let response = self
            .client
            .get(&url)
            .header("X-API-KEY", &self.api_key)
            .send()
            .await
            .map_err(|e| ScoutError::Upstream(format!("holder request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ScoutError::Upstream(format!(
                "holder request returned {}",
                response.status()
            )));
        }

        let body: HolderResponse = response
            .json()
            .await
            .map_err(|e| ScoutError::Upstream(format!("failed to parse holder response: {}", e)))?;

        if !body.success {
            warn!("Birdeye holder fetch failed for {}: {}", address, body.message);
            return Err(ScoutError::Upstream(body.message));
        }

        Ok(body.data.map(|d| d.items).unwrap_or_default())
    }

    /// Percentage of circulating supply held by each of the top holders,
    /// rounded to two decimals and ordered as the service ranks them.
    /// Holder data is optional everywhere it is displayed, so any failure
    /// here collapses to an empty list rather than an error.
    pub async fn get_top_holder_shares(&self, address: &str) -> Vec<f64> {
        let (holders, market) = tokio::join!(
            self.get_top_holders(address, 10),
            self.get_market_data(address)
        );

        let (holders, market) = match (holders, market) {
            (Ok(h), Ok(m)) => (h, m),
            (Err(e), _) | (_, Err(e)) => {
                warn!("Holder concentration unavailable for {}: {}", address, e);
                return Vec::new();
            }
        };

        let supply = match market.circulating_supply {
            Some(supply) if supply > 0.0 => supply,
            _ => {
                warn!("No circulating supply for {}, skipping holder shares", address);
                return Vec::new();
            }
        };

        holders
            .iter()
            .map(|holder| (holder.ui_amount / supply * 100.0 * 100.0).round() / 100.0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(server: &mockito::ServerGuard) -> BirdeyeClient {
        BirdeyeClient::with_base_url(&server.url(), "test-key")
    }

    #[test]
    fn test_interval_for_pair_age() {
        let now = 1_700_000_000_000;
        let six_hours_ago = now - 6 * 60 * 60 * 1000;
        let two_days_ago = now - 48 * 60 * 60 * 1000;
        assert_eq!(
            CandleInterval::for_pair_age(Some(six_hours_ago), now),
            CandleInterval::FifteenMinutes
        );
        assert_eq!(
            CandleInterval::for_pair_age(Some(two_days_ago), now),
            CandleInterval::OneDay
        );
        assert_eq!(
            CandleInterval::for_pair_age(None, now),
            CandleInterval::OneDay
        );
    }

    #[tokio::test]
    async fn test_get_candles_success() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "GET",
                "/defi/ohlcv?address=abc&type=1D&time_from=0&time_to=10000000000",
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "success": true,
                    "data": { "items": [
                        { "o": 1.0, "h": 2.0, "l": 0.5, "c": 1.5, "v": 100.0, "unixTime": 100 },
                        { "o": 1.5, "h": 5.0, "l": 1.0, "c": 4.0, "v": 200.0, "unixTime": 200 }
                    ]}
                }"#,
            )
            .create_async()
            .await;

        let candles = client(&server)
            .get_candles("abc", CandleInterval::OneDay)
            .await
            .unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[1].h, 5.0);
        assert_eq!(candles[1].unix_time, 200);
    }

    #[tokio::test]
    async fn test_zero_candles_is_upstream_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "GET",
                "/defi/ohlcv?address=abc&type=1D&time_from=0&time_to=10000000000",
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{ "success": true, "data": { "items": [] } }"#)
            .create_async()
            .await;

        let err = client(&server)
            .get_candles("abc", CandleInterval::OneDay)
            .await
            .unwrap_err();
        assert!(matches!(err, ScoutError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_top_holder_shares_rounded() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/defi/v3/token/holder?address=abc&offset=0&limit=10")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "success": true,
                    "data": { "items": [
                        { "owner": "w1", "ui_amount": 123456.0 },
                        { "owner": "w2", "ui_amount": 50000.0 }
                    ]}
                }"#,
            )
            .create_async()
            .await;
        server
            .mock("GET", "/defi/v3/token/market-data?address=abc")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{ "success": true, "data": { "circulating_supply": 1000000.0 } }"#,
            )
            .create_async()
            .await;

        let shares = client(&server).get_top_holder_shares("abc").await;
        assert_eq!(shares, vec![12.35, 5.0]);
    }

    #[tokio::test]
    async fn test_top_holder_shares_empty_on_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/defi/v3/token/holder?address=abc&offset=0&limit=10")
            .with_status(500)
            .create_async()
            .await;
        server
            .mock("GET", "/defi/v3/token/market-data?address=abc")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{ "success": true, "data": { "circulating_supply": 1000000.0 } }"#)
            .create_async()
            .await;

        let shares = client(&server).get_top_holder_shares("abc").await;
        assert!(shares.is_empty());
    }
}
