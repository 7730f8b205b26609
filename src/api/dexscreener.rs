//! DexScreener pair lookup. Only the primary pair's creation timestamp is
//! consumed downstream (candle granularity and the pair-age line).

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::ScoutError;

const DEXSCREENER_BASE_URL: &str = "https://api.dexscreener.com";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairInfo {
    #[serde(default)]
    pub pair_address: Option<String>,
    #[serde(default)]
    pub price_usd: Option<String>,
    /// Pair creation time in milliseconds.
    #[serde(default)]
    pub pair_created_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct TokenPairsResponse {
    #[serde(default)]
    pairs: Option<Vec<PairInfo>>,
}

#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    base_url: String,
    client: Client,
}

impl DexScreenerClient {
    pub fn new() -> Self {
        Self::with_base_url(DEXSCREENER_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::builder()
                .timeout(Duration::from_secs(20))
                .build()
                .expect("Failed to create HTTP client for DexScreener"),
        }
    }

    /// Primary pair for a token. Zero pairs is an upstream failure.
    pub async fn get_pair_info(&self, address: &str) -> Result<PairInfo, ScoutError> {
        let url = format!("{}/latest/dex/tokens/{}", self.base_url, address);
        debug!("Fetching pair info for {}", address);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ScoutError::Upstream(format!("pair info request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!("DexScreener API error for {}: {}", address, status);
            return Err(ScoutError::Upstream(format!(
                "pair info request returned {}",
                status
            )));
        }

        let body: TokenPairsResponse = response
            .json()
            .await
            .map_err(|e| ScoutError::Upstream(format!("failed to parse pair response: {}", e)))?;

        body.pairs
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| {
                warn!("DexScreener returned no pairs for {}", address);
                ScoutError::Upstream(format!("no pairs found for {}", address))
            })
    }
}

impl Default for DexScreenerClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_pair_returned() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/latest/dex/tokens/abc")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{ "pairs": [
                    { "pairAddress": "pair1", "priceUsd": "0.01", "pairCreatedAt": 1700000000000 },
                    { "pairAddress": "pair2" }
                ]}"#,
            )
            .create_async()
            .await;

        let pair = DexScreenerClient::with_base_url(&server.url())
            .get_pair_info("abc")
            .await
            .unwrap();
        assert_eq!(pair.pair_address.as_deref(), Some("pair1"));
        assert_eq!(pair.pair_created_at, Some(1_700_000_000_000));
    }

    #[tokio::test]
    async fn test_no_pairs_is_upstream_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/latest/dex/tokens/abc")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{ "pairs": null }"#)
            .create_async()
            .await;

        let err = DexScreenerClient::with_base_url(&server.url())
            .get_pair_info("abc")
            .await
            .unwrap_err();
        assert!(matches!(err, ScoutError::Upstream(_)));
    }
}
