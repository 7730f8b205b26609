//! TopWallets analytics API client: token snapshots, wallet profiles and
//! trending listings. Every endpoint answers with a
//! `{ success, message, data }` envelope; `success: false` is treated the
//! same as a transport failure.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::ScoutError;
use crate::models::timeframe::Timeframe;
use crate::models::token::TokenSnapshot;
use crate::models::trending::{TrendingToken, TrendingTokenSet};
use crate::models::wallet::WalletProfile;

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct ApiEnvelope<T> {
    success: bool,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct TrendingData {
    tokens: Vec<TrendingToken>,
}

#[derive(Debug, Clone)]
pub struct TopWalletsClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl TopWalletsClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client: Client::builder()
                .timeout(Duration::from_secs(20))
                .build()
                .expect("Failed to create HTTP client for TopWallets"),
        }
    }

    /// Fetch the full market/risk snapshot for a token.
    pub async fn get_token_snapshot(&self, address: &str) -> Result<TokenSnapshot, ScoutError> {
        let url = format!("{}/api/bot/solana/token?address={}", self.base_url, address);
        debug!("Fetching token snapshot for {}", address);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| ScoutError::Upstream(format!("token snapshot request failed: {}", e)))?;

        Self::unwrap_envelope(response, "token snapshot").await
    }

    /// Fetch the aggregate trading profile for a wallet.
    pub async fn scan_wallet(&self, address: &str) -> Result<WalletProfile, ScoutError> {
        let url = format!("{}/api/bot/solana/scan/wallet", self.base_url);
        debug!("Scanning wallet {}", address);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "address": address }))
            .send()
            .await
            .map_err(|e| ScoutError::Upstream(format!("wallet scan request failed: {}", e)))?;

        Self::unwrap_envelope(response, "wallet scan").await
    }

    /// Fetch the trending listing for a window. `count` is expected to be
    /// clamped to the valid range by the caller.
    pub async fn get_trending_tokens(
        &self,
        timeframe: Timeframe,
        count: u32,
    ) -> Result<TrendingTokenSet, ScoutError> {
        let url = format!(
            "{}/api/bot/solana/trending-tokens?timeframe={}&count={}",
            self.base_url, timeframe, count
        );
        debug!("Fetching trending tokens ({}x{})", timeframe, count);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| ScoutError::Upstream(format!("trending tokens request failed: {}", e)))?;

        let data: TrendingData = Self::unwrap_envelope(response, "trending tokens").await?;
        Ok(TrendingTokenSet {
            timeframe,
            count,
            tokens: data.tokens,
        })
    }

    async fn unwrap_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
        what: &str,
    ) -> Result<T, ScoutError> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("TopWallets {} API error: {} - {}", what, status, error_text);
            return Err(ScoutError::Upstream(format!(
                "{} request returned {}",
                what, status
            )));
        }

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| ScoutError::Upstream(format!("failed to parse {} response: {}", what, e)))?;

        if !envelope.success {
            warn!("TopWallets {} reported failure: {}", what, envelope.message);
            return Err(ScoutError::Upstream(envelope.message));
        }

        envelope
            .data
            .ok_or_else(|| ScoutError::Upstream(format!("{} response carried no data", what)))
    }
}
