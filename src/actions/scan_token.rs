//! Token-scan pipeline: extract an address from the message, aggregate
//! snapshot + supplementary data, analyze, compose, reply.

use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::actions::compose::{compose_token_reply, TokenSupplements, TOKEN_GUIDANCE_REPLY};
use crate::analysis::commentary::generate_commentary;
use crate::analysis::context::AnalysisContext;
use crate::analysis::metrics::{analyze_metrics, compute_all_time_high};
use crate::api::birdeye::{BirdeyeClient, CandleInterval};
use crate::api::dexscreener::DexScreenerClient;
use crate::api::topwallets::TopWalletsClient;
use crate::error::ScoutError;
use crate::extractor;
use crate::runtime::{AgentRuntime, Channel, InboundMessage, Reply, ReplySink};

pub struct ScanTokenAction {
    topwallets: Arc<TopWalletsClient>,
    birdeye: Arc<BirdeyeClient>,
    dexscreener: Arc<DexScreenerClient>,
}

impl ScanTokenAction {
    pub fn new(
        topwallets: Arc<TopWalletsClient>,
        birdeye: Arc<BirdeyeClient>,
        dexscreener: Arc<DexScreenerClient>,
    ) -> Self {
        Self {
            topwallets,
            birdeye,
            dexscreener,
        }
    }

    /// A message qualifies when it carries an address, a ticker mention, or
    /// a token keyword.
    pub fn validate(&self, message: &InboundMessage) -> bool {
        extractor::looks_like_token_query(&message.text)
    }

    /// Run the scan and deliver a reply. Always reports the message as
    /// handled; failures surface as reply text only where the channel
    /// policy allows.
    pub async fn handle(
        &self,
        message: &InboundMessage,
        runtime: &dyn AgentRuntime,
        sink: &dyn ReplySink,
    ) -> Result<bool> {
        let address = match extractor::extract_first_address(&message.text) {
            Some(address) => address.to_string(),
            None => {
                sink.send(Reply::text(TOKEN_GUIDANCE_REPLY)).await?;
                return Ok(true);
            }
        };

        match self.scan(&address, message.channel, runtime).await {
            Ok(text) => {
                sink.send(Reply::text(text)).await?;
                Ok(true)
            }
            Err(e) => {
                error!("Token scan error for {}: {}", address, e);
                if message.channel.policy().surface_upstream_errors {
                    sink.send(Reply::text(e.user_message("token"))).await?;
                }
                Ok(true)
            }
        }
    }

    async fn scan(
        &self,
        address: &str,
        channel: Channel,
        runtime: &dyn AgentRuntime,
    ) -> Result<String, ScoutError> {
        let mut snapshot = self.topwallets.get_token_snapshot(address).await?;
        debug!(
            "Token data received for {} ({}), price present: {}",
            address,
            snapshot.symbol,
            snapshot.price.is_some()
        );

        let now_millis = Utc::now().timestamp_millis();

        // Pair age decides candle granularity; both are optional extras.
        match self.dexscreener.get_pair_info(address).await {
            Ok(pair) => snapshot.pair_created_at = pair.pair_created_at,
            Err(e) => debug!("Pair info unavailable for {}: {}", address, e),
        }
        let interval = CandleInterval::for_pair_age(snapshot.pair_created_at, now_millis);

        let (candles, holder_shares) = tokio::join!(
            self.birdeye.get_candles(address, interval),
            self.birdeye.get_top_holder_shares(address)
        );
        let ath = match candles {
            Ok(candles) => Some(compute_all_time_high(&candles)),
            Err(e) => {
                warn!("Candle history unavailable for {}: {}", address, e);
                None
            }
        };
        let supplements = TokenSupplements { ath, holder_shares };

        let observations = analyze_metrics(&snapshot);
        let context = AnalysisContext::from_snapshot(&snapshot);
        let commentary = generate_commentary(&snapshot, &context, runtime).await?;

        Ok(compose_token_reply(
            &snapshot,
            &observations,
            &supplements,
            channel,
            &commentary,
            now_millis,
        ))
    }
}
