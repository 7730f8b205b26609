//! Wallet-scan pipeline: extract an address, fetch the trading profile,
//! compose the report.

use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info};

use crate::actions::compose::{compose_wallet_reply, WALLET_GUIDANCE_REPLY};
use crate::api::topwallets::TopWalletsClient;
use crate::extractor;
use crate::runtime::{InboundMessage, Reply, ReplySink};

pub const WALLET_SCAN_ACTION: &str = "WALLET_SCAN_RESPONSE";

pub struct ScanWalletAction {
    topwallets: Arc<TopWalletsClient>,
}

impl ScanWalletAction {
    pub fn new(topwallets: Arc<TopWalletsClient>) -> Self {
        Self { topwallets }
    }

    /// A message qualifies when it carries an address embedded in prose; a
    /// bare address routes to the token scanner instead.
    pub fn validate(&self, message: &InboundMessage) -> bool {
        extractor::looks_like_wallet_query(&message.text)
    }

    pub async fn handle(&self, message: &InboundMessage, sink: &dyn ReplySink) -> Result<bool> {
        let address = match extractor::extract_first_address(&message.text) {
            Some(address) => address.to_string(),
            None => {
                sink.send(Reply::with_action(WALLET_GUIDANCE_REPLY, WALLET_SCAN_ACTION))
                    .await?;
                return Ok(true);
            }
        };

        match self.topwallets.scan_wallet(&address).await {
            Ok(profile) => {
                let text = compose_wallet_reply(&profile, &address);
                info!("Wallet scan successful for {}", address);
                sink.send(Reply::with_action(text, WALLET_SCAN_ACTION)).await?;
                Ok(true)
            }
            Err(e) => {
                error!("Wallet scan error for {}: {}", address, e);
                sink.send(Reply::with_action(
                    e.user_message("wallet"),
                    WALLET_SCAN_ACTION,
                ))
                .await?;
                Ok(true)
            }
        }
    }
}
