//! tokenscout — Solana token and wallet analytics for conversational agents.
//!
//! The crate turns free-text questions about Solana tokens, wallets and
//! trending listings into chat replies: it recognizes addresses, aggregates
//! market/risk/holder data from the TopWallets, Birdeye and DexScreener
//! APIs, derives qualitative observations, and composes channel-aware reply
//! text. Language-model calls, template rendering and message delivery are
//! delegated to the host runtime through the seams in [`runtime`].

pub mod actions;
pub mod analysis;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod extractor;
pub mod models;
pub mod providers;
pub mod runtime;

use std::sync::Arc;

use crate::actions::{ScanTokenAction, ScanWalletAction};
use crate::api::{BirdeyeClient, DexScreenerClient, TopWalletsClient};
use crate::cache::{CacheStore, MemoryCache};
use crate::config::Config;
use crate::providers::TrendingProvider;

/// The assembled plugin: two scan actions and the trending provider,
/// sharing one explicitly constructed client per remote service.
pub struct TokenScoutPlugin {
    pub scan_token: ScanTokenAction,
    pub scan_wallet: ScanWalletAction,
    pub trending: TrendingProvider,
}

impl TokenScoutPlugin {
    /// Build the plugin with the in-process trending cache.
    pub fn new(config: &Config) -> Self {
        Self::with_cache(config, Arc::new(MemoryCache::default()))
    }

    /// Build the plugin against a host-supplied cache store.
    pub fn with_cache(config: &Config, cache: Arc<dyn CacheStore>) -> Self {
        let topwallets = Arc::new(TopWalletsClient::new(
            &config.topwallets_api_url,
            &config.topwallets_api_key,
        ));
        let birdeye = Arc::new(BirdeyeClient::new(&config.birdeye_api_key));
        let dexscreener = Arc::new(DexScreenerClient::new());

        Self {
            scan_token: ScanTokenAction::new(topwallets.clone(), birdeye, dexscreener),
            scan_wallet: ScanWalletAction::new(topwallets.clone()),
            trending: TrendingProvider::new(topwallets, cache),
        }
    }
}
