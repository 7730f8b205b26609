//! Trending-tokens provider: intent classification, parameter extraction,
//! a short-TTL cache gate in front of the listing fetch, and the formatted
//! context block handed back to the host.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::actions::compose::compose_trending_reply;
use crate::api::topwallets::TopWalletsClient;
use crate::cache::CacheStore;
use crate::error::ScoutError;
use crate::extractor;
use crate::models::timeframe::Timeframe;
use crate::models::trending::{TrendingParams, TrendingTokenSet};
use crate::runtime::{AgentRuntime, InboundMessage, ModelTier, TemplateBindings};

pub const TRENDING_UNAVAILABLE_REPLY: &str =
    "Trending token information temporarily unavailable";

const CACHE_TTL_SHORT: Duration = Duration::from_secs(60);
const CACHE_TTL_LONG: Duration = Duration::from_secs(300);

pub const SHOULD_SHOW_TRENDING_TEMPLATE: &str = r#"# Task: Determine if the user is requesting trending or popular tokens information.

Look for messages that:
- Ask about trending tokens
- Request popular tokens list
- Ask about hot or new tokens
- Want to see what's trending
- Ask about market movements
- Request top performing tokens

Based on the last message, is this a request for trending tokens? YES or NO

Last Message:
{{lastMessage}}

Should I show trending tokens? YES or NO"#;

pub const EXTRACT_PARAMS_TEMPLATE: &str = r#"# Task: Extract trending tokens request parameters from the conversation.

Look for:
- Time period mentions (5m, 15m, 30m, 1h, 2h, 3h, 4h, 5h, 6h, 12h, 24h)
- Number of tokens requested (1-20)
- Default to 24h timeframe and 5 tokens if not specified

Valid timeframes: 5m, 15m, 30m, 1h, 2h, 3h, 4h, 5h, 6h, 12h, 24h

Recent Messages:
{{recentMessages}}

Return in JSON format:
```json
{
    "timeframe": "string (one of the valid timeframes)",
    "count": "number (1-20)"
}
```"#;

/// Upstream source of trending listings. `TopWalletsClient` is the real
/// implementation; the seam exists so the cache gate is testable without a
/// network.
#[async_trait]
pub trait TrendingFetcher: Send + Sync {
    async fn fetch_trending(
        &self,
        timeframe: Timeframe,
        count: u32,
    ) -> Result<TrendingTokenSet, ScoutError>;
}

#[async_trait]
impl TrendingFetcher for TopWalletsClient {
    async fn fetch_trending(
        &self,
        timeframe: Timeframe,
        count: u32,
    ) -> Result<TrendingTokenSet, ScoutError> {
        self.get_trending_tokens(timeframe, count).await
    }
}

/// Serve a trending listing through the cache: hit returns the stored set
/// verbatim, miss fetches and stores it with a timeframe-dependent TTL.
/// `count` is clamped to the valid range before it reaches either the key
/// or the fetch.
pub async fn resolve_trending(
    fetcher: &dyn TrendingFetcher,
    cache: &dyn CacheStore,
    timeframe: Timeframe,
    count: u32,
) -> Result<TrendingTokenSet, ScoutError> {
    let count = TrendingParams::clamped_count(count);
    let key = format!("trending-tokens-{}-{}", timeframe, count);

    if let Some(value) = cache.get(&key).await {
        match serde_json::from_value::<TrendingTokenSet>(value) {
            Ok(set) => {
                debug!("Cache hit for {}", key);
                return Ok(set);
            }
            Err(e) => warn!("Discarding unreadable cache entry {}: {}", key, e),
        }
    }

    debug!("Cache miss for {}, fetching from API", key);
    let set = fetcher.fetch_trending(timeframe, count).await?;

    let ttl = if timeframe.is_short() {
        CACHE_TTL_SHORT
    } else {
        CACHE_TTL_LONG
    };
    match serde_json::to_value(&set) {
        Ok(value) => cache.set(&key, value, ttl).await,
        Err(e) => warn!("Failed to serialize trending set for {}: {}", key, e),
    }

    Ok(set)
}

pub struct TrendingProvider {
    fetcher: Arc<dyn TrendingFetcher>,
    cache: Arc<dyn CacheStore>,
}

impl TrendingProvider {
    pub fn new(fetcher: Arc<dyn TrendingFetcher>, cache: Arc<dyn CacheStore>) -> Self {
        Self { fetcher, cache }
    }

    /// Provider entry point: empty string when the message is not a
    /// trending request, the fallback line when anything in the pipeline
    /// fails. Never errors out to the host.
    pub async fn get(&self, message: &InboundMessage, runtime: &dyn AgentRuntime) -> String {
        match self.try_get(message, runtime).await {
            Ok(Some(text)) => text,
            Ok(None) => String::new(),
            Err(e) => {
                error!("Trending token provider error: {}", e);
                TRENDING_UNAVAILABLE_REPLY.to_string()
            }
        }
    }

    async fn try_get(
        &self,
        message: &InboundMessage,
        runtime: &dyn AgentRuntime,
    ) -> Result<Option<String>, ScoutError> {
        // Messages carrying an address belong to the scan actions.
        if extractor::extract_first_address(&message.text).is_some() {
            return Ok(None);
        }

        let mut bindings = TemplateBindings::new();
        bindings.set("lastMessage", message.text.as_str());
        let intent_prompt = runtime.render_template(SHOULD_SHOW_TRENDING_TEMPLATE, &bindings);
        let should_show = runtime
            .classify_true_false(&intent_prompt, ModelTier::Small)
            .await
            .map_err(|e| ScoutError::Generation(format!("intent classification failed: {}", e)))?;
        debug!("Should show trending? {}", should_show);
        if !should_show {
            return Ok(None);
        }

        let mut bindings = TemplateBindings::new();
        bindings.set("recentMessages", message.text.as_str());
        let params_prompt = runtime.render_template(EXTRACT_PARAMS_TEMPLATE, &bindings);
        let object = runtime
            .extract_object(&params_prompt, ModelTier::Small)
            .await
            .map_err(|e| ScoutError::Generation(format!("parameter extraction failed: {}", e)))?;
        let params = TrendingParams::validate(&object)?;
        debug!(
            "Extracted trending params: {} x {}",
            params.timeframe, params.count
        );

        let set = resolve_trending(
            self.fetcher.as_ref(),
            self.cache.as_ref(),
            params.timeframe,
            params.count,
        )
        .await?;

        Ok(Some(compose_trending_reply(&set, Utc::now())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::cache::MemoryCache;
    use crate::models::trending::TrendingToken;
    use crate::runtime::Channel;

    struct CountingFetcher {
        calls: AtomicUsize,
    }

    impl CountingFetcher {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TrendingFetcher for CountingFetcher {
        async fn fetch_trending(
            &self,
            timeframe: Timeframe,
            count: u32,
        ) -> Result<TrendingTokenSet, ScoutError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let tokens = (0..count)
                .map(|i| {
                    serde_json::from_value::<TrendingToken>(json!({
                        "name": format!("Token{}", i),
                        "symbol": format!("T{}", i),
                        "address": format!("addr{}", i),
                        "riskScore": 1
                    }))
                    .unwrap()
                })
                .collect();
            Ok(TrendingTokenSet {
                timeframe,
                count,
                tokens,
            })
        }
    }

    /// Records the TTL each set call was stored with.
    #[derive(Default)]
    struct RecordingCache {
        entries: Mutex<Vec<(String, Duration)>>,
    }

    #[async_trait]
    impl CacheStore for RecordingCache {
        async fn get(&self, _key: &str) -> Option<Value> {
            None
        }

        async fn set(&self, key: &str, _value: Value, expires_in: Duration) {
            self.entries
                .lock()
                .unwrap()
                .push((key.to_string(), expires_in));
        }
    }

    struct ScriptedRuntime {
        classify: bool,
        extracted: Value,
    }

    #[async_trait]
    impl AgentRuntime for ScriptedRuntime {
        fn render_template(&self, template: &str, _bindings: &TemplateBindings) -> String {
            template.to_string()
        }

        async fn generate_text(&self, _prompt: &str, _tier: ModelTier) -> Result<String> {
            Err(anyhow!("not used"))
        }

        async fn classify_true_false(&self, _prompt: &str, _tier: ModelTier) -> Result<bool> {
            Ok(self.classify)
        }

        async fn extract_object(&self, _prompt: &str, _tier: ModelTier) -> Result<Value> {
            Ok(self.extracted.clone())
        }
    }

    #[tokio::test]
    async fn test_cache_gate_fetches_once() {
        let fetcher = CountingFetcher::new();
        let cache = MemoryCache::default();

        let first = resolve_trending(&fetcher, &cache, Timeframe::H1, 5)
            .await
            .unwrap();
        let second = resolve_trending(&fetcher, &cache, Timeframe::H1, 5)
            .await
            .unwrap();

        assert_eq!(fetcher.call_count(), 1);
        assert_eq!(first.tokens.len(), 5);
        assert_eq!(second.tokens.len(), 5);
    }

    #[tokio::test]
    async fn test_count_clamping_shares_cache_key() {
        let fetcher = CountingFetcher::new();
        let cache = MemoryCache::default();

        let oversized = resolve_trending(&fetcher, &cache, Timeframe::H24, 57)
            .await
            .unwrap();
        assert_eq!(oversized.count, 20);

        let exact = resolve_trending(&fetcher, &cache, Timeframe::H24, 20)
            .await
            .unwrap();
        assert_eq!(exact.count, 20);
        assert_eq!(fetcher.call_count(), 1);

        let undersized = resolve_trending(&fetcher, &cache, Timeframe::H24, 0)
            .await
            .unwrap();
        assert_eq!(undersized.count, 1);
        assert_eq!(fetcher.call_count(), 2);
    }

    #[tokio::test]
    async fn test_ttl_depends_on_timeframe() {
        let fetcher = CountingFetcher::new();
        let cache = RecordingCache::default();

        resolve_trending(&fetcher, &cache, Timeframe::M5, 5)
            .await
            .unwrap();
        resolve_trending(&fetcher, &cache, Timeframe::H24, 5)
            .await
            .unwrap();

        let entries = cache.entries.lock().unwrap();
        assert_eq!(
            entries[0],
            ("trending-tokens-5m-5".to_string(), Duration::from_secs(60))
        );
        assert_eq!(
            entries[1],
            ("trending-tokens-24h-5".to_string(), Duration::from_secs(300))
        );
    }

    #[tokio::test]
    async fn test_provider_skips_messages_with_addresses() {
        let provider = TrendingProvider::new(
            Arc::new(CountingFetcher::new()),
            Arc::new(MemoryCache::default()),
        );
        let runtime = ScriptedRuntime {
            classify: true,
            extracted: json!({ "timeframe": "1h", "count": 5 }),
        };

        let text = provider
            .get(
                &InboundMessage::new(
                    "trending? 97RggLo3zV5kFGYW4yoQTxr4Xkz4Vg2WPHzNYXXWpump",
                    Channel::Telegram,
                ),
                &runtime,
            )
            .await;
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn test_provider_skips_when_intent_is_negative() {
        let fetcher = Arc::new(CountingFetcher::new());
        let provider = TrendingProvider::new(fetcher.clone(), Arc::new(MemoryCache::default()));
        let runtime = ScriptedRuntime {
            classify: false,
            extracted: json!({ "timeframe": "1h", "count": 5 }),
        };

        let text = provider
            .get(
                &InboundMessage::new("good morning everyone", Channel::Telegram),
                &runtime,
            )
            .await;
        assert!(text.is_empty());
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_provider_formats_listing() {
        let provider = TrendingProvider::new(
            Arc::new(CountingFetcher::new()),
            Arc::new(MemoryCache::default()),
        );
        let runtime = ScriptedRuntime {
            classify: true,
            extracted: json!({ "timeframe": "12h", "count": 3 }),
        };

        let text = provider
            .get(
                &InboundMessage::new("show me what's trending", Channel::Telegram),
                &runtime,
            )
            .await;
        assert!(text.starts_with("# Top 3 Trending Solana Tokens (12h timeframe)"));
        assert!(text.contains("1. Token0 ($T0)"));
        assert!(text.contains("3. Token2 ($T2)"));
    }

    #[tokio::test]
    async fn test_invalid_extraction_surfaces_fallback_line() {
        let fetcher = Arc::new(CountingFetcher::new());
        let provider = TrendingProvider::new(fetcher.clone(), Arc::new(MemoryCache::default()));
        let runtime = ScriptedRuntime {
            classify: true,
            extracted: json!({ "timeframe": "1m", "count": 5 }),
        };

        let text = provider
            .get(
                &InboundMessage::new("show me trending tokens", Channel::Telegram),
                &runtime,
            )
            .await;
        assert_eq!(text, TRENDING_UNAVAILABLE_REPLY);
        // validation fails locally, before any fetch
        assert_eq!(fetcher.call_count(), 0);
    }
}
