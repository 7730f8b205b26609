//! Normalized view of a token snapshot that drives both the textual
//! heuristics and the AI-commentary bindings.

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::metrics::SIGNIFICANT_MOVE_PERCENT;
use crate::models::token::{TokenSnapshot, WalletKind};

lazy_static! {
    static ref TWITTER_HANDLE_RE: Regex = Regex::new(r"twitter\.com/([^/]+)").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiquidityTier {
    Critical,
    Low,
    Decent,
    Solid,
}

impl LiquidityTier {
    pub fn from_liquidity(liquidity: Option<f64>) -> Self {
        match liquidity {
            None => LiquidityTier::Critical,
            Some(l) if l < 10_000.0 => LiquidityTier::Critical,
            Some(l) if l < 50_000.0 => LiquidityTier::Low,
            Some(l) if l < 100_000.0 => LiquidityTier::Decent,
            Some(_) => LiquidityTier::Solid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LiquidityTier::Critical => "CRITICAL",
            LiquidityTier::Low => "LOW",
            LiquidityTier::Decent => "DECENT",
            LiquidityTier::Solid => "SOLID",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketCapTier {
    MicroCap,
    NanoCap,
    SmallCap,
    Based,
}

impl MarketCapTier {
    pub fn from_market_cap(market_cap: Option<f64>) -> Self {
        match market_cap {
            None => MarketCapTier::MicroCap,
            Some(m) if m < 100_000.0 => MarketCapTier::MicroCap,
            Some(m) if m < 1_000_000.0 => MarketCapTier::NanoCap,
            Some(m) if m < 5_000_000.0 => MarketCapTier::SmallCap,
            Some(_) => MarketCapTier::Based,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarketCapTier::MicroCap => "MICRO_CAP",
            MarketCapTier::NanoCap => "NANO_CAP",
            MarketCapTier::SmallCap => "SMALL_CAP",
            MarketCapTier::Based => "BASED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Gain,
    Loss,
}

impl MoveDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveDirection::Gain => "gain",
            MoveDirection::Loss => "loss",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SignificantMove {
    pub window: &'static str,
    /// Absolute change in percent.
    pub change: f64,
    pub direction: MoveDirection,
}

/// Derived, request-scoped analysis of one snapshot.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    pub liquidity_tier: LiquidityTier,
    pub market_cap_tier: MarketCapTier,
    pub significant_moves: Vec<SignificantMove>,
    /// Display handles for top wallets tagged as known traders: twitter
    /// handle when resolvable, otherwise name, otherwise raw address.
    pub kol_names: Vec<String>,
}

impl AnalysisContext {
    pub fn from_snapshot(token: &TokenSnapshot) -> Self {
        let significant_moves = token
            .price_change
            .windows()
            .into_iter()
            .filter_map(|(window, change)| {
                let change = change?;
                if change.abs() > SIGNIFICANT_MOVE_PERCENT {
                    Some(SignificantMove {
                        window,
                        change: change.abs(),
                        direction: if change > 0.0 {
                            MoveDirection::Gain
                        } else {
                            MoveDirection::Loss
                        },
                    })
                } else {
                    None
                }
            })
            .collect();

        let kol_names = token
            .top_wallets
            .iter()
            .filter(|wallet| wallet.kind == WalletKind::Kols)
            .map(|wallet| {
                wallet
                    .twitter_url
                    .as_deref()
                    .and_then(extract_twitter_handle)
                    .or_else(|| wallet.name.clone())
                    .unwrap_or_else(|| wallet.address.clone())
            })
            .collect();

        Self {
            liquidity_tier: LiquidityTier::from_liquidity(token.liquidity),
            market_cap_tier: MarketCapTier::from_market_cap(token.market_cap),
            significant_moves,
            kol_names,
        }
    }

    pub fn has_kols(&self) -> bool {
        !self.kol_names.is_empty()
    }
}

fn extract_twitter_handle(url: &str) -> Option<String> {
    TWITTER_HANDLE_RE
        .captures(url)
        .map(|caps| format!("@{}", &caps[1]))
}
