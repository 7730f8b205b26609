//! Pure heuristics over a token snapshot: the observation list shown in
//! extended replies, and the all-time-high scan over candle history.

use crate::api::birdeye::Candle;
use crate::models::token::TokenSnapshot;

/// Absolute price change (percent) above which a window is worth a line.
pub const SIGNIFICANT_MOVE_PERCENT: f64 = 5.0;

/// Qualitative observations in a fixed order: rug flag, significant moves in
/// canonical window order, liquidity warning, risk warning. The order is part
/// of the contract.
pub fn analyze_metrics(token: &TokenSnapshot) -> Vec<String> {
    let mut metrics = Vec::new();

    if token.is_rugged {
        metrics.push(
            "🚨 WARNING: This token has been identified as potentially rugged!".to_string(),
        );
    }

    for (window, change) in token.price_change.windows() {
        if let Some(change) = change {
            if change.abs() > SIGNIFICANT_MOVE_PERCENT {
                let (icon, direction) = if change > 0.0 {
                    ("📈", "gain")
                } else {
                    ("📉", "loss")
                };
                metrics.push(format!(
                    "{} {:.2}% {} in {}",
                    icon,
                    change.abs(),
                    direction,
                    window
                ));
            }
        }
    }

    if let Some(liquidity) = token.liquidity {
        if liquidity > 0.0 {
            if liquidity < 10_000.0 {
                metrics.push("🚨 Very low liquidity - high risk of price impact".to_string());
            } else if liquidity < 50_000.0 {
                metrics.push("⚠️ Low liquidity - moderate risk of price impact".to_string());
            } else if liquidity < 100_000.0 {
                metrics.push("ℹ️ Moderate liquidity".to_string());
            }
        }
    }

    if token.risk_score >= 7.0 {
        metrics.push("🚨 High risk score - exercise extreme caution".to_string());
    } else if token.risk_score >= 5.0 {
        metrics.push("⚠️ Moderate risk score - proceed with caution".to_string());
    }

    metrics
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllTimeHigh {
    pub high: f64,
    /// Millisecond timestamp of the candle that set the high.
    pub timestamp: i64,
}

/// Linear scan for the highest candle high. Candles arrive chronologically,
/// so the first maximum wins ties. Empty input reads as no high.
pub fn compute_all_time_high(candles: &[Candle]) -> AllTimeHigh {
    let mut ath = AllTimeHigh {
        high: 0.0,
        timestamp: 0,
    };
    for candle in candles {
        if candle.h > ath.high {
            ath.high = candle.h;
            ath.timestamp = candle.unix_time * 1000;
        }
    }
    ath
}
