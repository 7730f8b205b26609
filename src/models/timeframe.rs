use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScoutError;

/// Trending-tokens query windows accepted by the TopWallets API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "5m")]
    M5,
    #[serde(rename = "15m")]
    M15,
    #[serde(rename = "30m")]
    M30,
    #[serde(rename = "1h")]
    H1,
    #[serde(rename = "2h")]
    H2,
    #[serde(rename = "3h")]
    H3,
    #[serde(rename = "4h")]
    H4,
    #[serde(rename = "5h")]
    H5,
    #[serde(rename = "6h")]
    H6,
    #[serde(rename = "12h")]
    H12,
    #[serde(rename = "24h")]
    H24,
}

pub const VALID_TIMEFRAMES: [Timeframe; 11] = [
    Timeframe::M5,
    Timeframe::M15,
    Timeframe::M30,
    Timeframe::H1,
    Timeframe::H2,
    Timeframe::H3,
    Timeframe::H4,
    Timeframe::H5,
    Timeframe::H6,
    Timeframe::H12,
    Timeframe::H24,
];

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::M5 => "5m",
            Timeframe::M15 => "15m",
            Timeframe::M30 => "30m",
            Timeframe::H1 => "1h",
            Timeframe::H2 => "2h",
            Timeframe::H3 => "3h",
            Timeframe::H4 => "4h",
            Timeframe::H5 => "5h",
            Timeframe::H6 => "6h",
            Timeframe::H12 => "12h",
            Timeframe::H24 => "24h",
        }
    }

    /// Short windows get a shorter trending-cache TTL.
    pub fn is_short(&self) -> bool {
        matches!(
            self,
            Timeframe::M5 | Timeframe::M15 | Timeframe::M30 | Timeframe::H1
        )
    }

    pub fn valid_list() -> String {
        VALID_TIMEFRAMES
            .iter()
            .map(|tf| tf.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VALID_TIMEFRAMES
            .iter()
            .find(|tf| tf.as_str() == s)
            .copied()
            .ok_or_else(|| {
                ScoutError::Validation(format!(
                    "Invalid timeframe. Must be one of: {}",
                    Timeframe::valid_list()
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for tf in VALID_TIMEFRAMES {
            assert_eq!(tf.as_str().parse::<Timeframe>().unwrap(), tf);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_window() {
        assert!("1m".parse::<Timeframe>().is_err());
        assert!("7d".parse::<Timeframe>().is_err());
    }

    #[test]
    fn test_short_windows() {
        assert!(Timeframe::M5.is_short());
        assert!(Timeframe::H1.is_short());
        assert!(!Timeframe::H2.is_short());
        assert!(!Timeframe::H24.is_short());
    }

    #[test]
    fn test_serde_rename() {
        let tf: Timeframe = serde_json::from_str("\"12h\"").unwrap();
        assert_eq!(tf, Timeframe::H12);
        assert_eq!(serde_json::to_string(&Timeframe::M30).unwrap(), "\"30m\"");
    }
}
