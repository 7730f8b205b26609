pub mod timeframe;
pub mod token;
pub mod trending;
pub mod wallet;

// Re-export commonly used types
pub use timeframe::{Timeframe, VALID_TIMEFRAMES};
pub use token::{
    Historic30d, PriceChangeSet, SocialLinks, TokenSnapshot, TopWalletEntry, WalletKind,
};
pub use trending::{TrendingParams, TrendingToken, TrendingTokenSet};
pub use wallet::{RecentTokenActivity, WalletProfile};
