pub mod trending;

pub use trending::{resolve_trending, TrendingFetcher, TrendingProvider};
