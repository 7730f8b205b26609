pub mod birdeye;
pub mod dexscreener;
pub mod topwallets;

pub use birdeye::{BirdeyeClient, Candle, CandleInterval};
pub use dexscreener::{DexScreenerClient, PairInfo};
pub use topwallets::TopWalletsClient;
