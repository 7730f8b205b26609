pub mod compose;
pub mod scan_token;
pub mod scan_wallet;

pub use compose::{compose_token_reply, compose_trending_reply, compose_wallet_reply};
pub use scan_token::ScanTokenAction;
pub use scan_wallet::ScanWalletAction;
