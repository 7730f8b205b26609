use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

const DEFAULT_TOPWALLETS_URL: &str = "https://www.topwallets.ai";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    pub topwallets_api_key: String,
    pub topwallets_api_url: String,
    pub birdeye_api_key: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self {
            topwallets_api_key: env::var("TOPWALLETS_API_KEY")
                .context("TOPWALLETS_API_KEY not set in environment")?,
            topwallets_api_url: env::var("TOPWALLETS_API_URL")
                .unwrap_or_else(|_| DEFAULT_TOPWALLETS_URL.to_string()),
            birdeye_api_key: env::var("BIRDEYE_API_KEY")
                .context("BIRDEYE_API_KEY not set in environment")?,
        })
    }
}
