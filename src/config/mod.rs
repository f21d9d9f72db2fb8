use std::env;

use crate::alphavantage::client::DEFAULT_BASE_URL;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    // Alpha Vantage (optional; price refresh is disabled without a key)
    pub alpha_vantage_api_key: Option<String>,
    pub alpha_vantage_base_url: String,

    // Refresh pacing
    pub quote_delay_secs: u64,
    pub refresh_enabled: bool,
    pub refresh_interval_secs: u64,

    // Read model
    pub price_history_limit: i64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,

            alpha_vantage_api_key: env::var("ALPHA_VANTAGE_API_KEY").ok(),
            alpha_vantage_base_url: env::var("ALPHA_VANTAGE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.into()),

            // 5 requests/minute on the free tier
            quote_delay_secs: env::var("QUOTE_DELAY_SECS")
                .unwrap_or_else(|_| "12".into())
                .parse()
                .unwrap_or(12),
            refresh_enabled: env::var("REFRESH_ENABLED")
                .unwrap_or_else(|_| "false".into())
                .parse()
                .unwrap_or(false),
            refresh_interval_secs: env::var("REFRESH_INTERVAL_SECS")
                .unwrap_or_else(|_| "3600".into())
                .parse()
                .unwrap_or(3600),

            price_history_limit: env::var("PRICE_HISTORY_LIMIT")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .unwrap_or(30),
        })
    }
}
