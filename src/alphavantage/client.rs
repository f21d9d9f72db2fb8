use reqwest::Client;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

use super::types::{GlobalQuoteResponse, OverviewData, OverviewResponse};

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("no data for {0}")]
    NoData(String),
}

#[derive(Debug, Clone)]
pub struct QuoteClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl QuoteClient {
    pub fn new(http: Client, base_url: String, api_key: String) -> Self {
        Self {
            http,
            base_url,
            api_key,
        }
    }

    /// Fetch the latest quote for a ticker.
    ///
    /// The free tier answers rate-limited requests with 200 OK and a
    /// `Note`/`Information` body, so that case is detected here and
    /// surfaced as `RateLimited` rather than a bogus price.
    pub async fn get_quote(&self, ticker: &str) -> Result<Decimal, QuoteError> {
        let resp = self
            .http
            .get(&self.base_url)
            .query(&[
                ("function", "GLOBAL_QUOTE"),
                ("symbol", ticker),
                ("apikey", &self.api_key),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: GlobalQuoteResponse = resp.json().await?;

        if let Some(msg) = body.note.or(body.information) {
            return Err(QuoteError::RateLimited(msg));
        }

        body.quote
            .and_then(|q| q.price)
            .and_then(|p| Decimal::from_str(&p).ok())
            .ok_or_else(|| QuoteError::NoData(ticker.to_string()))
    }

    /// Fetch company fundamentals: P/S ratio and shares outstanding.
    pub async fn get_overview(&self, ticker: &str) -> Result<OverviewData, QuoteError> {
        let resp = self
            .http
            .get(&self.base_url)
            .query(&[
                ("function", "OVERVIEW"),
                ("symbol", ticker),
                ("apikey", &self.api_key),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: OverviewResponse = resp.json().await?;

        if let Some(msg) = body.note.or(body.information) {
            return Err(QuoteError::RateLimited(msg));
        }

        let ps_ratio = body
            .ps_ratio
            .as_deref()
            .and_then(|v| Decimal::from_str(v).ok());
        let shares_outstanding = body
            .shares_outstanding
            .as_deref()
            .and_then(|v| v.parse::<i64>().ok());

        if ps_ratio.is_none() && shares_outstanding.is_none() {
            return Err(QuoteError::NoData(ticker.to_string()));
        }

        Ok(OverviewData {
            ps_ratio,
            shares_outstanding,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_response_parses_price() {
        let json = r#"{
            "Global Quote": {
                "01. symbol": "NVDA",
                "05. price": "131.2600",
                "07. latest trading day": "2025-06-27"
            }
        }"#;

        let body: GlobalQuoteResponse = serde_json::from_str(json).unwrap();
        let price = body
            .quote
            .and_then(|q| q.price)
            .and_then(|p| Decimal::from_str(&p).ok());
        assert_eq!(price, Some(Decimal::new(131_2600, 4)));
    }

    #[test]
    fn test_rate_limit_note_detected() {
        let json = r#"{ "Note": "Thank you for using Alpha Vantage! Our standard API rate limit is 25 requests per day." }"#;

        let body: GlobalQuoteResponse = serde_json::from_str(json).unwrap();
        assert!(body.note.is_some());
        assert!(body.quote.is_none());
    }

    #[test]
    fn test_overview_parses_fundamentals() {
        let json = r#"{
            "PriceToSalesRatioTTM": "24.31",
            "SharesOutstanding": "24400000000"
        }"#;

        let body: OverviewResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            body.ps_ratio.as_deref().and_then(|v| Decimal::from_str(v).ok()),
            Some(Decimal::new(2431, 2))
        );
        assert_eq!(
            body.shares_outstanding.as_deref().and_then(|v| v.parse::<i64>().ok()),
            Some(24_400_000_000)
        );
    }
}
