use rust_decimal::Decimal;
use serde::Deserialize;

/// GLOBAL_QUOTE envelope. Rate-limit responses come back 200 OK with a
/// `Note` or `Information` field instead of a quote.
#[derive(Debug, Deserialize)]
pub struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    pub quote: Option<GlobalQuote>,
    #[serde(rename = "Note")]
    pub note: Option<String>,
    #[serde(rename = "Information")]
    pub information: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GlobalQuote {
    #[serde(rename = "01. symbol")]
    pub symbol: Option<String>,
    #[serde(rename = "05. price")]
    pub price: Option<String>,
    #[serde(rename = "07. latest trading day")]
    pub latest_trading_day: Option<String>,
}

/// OVERVIEW envelope; all values arrive as strings.
#[derive(Debug, Deserialize)]
pub struct OverviewResponse {
    #[serde(rename = "PriceToSalesRatioTTM")]
    pub ps_ratio: Option<String>,
    #[serde(rename = "SharesOutstanding")]
    pub shares_outstanding: Option<String>,
    #[serde(rename = "Note")]
    pub note: Option<String>,
    #[serde(rename = "Information")]
    pub information: Option<String>,
}

/// Parsed fundamentals used to update a stock's dilution inputs.
#[derive(Debug, Clone)]
pub struct OverviewData {
    pub ps_ratio: Option<Decimal>,
    pub shares_outstanding: Option<i64>,
}
