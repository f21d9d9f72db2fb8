pub mod client;
pub mod types;

pub use client::{QuoteClient, QuoteError};
pub use types::OverviewData;
