pub mod price_refresher;
