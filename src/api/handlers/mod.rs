pub mod dashboard;
pub mod health;
pub mod macro_regime;
pub mod metrics;
pub mod stocks;
pub mod tags;
pub mod triggers;
