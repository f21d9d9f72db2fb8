pub mod classifier;
pub mod derived;
pub mod history;
pub mod transition;

pub use classifier::classify;
pub use history::summarize;
pub use transition::{on_status_change, BuyZoneEvent};
