use rust_decimal::Decimal;

use crate::models::Status;

/// Effect a status change has on a stock's buy-zone history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuyZoneEvent {
    /// Open a new interval at the observed price.
    Enter { price: Option<Decimal> },
    /// Close the currently open interval at the observed price.
    Exit { price: Option<Decimal> },
}

/// Decide whether a status change crosses the buy-zone boundary.
///
/// Emits `Enter` only on a transition into `buy_zone`, `Exit` only on a
/// transition out of it. Every other move, including into or out of
/// `avoid`, leaves the history untouched, so macro gating never pollutes
/// the win/loss ledger.
pub fn on_status_change(
    old_status: Status,
    new_status: Status,
    price: Option<Decimal>,
) -> Option<BuyZoneEvent> {
    match (old_status == Status::BuyZone, new_status == Status::BuyZone) {
        (false, true) => Some(BuyZoneEvent::Enter { price }),
        (true, false) => Some(BuyZoneEvent::Exit { price }),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
