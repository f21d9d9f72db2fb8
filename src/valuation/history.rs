use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::BuyZoneEntry;

/// Aggregate view of a stock's buy-zone history.
#[derive(Debug, Clone, Serialize)]
pub struct BuyZoneSummary {
    pub total_entries: usize,
    pub completed_exits: usize,
    /// `None` with zero completed exits; insufficient data is not a 0%
    /// win rate.
    pub win_rate_pct: Option<Decimal>,
}

/// Summarize entry/exit counts and win rate over a stock's history.
///
/// A completed exit is a win only when both prices were recorded and the
/// exit beat the entry.
pub fn summarize(entries: &[BuyZoneEntry]) -> BuyZoneSummary {
    let total_entries = entries.len();

    let completed: Vec<&BuyZoneEntry> =
        entries.iter().filter(|e| e.exited_at.is_some()).collect();

    let wins = completed
        .iter()
        .filter(|e| match (e.entry_price, e.exit_price) {
            (Some(entry), Some(exit)) => exit > entry,
            _ => false,
        })
        .count();

    let win_rate_pct = if completed.is_empty() {
        None
    } else {
        let rate = Decimal::from(wins as i64) / Decimal::from(completed.len() as i64)
            * Decimal::ONE_HUNDRED;
        Some(rate.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
    };

    BuyZoneSummary {
        total_entries,
        completed_exits: completed.len(),
        win_rate_pct,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn make_entry(entry: Option<i64>, exit: Option<i64>, closed: bool) -> BuyZoneEntry {
        let entered_at = Utc::now() - Duration::days(30);
        BuyZoneEntry {
            id: Uuid::new_v4(),
            stock_id: Uuid::new_v4(),
            entered_at,
            exited_at: closed.then(|| entered_at + Duration::days(7)),
            entry_price: entry.map(Decimal::from),
            exit_price: exit.map(Decimal::from),
            outcome: None,
        }
    }

    #[test]
    fn test_two_wins_of_three_rounds_to_67() {
        let entries = vec![
            make_entry(Some(100), Some(110), true),
            make_entry(Some(100), Some(90), true),
            make_entry(Some(100), Some(105), true),
        ];

        let summary = summarize(&entries);
        assert_eq!(summary.total_entries, 3);
        assert_eq!(summary.completed_exits, 3);
        assert_eq!(summary.win_rate_pct, Some(Decimal::from(67)));
    }

    #[test]
    fn test_no_completed_exits_is_null_not_zero() {
        let entries = vec![make_entry(Some(100), None, false)];

        let summary = summarize(&entries);
        assert_eq!(summary.total_entries, 1);
        assert_eq!(summary.completed_exits, 0);
        assert_eq!(summary.win_rate_pct, None);
    }

    #[test]
    fn test_empty_history() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_entries, 0);
        assert_eq!(summary.completed_exits, 0);
        assert_eq!(summary.win_rate_pct, None);
    }

    #[test]
    fn test_open_entry_excluded_from_win_rate() {
        let entries = vec![
            make_entry(Some(100), Some(120), true),
            make_entry(Some(95), None, false),
        ];

        let summary = summarize(&entries);
        assert_eq!(summary.total_entries, 2);
        assert_eq!(summary.completed_exits, 1);
        assert_eq!(summary.win_rate_pct, Some(Decimal::ONE_HUNDRED));
    }

    #[test]
    fn test_exit_without_prices_counts_as_loss() {
        // Closed while the price feed was down: completed, but not a win.
        let entries = vec![
            make_entry(Some(100), None, true),
            make_entry(Some(100), Some(110), true),
        ];

        let summary = summarize(&entries);
        assert_eq!(summary.completed_exits, 2);
        assert_eq!(summary.win_rate_pct, Some(Decimal::from(50)));
    }

    #[test]
    fn test_flat_exit_is_not_a_win() {
        let entries = vec![make_entry(Some(100), Some(100), true)];
        assert_eq!(summarize(&entries).win_rate_pct, Some(Decimal::ZERO));
    }
}
