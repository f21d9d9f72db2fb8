use rust_decimal::Decimal;

use crate::models::Status;

/// Price band above the buy target that still counts as "watch zone".
const WATCH_ZONE_PCT: i64 = 15;

/// Classify a stock into a buy-readiness zone.
///
/// Rules, in fixed priority order:
/// 1. No price → `Extended`. A stock we cannot price cannot justify a buy,
///    gated or not.
/// 2. `macro_gated` → `Avoid`.
/// 3. Price at or below target → `BuyZone`.
/// 4. Within 15% above target → `WatchZone`; beyond that → `Extended`.
///
/// `buy_target` must be positive; the API layer rejects anything else
/// before it gets here.
pub fn classify(current_price: Option<Decimal>, buy_target: Decimal, macro_gated: bool) -> Status {
    let price = match current_price {
        Some(p) => p,
        None => return Status::Extended,
    };

    if macro_gated {
        return Status::Avoid;
    }

    if price <= buy_target {
        return Status::BuyZone;
    }

    let pct_above = (price - buy_target) / buy_target * Decimal::ONE_HUNDRED;
    if pct_above <= Decimal::from(WATCH_ZONE_PCT) {
        Status::WatchZone
    } else {
        Status::Extended
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: i64) -> Decimal {
        Decimal::from(v)
    }

    #[test]
    fn test_below_target_is_buy_zone() {
        assert_eq!(classify(Some(d(95)), d(100), false), Status::BuyZone);
    }

    #[test]
    fn test_at_target_is_buy_zone() {
        assert_eq!(classify(Some(d(100)), d(100), false), Status::BuyZone);
    }

    #[test]
    fn test_ten_pct_above_is_watch_zone() {
        assert_eq!(classify(Some(d(110)), d(100), false), Status::WatchZone);
    }

    #[test]
    fn test_exactly_fifteen_pct_is_watch_zone() {
        assert_eq!(classify(Some(d(115)), d(100), false), Status::WatchZone);
    }

    #[test]
    fn test_twenty_pct_above_is_extended() {
        assert_eq!(classify(Some(d(120)), d(100), false), Status::Extended);
    }

    #[test]
    fn test_macro_gated_is_avoid_even_below_target() {
        assert_eq!(classify(Some(d(90)), d(100), true), Status::Avoid);
    }

    #[test]
    fn test_unknown_price_is_extended() {
        assert_eq!(classify(None, d(100), false), Status::Extended);
    }

    #[test]
    fn test_unknown_price_beats_macro_gate() {
        // No price means no assessment at all, even for a gated stock.
        assert_eq!(classify(None, d(100), true), Status::Extended);
    }

    #[test]
    fn test_never_avoid_when_ungated() {
        for p in [1, 50, 99, 100, 101, 115, 116, 500] {
            let status = classify(Some(d(p)), d(100), false);
            assert_ne!(status, Status::Avoid, "price {p} should never be Avoid");
        }
    }

    #[test]
    fn test_rising_price_never_moves_toward_buy_zone() {
        fn rank(s: Status) -> u8 {
            match s {
                Status::BuyZone => 0,
                Status::WatchZone => 1,
                Status::Extended => 2,
                Status::Avoid => unreachable!("ungated classify cannot return Avoid"),
            }
        }

        let mut prev = rank(classify(Some(d(1)), d(100), false));
        for p in 2..=300 {
            let cur = rank(classify(Some(d(p)), d(100), false));
            assert!(cur >= prev, "status regressed at price {p}");
            prev = cur;
        }
    }
}
