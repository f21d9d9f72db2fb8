use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::StockScores;

/// Two-decimal half-up rounding used by all ratio metrics.
fn round2(v: Decimal) -> Decimal {
    v.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Percentage upside from the current price to fair value.
///
/// The denominator is the current price, not fair value: the number answers
/// "how far would the stock have to run from here", which is the convention
/// the whole tool uses.
pub fn upside_pct(fair_value: Decimal, current_price: Option<Decimal>) -> Option<Decimal> {
    let price = current_price.filter(|p| *p > Decimal::ZERO)?;
    Some((fair_value - price) / price * Decimal::ONE_HUNDRED)
}

/// Bull-case upside over bear-case downside, from the current price.
///
/// Returns `None` unless all three inputs are present and the price sits
/// above the bear case; at or below it the downside is non-positive and
/// the ratio is meaningless.
pub fn asymmetry_ratio(
    bull_fv: Option<Decimal>,
    bear_fv: Option<Decimal>,
    current_price: Option<Decimal>,
) -> Option<Decimal> {
    let bull = bull_fv?;
    let bear = bear_fv?;
    let price = current_price?;

    let downside = price - bear;
    if downside <= Decimal::ZERO {
        return None;
    }

    Some(round2((bull - price) / downside))
}

/// Year-over-year percentage change in shares outstanding. Positive means
/// dilution, negative means buybacks.
pub fn dilution_risk_pct(
    shares_current: Option<i64>,
    shares_prior: Option<i64>,
) -> Option<Decimal> {
    let current = shares_current?;
    let prior = shares_prior?;
    if prior == 0 {
        return None;
    }

    let delta = Decimal::from(current - prior) / Decimal::from(prior) * Decimal::ONE_HUNDRED;
    Some(round2(delta))
}

/// Mean of the execution sub-scores. Unrounded; consumers format.
pub fn execution_score(scores: &StockScores) -> Decimal {
    mean(&[
        scores.revenue_growth,
        scores.fcf_margin,
        scores.roic,
        scores.dilution,
    ])
}

/// Mean of the balance-sheet sub-scores.
pub fn balance_sheet_score(scores: &StockScores) -> Decimal {
    mean(&[
        scores.net_cash,
        scores.interest_coverage,
        scores.balance_dilution_risk,
    ])
}

/// Mean of the growth-quality sub-scores.
pub fn growth_quality_score(scores: &StockScores) -> Decimal {
    mean(&[
        scores.organic_growth,
        scores.fcf_conversion,
        scores.gross_margin_stability,
    ])
}

fn mean(values: &[i32]) -> Decimal {
    let sum: i32 = values.iter().sum();
    Decimal::from(sum) / Decimal::from(values.len() as i32)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn d(v: i64) -> Decimal {
        Decimal::from(v)
    }

    fn make_scores(values: [i32; 10]) -> StockScores {
        StockScores {
            id: Uuid::new_v4(),
            stock_id: Uuid::new_v4(),
            revenue_growth: values[0],
            fcf_margin: values[1],
            roic: values[2],
            dilution: values[3],
            net_cash: values[4],
            interest_coverage: values[5],
            balance_dilution_risk: values[6],
            organic_growth: values[7],
            fcf_conversion: values[8],
            gross_margin_stability: values[9],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_upside_pct_basic() {
        assert_eq!(upside_pct(d(150), Some(d(120))), Some(d(25)));
    }

    #[test]
    fn test_upside_pct_negative_when_above_fair_value() {
        assert_eq!(upside_pct(d(100), Some(d(125))), Some(d(-20)));
    }

    #[test]
    fn test_upside_pct_missing_price() {
        assert_eq!(upside_pct(d(150), None), None);
    }

    #[test]
    fn test_asymmetry_ratio_basic() {
        // (200 - 120) / (120 - 100) = 4
        assert_eq!(
            asymmetry_ratio(Some(d(200)), Some(d(100)), Some(d(120))),
            Some(d(4))
        );
    }

    #[test]
    fn test_asymmetry_ratio_rounds_to_two_places() {
        // (200 - 120) / (120 - 90) = 2.666... → 2.67
        assert_eq!(
            asymmetry_ratio(Some(d(200)), Some(d(90)), Some(d(120))),
            Some(Decimal::new(267, 2))
        );
    }

    #[test]
    fn test_asymmetry_ratio_null_when_price_below_bear_case() {
        assert_eq!(asymmetry_ratio(Some(d(200)), Some(d(130)), Some(d(120))), None);
    }

    #[test]
    fn test_asymmetry_ratio_null_when_price_equals_bear_case() {
        assert_eq!(asymmetry_ratio(Some(d(200)), Some(d(120)), Some(d(120))), None);
    }

    #[test]
    fn test_asymmetry_ratio_requires_all_inputs() {
        assert_eq!(asymmetry_ratio(None, Some(d(100)), Some(d(120))), None);
        assert_eq!(asymmetry_ratio(Some(d(200)), None, Some(d(120))), None);
        assert_eq!(asymmetry_ratio(Some(d(200)), Some(d(100)), None), None);
    }

    #[test]
    fn test_dilution_risk_positive_on_dilution() {
        assert_eq!(
            dilution_risk_pct(Some(1_020_000_000), Some(1_000_000_000)),
            Some(d(2))
        );
    }

    #[test]
    fn test_dilution_risk_negative_on_buybacks() {
        assert_eq!(
            dilution_risk_pct(Some(990_000_000), Some(1_000_000_000)),
            Some(d(-1))
        );
    }

    #[test]
    fn test_dilution_risk_missing_inputs() {
        assert_eq!(dilution_risk_pct(None, Some(1_000_000_000)), None);
        assert_eq!(dilution_risk_pct(Some(1_000_000_000), None), None);
        assert_eq!(dilution_risk_pct(Some(1_000_000_000), Some(0)), None);
    }

    #[test]
    fn test_execution_score() {
        let scores = make_scores([8, 6, 7, 9, 5, 5, 5, 5, 5, 5]);
        assert_eq!(execution_score(&scores), Decimal::new(75, 1));
    }

    #[test]
    fn test_balance_sheet_score_keeps_raw_mean() {
        let scores = make_scores([5, 5, 5, 5, 8, 7, 7, 5, 5, 5]);
        // (8 + 7 + 7) / 3 = 7.333..., kept unrounded
        let expected = Decimal::from(22) / Decimal::from(3);
        assert_eq!(balance_sheet_score(&scores), expected);
    }

    #[test]
    fn test_growth_quality_score() {
        let scores = make_scores([5, 5, 5, 5, 5, 5, 5, 9, 6, 6]);
        assert_eq!(growth_quality_score(&scores), d(7));
    }

    #[test]
    fn test_pillars_read_disjoint_sub_scores() {
        let a = make_scores([8, 6, 7, 9, 1, 2, 3, 4, 5, 6]);
        let mut b = a.clone();
        b.net_cash = 10;
        b.organic_growth = 10;
        assert_eq!(execution_score(&a), execution_score(&b));
        assert_ne!(balance_sheet_score(&a), balance_sheet_score(&b));
        assert_ne!(growth_quality_score(&a), growth_quality_score(&b));
    }
}
