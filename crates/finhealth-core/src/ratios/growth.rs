use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::safe_percent;
use crate::record::HistoricalSeries;
use crate::types::Percent;

/// Average period-over-period growth, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthRatios {
    pub revenue_growth_rate: Percent,
    pub profit_growth_rate: Percent,
}

impl GrowthRatios {
    pub fn entries(&self) -> Vec<(&'static str, Decimal)> {
        vec![
            ("revenue_growth_rate", self.revenue_growth_rate),
            ("profit_growth_rate", self.profit_growth_rate),
        ]
    }
}

/// Growth ratios over a chronological series, or `None` with fewer than two
/// periods.
pub fn calculate(history: &HistoricalSeries) -> Option<GrowthRatios> {
    if !history.supports_growth() {
        return None;
    }
    Some(GrowthRatios {
        revenue_growth_rate: average_growth_rate(&history.revenues()),
        profit_growth_rate: average_growth_rate(&history.net_profits()),
    })
}

/// Arithmetic mean of step-wise percentage changes.
///
/// Steps whose prior value is zero or negative are skipped; if none remain the
/// rate is zero.
pub fn average_growth_rate(values: &[Decimal]) -> Percent {
    let steps: Vec<Decimal> = values
        .windows(2)
        .filter(|w| w[0] > Decimal::ZERO)
        .map(|w| {
            let change = w[1].checked_sub(w[0]).unwrap_or(Decimal::ZERO);
            safe_percent(change, w[0])
        })
        .collect();

    if steps.is_empty() {
        return Decimal::ZERO;
    }

    let total = steps
        .iter()
        .try_fold(Decimal::ZERO, |acc, s| acc.checked_add(*s));
    match total {
        Some(sum) => sum
            .checked_div(Decimal::from(steps.len()))
            .unwrap_or(Decimal::ZERO),
        None => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::HistoricalPoint;
    use rust_decimal_macros::dec;

    fn series(revenues: &[Decimal], profits: &[Decimal]) -> HistoricalSeries {
        HistoricalSeries::chronological(
            revenues
                .iter()
                .zip(profits)
                .map(|(r, p)| HistoricalPoint {
                    revenue: *r,
                    net_profit: *p,
                    period: None,
                })
                .collect(),
        )
    }

    #[test]
    fn test_two_period_growth() {
        let g = calculate(&series(
            &[dec!(100_000), dec!(120_000)],
            &[dec!(10_000), dec!(9_000)],
        ))
        .unwrap();
        assert_eq!(g.revenue_growth_rate, dec!(20));
        assert_eq!(g.profit_growth_rate, dec!(-10));
    }

    #[test]
    fn test_average_of_steps() {
        // +10% then +20%
        let rate = average_growth_rate(&[dec!(100), dec!(110), dec!(132)]);
        assert_eq!(rate, dec!(15));
    }

    #[test]
    fn test_non_positive_prior_steps_skipped() {
        // 0 -> 50 skipped, -10 -> 20 skipped, 50 -> -10 = -120%, 20 -> 30 = +50%
        let rate = average_growth_rate(&[dec!(0), dec!(50), dec!(-10), dec!(20), dec!(30)]);
        assert_eq!(rate, dec!(-35));
    }

    #[test]
    fn test_no_qualifying_steps_is_zero() {
        assert_eq!(average_growth_rate(&[dec!(0), dec!(100)]), Decimal::ZERO);
        assert_eq!(average_growth_rate(&[dec!(100)]), Decimal::ZERO);
        assert_eq!(average_growth_rate(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_single_point_has_no_growth() {
        assert!(calculate(&series(&[dec!(100)], &[dec!(10)])).is_none());
    }
}
