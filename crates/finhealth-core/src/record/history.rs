//! Historical revenue / profit series used for growth ratios.
//!
//! A [`HistoricalSeries`] is always held in chronological order (oldest
//! first). Record providers return periods most-recent-first, so the
//! constructors below make the direction explicit instead of trusting the
//! order the caller happened to pass.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{coerce, FinancialRecord};
use crate::types::Money;

/// Simplified per-period figures for growth calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    #[serde(default, deserialize_with = "coerce::lenient_money_or_zero")]
    pub revenue: Money,
    #[serde(default, deserialize_with = "coerce::lenient_money_or_zero")]
    pub net_profit: Money,
    #[serde(
        default,
        deserialize_with = "coerce::lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub period: Option<NaiveDate>,
}

impl From<&FinancialRecord> for HistoricalPoint {
    fn from(record: &FinancialRecord) -> Self {
        let resolved = record.resolve();
        HistoricalPoint {
            revenue: resolved.total_revenue,
            net_profit: resolved.net_profit,
            period: resolved.period_end,
        }
    }
}

/// Chronologically ordered (oldest first) history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoricalSeries {
    points: Vec<HistoricalPoint>,
}

impl HistoricalSeries {
    /// Wrap points the caller guarantees are already oldest-first.
    pub fn chronological(points: Vec<HistoricalPoint>) -> Self {
        HistoricalSeries { points }
    }

    /// Wrap points supplied newest-first (provider order).
    pub fn from_most_recent_first(mut points: Vec<HistoricalPoint>) -> Self {
        points.reverse();
        HistoricalSeries { points }
    }

    /// Build a chronological series from provider records.
    ///
    /// Records are put into most-recent-first order with
    /// [`order_most_recent_first`] and then reversed.
    pub fn from_records(records: &[FinancialRecord]) -> Self {
        let points = order_most_recent_first(records)
            .into_iter()
            .map(HistoricalPoint::from)
            .collect();
        Self::from_most_recent_first(points)
    }

    pub fn points(&self) -> &[HistoricalPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Growth needs at least two periods.
    pub fn supports_growth(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn revenues(&self) -> Vec<Money> {
        self.points.iter().map(|p| p.revenue).collect()
    }

    pub fn net_profits(&self) -> Vec<Money> {
        self.points.iter().map(|p| p.net_profit).collect()
    }
}

/// Order provider records newest-first.
///
/// When every record carries a `period_end` the records are sorted by it
/// (descending, stable). Otherwise the provider's order is trusted as-is.
pub fn order_most_recent_first(records: &[FinancialRecord]) -> Vec<&FinancialRecord> {
    let mut ordered: Vec<&FinancialRecord> = records.iter().collect();
    if ordered.iter().all(|r| r.period_end.is_some()) {
        ordered.sort_by(|a, b| b.period_end.cmp(&a.period_end));
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn point(revenue: Money) -> HistoricalPoint {
        HistoricalPoint {
            revenue,
            net_profit: revenue / dec!(10),
            period: None,
        }
    }

    fn dated(revenue: Money, y: i32, m: u32) -> FinancialRecord {
        FinancialRecord {
            total_revenue: Some(revenue),
            total_expenses: Some(revenue / dec!(2)),
            period_end: NaiveDate::from_ymd_opt(y, m, 28),
            ..Default::default()
        }
    }

    #[test]
    fn test_most_recent_first_is_reversed() {
        let s = HistoricalSeries::from_most_recent_first(vec![
            point(dec!(300)),
            point(dec!(200)),
            point(dec!(100)),
        ]);
        assert_eq!(s.revenues(), vec![dec!(100), dec!(200), dec!(300)]);
    }

    #[test]
    fn test_chronological_is_kept() {
        let s = HistoricalSeries::chronological(vec![point(dec!(100)), point(dec!(200))]);
        assert_eq!(s.revenues(), vec![dec!(100), dec!(200)]);
        assert!(s.supports_growth());
    }

    #[test]
    fn test_from_records_sorts_by_period_end() {
        // Deliberately shuffled
        let records = vec![
            dated(dec!(200), 2024, 2),
            dated(dec!(300), 2024, 3),
            dated(dec!(100), 2024, 1),
        ];
        let s = HistoricalSeries::from_records(&records);
        assert_eq!(s.revenues(), vec![dec!(100), dec!(200), dec!(300)]);
        assert_eq!(s.net_profits(), vec![dec!(50), dec!(100), dec!(150)]);
    }

    #[test]
    fn test_from_records_without_dates_trusts_provider_order() {
        let records = vec![
            FinancialRecord {
                total_revenue: Some(dec!(300)),
                ..Default::default()
            },
            FinancialRecord {
                total_revenue: Some(dec!(100)),
                ..Default::default()
            },
        ];
        let s = HistoricalSeries::from_records(&records);
        assert_eq!(s.revenues(), vec![dec!(100), dec!(300)]);
    }

    #[test]
    fn test_single_point_does_not_support_growth() {
        let s = HistoricalSeries::chronological(vec![point(dec!(100))]);
        assert!(!s.supports_growth());
        assert!(!HistoricalSeries::default().supports_growth());
    }

    #[test]
    fn test_point_deserialization_is_lenient() {
        let json = serde_json::json!([
            {"revenue": "1,000", "net_profit": null, "period": "2024-01-31"},
            {"revenue": 1200}
        ]);
        let s: HistoricalSeries = serde_json::from_value(json).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.points()[0].revenue, dec!(1000));
        assert_eq!(s.points()[0].net_profit, dec!(0));
        assert_eq!(s.points()[1].period, None);
    }
}
