use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::ratios::RatioSet;

pub const HEALTH_SCORE_MAX: u32 = 100;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Points awarded per bucket, and the clamped total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthScoreBreakdown {
    /// 0–30, by net profit margin.
    pub profitability: u32,
    /// 0–25, by current ratio.
    pub liquidity: u32,
    /// 0–20, by debt-to-equity.
    pub leverage: u32,
    /// 0–15, by asset turnover.
    pub efficiency: u32,
    /// 0–10, by revenue growth. Zero when growth was not computed.
    pub growth: u32,
    pub total: u32,
}

/// Qualitative band for a health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthGrade {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl HealthGrade {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 80 => Self::Excellent,
            s if s >= 60 => Self::Good,
            s if s >= 40 => Self::Fair,
            _ => Self::NeedsImprovement,
        }
    }
}

impl std::fmt::Display for HealthGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsImprovement => "Needs Improvement",
        };
        write!(f, "{}", s)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Score overall financial health on a 0–100 scale.
pub fn calculate_health_score(ratios: &RatioSet) -> HealthScoreBreakdown {
    let profitability = profitability_points(ratios.profitability.net_profit_margin);
    let liquidity = liquidity_points(ratios.liquidity.current_ratio);
    let leverage = leverage_points(ratios.leverage.debt_to_equity);
    let efficiency = efficiency_points(ratios.efficiency.asset_turnover);
    let growth = ratios
        .growth
        .as_ref()
        .map_or(0, |g| growth_points(g.revenue_growth_rate));

    let total = (profitability + liquidity + leverage + efficiency + growth).min(HEALTH_SCORE_MAX);

    HealthScoreBreakdown {
        profitability,
        liquidity,
        leverage,
        efficiency,
        growth,
        total,
    }
}

// ---------------------------------------------------------------------------
// Buckets
// ---------------------------------------------------------------------------

fn profitability_points(net_profit_margin: Decimal) -> u32 {
    match net_profit_margin {
        m if m > dec!(20) => 30,
        m if m > dec!(10) => 20,
        m if m > dec!(5) => 15,
        m if m > Decimal::ZERO => 10,
        _ => 0,
    }
}

fn liquidity_points(current_ratio: Decimal) -> u32 {
    match current_ratio {
        c if c >= dec!(2) => 25,
        c if c >= dec!(1.5) => 20,
        c if c >= dec!(1) => 15,
        c if c >= dec!(0.5) => 10,
        _ => 0,
    }
}

fn leverage_points(debt_to_equity: Decimal) -> u32 {
    match debt_to_equity {
        d if d < dec!(0.5) => 20,
        d if d < dec!(1) => 15,
        d if d < dec!(2) => 10,
        d if d < dec!(3) => 5,
        _ => 0,
    }
}

fn efficiency_points(asset_turnover: Decimal) -> u32 {
    match asset_turnover {
        t if t > dec!(2) => 15,
        t if t > dec!(1) => 12,
        t if t > dec!(0.5) => 8,
        _ => 0,
    }
}

fn growth_points(revenue_growth_rate: Decimal) -> u32 {
    match revenue_growth_rate {
        g if g > dec!(20) => 10,
        g if g > dec!(10) => 8,
        g if g > dec!(5) => 6,
        g if g > Decimal::ZERO => 4,
        _ => 0,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratios::calculate_ratios;
    use crate::record::{FinancialRecord, HistoricalPoint, HistoricalSeries};

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(profitability_points(dec!(20.01)), 30);
        assert_eq!(profitability_points(dec!(20)), 20);
        assert_eq!(profitability_points(dec!(5)), 10);
        assert_eq!(profitability_points(Decimal::ZERO), 0);

        assert_eq!(liquidity_points(dec!(2)), 25);
        assert_eq!(liquidity_points(dec!(1.5)), 20);
        assert_eq!(liquidity_points(dec!(1)), 15);
        assert_eq!(liquidity_points(dec!(0.5)), 10);
        assert_eq!(liquidity_points(dec!(0.49)), 0);

        assert_eq!(leverage_points(Decimal::ZERO), 20);
        assert_eq!(leverage_points(dec!(0.5)), 15);
        assert_eq!(leverage_points(dec!(2.99)), 5);
        assert_eq!(leverage_points(dec!(3)), 0);

        assert_eq!(efficiency_points(dec!(2)), 12);
        assert_eq!(efficiency_points(dec!(0.5)), 0);

        assert_eq!(growth_points(dec!(20)), 8);
        assert_eq!(growth_points(dec!(0.1)), 4);
        assert_eq!(growth_points(dec!(-3)), 0);
    }

    #[test]
    fn test_reference_record_buckets() {
        let record = FinancialRecord {
            total_revenue: Some(dec!(120_000)),
            total_expenses: Some(dec!(80_000)),
            total_assets: Some(dec!(200_000)),
            equity: Some(dec!(100_000)),
            cash_balance: Some(dec!(30_000)),
            accounts_payable: Some(dec!(20_000)),
            accounts_receivable: Some(dec!(10_000)),
            ..Default::default()
        };
        let score = calculate_health_score(&calculate_ratios(&record, None));

        assert_eq!(score.profitability, 30);
        assert_eq!(score.liquidity, 25);
        // No liabilities reported: D/E = 0
        assert_eq!(score.leverage, 20);
        // Asset turnover 0.6
        assert_eq!(score.efficiency, 8);
        assert_eq!(score.growth, 0);
        assert_eq!(score.total, 83);
    }

    #[test]
    fn test_maximum_score_is_100() {
        let record = FinancialRecord {
            total_revenue: Some(dec!(1_000_000)),
            total_expenses: Some(dec!(500_000)),
            total_assets: Some(dec!(100_000)),
            cash_balance: Some(dec!(100_000)),
            accounts_payable: Some(dec!(10_000)),
            ..Default::default()
        };
        let history = HistoricalSeries::chronological(vec![
            HistoricalPoint {
                revenue: dec!(500_000),
                net_profit: dec!(100_000),
                period: None,
            },
            HistoricalPoint {
                revenue: dec!(1_000_000),
                net_profit: dec!(500_000),
                period: None,
            },
        ]);
        let score = calculate_health_score(&calculate_ratios(&record, Some(&history)));
        assert_eq!(score.growth, 10);
        assert_eq!(score.total, 100);
    }

    #[test]
    fn test_empty_record_scores_leverage_only() {
        // Every ratio is zero, and zero D/E falls in the best leverage bucket.
        let score = calculate_health_score(&calculate_ratios(&FinancialRecord::default(), None));
        assert_eq!(score.total, 20);
        assert_eq!(HealthGrade::from_score(score.total), HealthGrade::NeedsImprovement);
    }

    #[test]
    fn test_grades() {
        assert_eq!(HealthGrade::from_score(100), HealthGrade::Excellent);
        assert_eq!(HealthGrade::from_score(80), HealthGrade::Excellent);
        assert_eq!(HealthGrade::from_score(79), HealthGrade::Good);
        assert_eq!(HealthGrade::from_score(60), HealthGrade::Good);
        assert_eq!(HealthGrade::from_score(40), HealthGrade::Fair);
        assert_eq!(HealthGrade::from_score(39), HealthGrade::NeedsImprovement);
        assert_eq!(HealthGrade::NeedsImprovement.to_string(), "Needs Improvement");
    }
}
