//! Financial ratio calculators.
//!
//! Each calculator is a pure function over a [`ResolvedRecord`] (growth also
//! takes a [`HistoricalSeries`]). None of them can fail: a denominator of zero
//! or less yields a ratio of zero, and arithmetic overflow also degrades to
//! zero. The one exception is interest coverage, which reports
//! [`INTEREST_COVERAGE_SENTINEL`] when there is no interest expense.

pub mod efficiency;
pub mod growth;
pub mod leverage;
pub mod liquidity;
pub mod profitability;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::record::{FinancialRecord, HistoricalSeries, ResolvedRecord};

pub use efficiency::EfficiencyRatios;
pub use growth::GrowthRatios;
pub use leverage::{LeverageRatios, INTEREST_COVERAGE_SENTINEL};
pub use liquidity::LiquidityRatios;
pub use profitability::ProfitabilityRatios;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Ratio family. Used as the outer key wherever ratios are addressed by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioCategory {
    Profitability,
    Liquidity,
    Efficiency,
    Leverage,
    Growth,
}

impl RatioCategory {
    pub const ALL: [RatioCategory; 5] = [
        RatioCategory::Profitability,
        RatioCategory::Liquidity,
        RatioCategory::Efficiency,
        RatioCategory::Leverage,
        RatioCategory::Growth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Profitability => "profitability",
            Self::Liquidity => "liquidity",
            Self::Efficiency => "efficiency",
            Self::Leverage => "leverage",
            Self::Growth => "growth",
        }
    }
}

impl std::fmt::Display for RatioCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Every ratio computed for one record.
///
/// Serializes as the nested `category -> ratio -> value` mapping. The
/// `growth` key is absent unless at least two historical periods were given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioSet {
    pub profitability: ProfitabilityRatios,
    pub liquidity: LiquidityRatios,
    pub efficiency: EfficiencyRatios,
    pub leverage: LeverageRatios,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth: Option<GrowthRatios>,
}

impl RatioSet {
    /// `(name, value)` pairs for one category, or `None` if the category was
    /// not computed.
    pub fn category(&self, category: RatioCategory) -> Option<Vec<(&'static str, Decimal)>> {
        match category {
            RatioCategory::Profitability => Some(self.profitability.entries()),
            RatioCategory::Liquidity => Some(self.liquidity.entries()),
            RatioCategory::Efficiency => Some(self.efficiency.entries()),
            RatioCategory::Leverage => Some(self.leverage.entries()),
            RatioCategory::Growth => self.growth.as_ref().map(GrowthRatios::entries),
        }
    }

    /// Look up a single ratio by category and name.
    pub fn get(&self, category: RatioCategory, name: &str) -> Option<Decimal> {
        self.category(category)?
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// All computed categories with their ratios, in category order.
    pub fn iter(&self) -> impl Iterator<Item = (RatioCategory, Vec<(&'static str, Decimal)>)> + '_ {
        RatioCategory::ALL
            .into_iter()
            .filter_map(move |c| self.category(c).map(|entries| (c, entries)))
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the full ratio set for a record.
///
/// Growth ratios are included only when `history` holds two or more periods.
pub fn calculate_ratios(record: &FinancialRecord, history: Option<&HistoricalSeries>) -> RatioSet {
    calculate_resolved_ratios(&record.resolve(), history)
}

/// As [`calculate_ratios`], for a record that has already been resolved.
pub fn calculate_resolved_ratios(
    record: &ResolvedRecord,
    history: Option<&HistoricalSeries>,
) -> RatioSet {
    RatioSet {
        profitability: profitability::calculate(record),
        liquidity: liquidity::calculate(record),
        efficiency: efficiency::calculate(record),
        leverage: leverage::calculate(record),
        growth: history.and_then(growth::calculate),
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

const HUNDRED: Decimal = dec!(100);

/// `numerator / denominator`, or zero when the denominator is not positive
/// or the division overflows.
pub(crate) fn safe_ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// `numerator / denominator * 100` with the same guards as [`safe_ratio`].
pub(crate) fn safe_percent(numerator: Decimal, denominator: Decimal) -> Decimal {
    safe_ratio(numerator, denominator)
        .checked_mul(HUNDRED)
        .unwrap_or(Decimal::ZERO)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
