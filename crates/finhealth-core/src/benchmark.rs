//! Industry benchmark table and ratio comparison.
//!
//! The table is configuration: built in by default, optionally loaded from
//! JSON or YAML, validated once, and read-only afterwards. Every table must
//! carry a `general` entry, which is what unknown industries fall back to.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::ratios::{RatioCategory, RatioSet};
use crate::{FinHealthError, FinHealthResult};

/// Fallback industry key.
pub const GENERAL_INDUSTRY: &str = "general";

/// Ratio name → reference value.
pub type CategoryBenchmarks = BTreeMap<String, Decimal>;

/// Category → ratio name → reference value, for one industry.
pub type IndustryBenchmarks = BTreeMap<RatioCategory, CategoryBenchmarks>;

/// Category → ratio name → comparison.
pub type BenchmarkComparison = BTreeMap<RatioCategory, BTreeMap<String, BenchmarkDelta>>;

static NO_BENCHMARKS: IndustryBenchmarks = BTreeMap::new();

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BenchmarkTable {
    industries: BTreeMap<String, IndustryBenchmarks>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Performance {
    Above,
    Below,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkDelta {
    pub value: Decimal,
    pub benchmark: Decimal,
    /// `value - benchmark`
    pub difference: Decimal,
    pub performance: Performance,
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

impl BenchmarkTable {
    /// Build a table, rejecting one without a `general` entry.
    pub fn new(industries: BTreeMap<String, IndustryBenchmarks>) -> FinHealthResult<Self> {
        if !industries.contains_key(GENERAL_INDUSTRY) {
            return Err(FinHealthError::InvalidInput {
                field: "benchmarks".into(),
                reason: format!("benchmark table must define a '{GENERAL_INDUSTRY}' industry"),
            });
        }
        Ok(BenchmarkTable { industries })
    }

    pub fn from_json_str(json: &str) -> FinHealthResult<Self> {
        let industries: BTreeMap<String, IndustryBenchmarks> = serde_json::from_str(json)?;
        Self::new(industries)
    }

    pub fn from_yaml_str(yaml: &str) -> FinHealthResult<Self> {
        let industries: BTreeMap<String, IndustryBenchmarks> = serde_yaml::from_str(yaml)?;
        Self::new(industries)
    }

    /// The reference table shipped with the engine.
    pub fn builtin() -> Self {
        let mut industries = BTreeMap::new();
        industries.insert(
            "manufacturing".to_string(),
            industry(dec!(8.5), dec!(6.2), dec!(1.5), dec!(1.0), dec!(1.2), dec!(0.45), dec!(1.2)),
        );
        industries.insert(
            "retail".to_string(),
            industry(dec!(5.2), dec!(7.5), dec!(1.8), dec!(0.8), dec!(0.8), dec!(0.38), dec!(2.5)),
        );
        industries.insert(
            "services".to_string(),
            industry(dec!(12.5), dec!(15.2), dec!(2.0), dec!(1.8), dec!(0.5), dec!(0.25), dec!(1.8)),
        );
        industries.insert(
            GENERAL_INDUSTRY.to_string(),
            industry(dec!(10.0), dec!(8.0), dec!(1.5), dec!(1.0), dec!(1.0), dec!(0.4), dec!(1.5)),
        );
        BenchmarkTable { industries }
    }

    /// The key actually used for `industry`: itself when present
    /// (case-sensitive), otherwise `general`.
    pub fn resolve_industry<'a>(&'a self, industry: &'a str) -> &'a str {
        if self.industries.contains_key(industry) {
            industry
        } else {
            GENERAL_INDUSTRY
        }
    }

    /// Benchmarks for `industry`, falling back to `general`.
    pub fn lookup(&self, industry: &str) -> &IndustryBenchmarks {
        self.industries
            .get(industry)
            .or_else(|| self.industries.get(GENERAL_INDUSTRY))
            .unwrap_or(&NO_BENCHMARKS)
    }

    /// Exact lookup without fallback.
    pub fn get(&self, industry: &str) -> Option<&IndustryBenchmarks> {
        self.industries.get(industry)
    }

    pub fn industries(&self) -> impl Iterator<Item = &str> {
        self.industries.keys().map(String::as_str)
    }
}

impl Default for BenchmarkTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn industry(
    net_profit_margin: Decimal,
    return_on_assets: Decimal,
    current_ratio: Decimal,
    quick_ratio: Decimal,
    debt_to_equity: Decimal,
    debt_to_assets: Decimal,
    asset_turnover: Decimal,
) -> IndustryBenchmarks {
    fn category(pairs: &[(&str, Decimal)]) -> CategoryBenchmarks {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    let mut map = BTreeMap::new();
    map.insert(
        RatioCategory::Profitability,
        category(&[
            ("net_profit_margin", net_profit_margin),
            ("return_on_assets", return_on_assets),
        ]),
    );
    map.insert(
        RatioCategory::Liquidity,
        category(&[("current_ratio", current_ratio), ("quick_ratio", quick_ratio)]),
    );
    map.insert(
        RatioCategory::Leverage,
        category(&[
            ("debt_to_equity", debt_to_equity),
            ("debt_to_assets", debt_to_assets),
        ]),
    );
    map.insert(
        RatioCategory::Efficiency,
        category(&[("asset_turnover", asset_turnover)]),
    );
    map
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Compare every computed ratio that has a reference value.
///
/// Ratios without a benchmark are omitted, as are categories left empty.
pub fn compare(ratios: &RatioSet, benchmarks: &IndustryBenchmarks) -> BenchmarkComparison {
    let mut comparison = BenchmarkComparison::new();

    for (category, entries) in ratios.iter() {
        let Some(reference) = benchmarks.get(&category) else {
            continue;
        };
        let deltas: BTreeMap<String, BenchmarkDelta> = entries
            .into_iter()
            .filter_map(|(name, value)| {
                reference
                    .get(name)
                    .map(|benchmark| (name.to_string(), delta(value, *benchmark)))
            })
            .collect();
        if !deltas.is_empty() {
            comparison.insert(category, deltas);
        }
    }

    comparison
}

fn delta(value: Decimal, benchmark: Decimal) -> BenchmarkDelta {
    BenchmarkDelta {
        value,
        benchmark,
        difference: value.checked_sub(benchmark).unwrap_or(Decimal::ZERO),
        performance: if value > benchmark {
            Performance::Above
        } else {
            Performance::Below
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
