//! Engine entry points.
//!
//! [`FinancialEngine`] owns the benchmark table and nothing else, so one
//! instance can be built per process and shared freely between threads. Every
//! method is a pure function of its arguments and the table.
//!
//! The `run_*` functions wrap engine calls in the standard
//! [`ComputationOutput`] envelope for JSON-facing callers (CLI, bindings).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::benchmark::{
    self, BenchmarkComparison, BenchmarkTable, IndustryBenchmarks, GENERAL_INDUSTRY,
};
use crate::ratios::{self, RatioSet};
use crate::record::{
    order_most_recent_first, FinancialRecord, HistoricalPoint, HistoricalSeries, ResolvedRecord,
};
use crate::risk::{self, RiskAssessment};
use crate::scoring::{
    calculate_credit_score, calculate_health_score, CreditScoreBreakdown, HealthGrade,
    HealthScoreBreakdown,
};
use crate::types::{with_metadata, ComputationOutput};
use crate::{FinHealthError, FinHealthResult};

/// Most recent periods considered when analyzing a provider's record list.
pub const MAX_HISTORY_PERIODS: usize = 12;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// One record, optional chronological history, optional industry key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub record: FinancialRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<HistoricalSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
}

/// Records in provider order (most recent period first).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesInput {
    pub records: Vec<FinancialRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RatiosInput {
    pub record: FinancialRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<HistoricalSeries>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisPeriod {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Everything the engine derives from one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialAnalysis {
    pub ratios: RatioSet,
    pub health_score: u32,
    pub health_grade: HealthGrade,
    pub health_breakdown: HealthScoreBreakdown,
    pub credit_score: u32,
    pub credit_breakdown: CreditScoreBreakdown,
    pub risk_assessment: RiskAssessment,
    pub benchmark_comparison: BenchmarkComparison,
    /// Benchmark key actually used, after falling back to `general`.
    pub industry: String,
    pub period: AnalysisPeriod,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct FinancialEngine {
    benchmarks: BenchmarkTable,
}

impl FinancialEngine {
    pub fn new(benchmarks: BenchmarkTable) -> Self {
        FinancialEngine { benchmarks }
    }

    pub fn benchmarks(&self) -> &BenchmarkTable {
        &self.benchmarks
    }

    /// Benchmarks for `industry`, falling back to `general`.
    pub fn benchmark_for(&self, industry: &str) -> &IndustryBenchmarks {
        self.benchmarks.lookup(industry)
    }

    /// Ratios only, without scoring.
    pub fn ratios(&self, record: &FinancialRecord, history: Option<&HistoricalSeries>) -> RatioSet {
        ratios::calculate_ratios(record, history)
    }

    /// Full analysis of one record.
    ///
    /// `history`, when given, must be chronological (oldest first); growth
    /// ratios are computed only when it holds two or more periods. Never
    /// fails: sparse or malformed records produce degenerate scores.
    pub fn analyze(
        &self,
        record: &FinancialRecord,
        history: Option<&HistoricalSeries>,
        industry: &str,
    ) -> FinancialAnalysis {
        let resolved = record.resolve();
        let ratios = ratios::calculate_resolved_ratios(&resolved, history);
        trace!(?ratios, "ratios computed");

        let health = calculate_health_score(&ratios);
        let credit = calculate_credit_score(&ratios);
        let risk_assessment = risk::assess_risk(&resolved, &ratios);

        let used_industry = self.benchmarks.resolve_industry(industry);
        if used_industry != industry {
            debug!(industry, fallback = GENERAL_INDUSTRY, "industry not in benchmark table");
        }
        let benchmark_comparison = benchmark::compare(&ratios, self.benchmarks.lookup(used_industry));

        debug!(
            industry = used_industry,
            health_score = health.total,
            credit_score = credit.total,
            risk_level = %risk_assessment.risk_level,
            "financial analysis complete"
        );

        FinancialAnalysis {
            health_score: health.total,
            health_grade: HealthGrade::from_score(health.total),
            health_breakdown: health,
            credit_score: credit.total,
            credit_breakdown: credit,
            risk_assessment,
            benchmark_comparison,
            industry: used_industry.to_string(),
            period: AnalysisPeriod {
                start: resolved.period_start,
                end: resolved.period_end,
            },
            ratios,
        }
    }

    /// Analyze the most recent of a provider's records.
    ///
    /// Records are ordered newest-first (by `period_end` when every record has
    /// one), truncated to [`MAX_HISTORY_PERIODS`], and the window is reversed
    /// into a chronological history for growth. Returns `None` for an empty
    /// slice.
    pub fn analyze_records(
        &self,
        records: &[FinancialRecord],
        industry: &str,
    ) -> Option<FinancialAnalysis> {
        let (latest, history) = series_window(records)?;
        Some(self.analyze(latest, history.as_ref(), industry))
    }
}

/// Latest record plus the chronological history of the analysis window.
fn series_window(records: &[FinancialRecord]) -> Option<(&FinancialRecord, Option<HistoricalSeries>)> {
    let window: Vec<&FinancialRecord> = order_most_recent_first(records)
        .into_iter()
        .take(MAX_HISTORY_PERIODS)
        .collect();
    let latest = *window.first()?;
    let history = (window.len() > 1).then(|| {
        HistoricalSeries::from_most_recent_first(
            window.into_iter().map(HistoricalPoint::from).collect(),
        )
    });
    Some((latest, history))
}

// ---------------------------------------------------------------------------
// Envelope API
// ---------------------------------------------------------------------------

/// Analyze one record and wrap the result with methodology and warnings.
pub fn run_analysis(
    input: &AnalysisInput,
    engine: &FinancialEngine,
) -> ComputationOutput<FinancialAnalysis> {
    let industry = input.industry.as_deref().unwrap_or(GENERAL_INDUSTRY);
    let analysis = engine.analyze(&input.record, input.history.as_ref(), industry);
    let warnings = analysis_warnings(&input.record, input.history.as_ref(), industry, &analysis);
    with_metadata(
        "Ratio analysis with additive health (0-100) and credit (300-900) scoring",
        &analysis_assumptions(),
        warnings,
        analysis,
    )
}

/// Analyze a provider's record list (most recent first).
pub fn run_series_analysis(
    input: &SeriesInput,
    engine: &FinancialEngine,
) -> FinHealthResult<ComputationOutput<FinancialAnalysis>> {
    let (latest, history) = series_window(&input.records).ok_or_else(|| {
        FinHealthError::InsufficientData("at least one financial record is required".into())
    })?;
    let industry = input.industry.as_deref().unwrap_or(GENERAL_INDUSTRY);
    let analysis = engine.analyze(latest, history.as_ref(), industry);

    let mut warnings = analysis_warnings(latest, history.as_ref(), industry, &analysis);
    if input.records.len() > MAX_HISTORY_PERIODS {
        warnings.push(format!(
            "{} records supplied; only the most recent {} were used.",
            input.records.len(),
            MAX_HISTORY_PERIODS
        ));
    }
    if history.is_none() {
        warnings.push("Only one period supplied; growth ratios omitted.".into());
    }

    Ok(with_metadata(
        "Ratio analysis of the most recent period with growth over the record window",
        &analysis_assumptions(),
        warnings,
        analysis,
    ))
}

/// Ratios only, wrapped in the standard envelope.
pub fn run_ratios(input: &RatiosInput) -> ComputationOutput<RatioSet> {
    let ratios = ratios::calculate_ratios(&input.record, input.history.as_ref());
    let resolved = input.record.resolve();
    let mut warnings = Vec::new();
    ratio_warnings(&resolved, &ratios, &mut warnings);
    with_metadata(
        "Financial ratios (profitability, liquidity, efficiency, leverage, growth)",
        &analysis_assumptions(),
        warnings,
        ratios,
    )
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn analysis_assumptions() -> serde_json::Value {
    serde_json::json!({
        "payment_history": "fixed at 210 points; no payment-history data source is available",
        "interest_coverage": "999 when interest expense is zero (no debt burden)",
        "cost_of_goods_sold": "70% of total expenses when not reported",
        "history_order": "chronological, oldest period first",
        "zero_denominators": "ratios with a zero or negative denominator are reported as 0"
    })
}

fn analysis_warnings(
    record: &FinancialRecord,
    history: Option<&HistoricalSeries>,
    requested_industry: &str,
    analysis: &FinancialAnalysis,
) -> Vec<String> {
    let mut warnings = Vec::new();
    ratio_warnings(&record.resolve(), &analysis.ratios, &mut warnings);

    if let Some(h) = history {
        if !h.supports_growth() {
            warnings.push(format!(
                "History has {} period(s); at least 2 are needed for growth ratios.",
                h.len()
            ));
        }
    }
    if analysis.industry != requested_industry {
        warnings.push(format!(
            "Industry '{requested_industry}' has no benchmarks; compared against '{}'.",
            analysis.industry
        ));
    }
    warnings
}

fn ratio_warnings(record: &ResolvedRecord, ratios: &RatioSet, warnings: &mut Vec<String>) {
    if record.total_revenue <= Decimal::ZERO {
        warnings.push("Revenue is zero or negative; margin and turnover ratios reported as 0.".into());
    }
    if record.current_liabilities <= Decimal::ZERO {
        warnings.push("Current liabilities are zero; liquidity ratios reported as 0.".into());
    }
    if ratios.leverage.interest_coverage_is_sentinel() && record.interest_expense.is_zero() {
        warnings.push("Interest expense is zero; interest coverage reported as 999 (no debt burden).".into());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(revenue: Decimal, month: u32) -> FinancialRecord {
        FinancialRecord {
            total_revenue: Some(revenue),
            total_expenses: Some(revenue * dec!(0.8)),
            total_assets: Some(dec!(200_000)),
            total_liabilities: Some(dec!(50_000)),
            cash_balance: Some(dec!(30_000)),
            accounts_payable: Some(dec!(20_000)),
            accounts_receivable: Some(dec!(10_000)),
            interest_expense: Some(dec!(1_000)),
            ebit: Some(revenue * dec!(0.2)),
            period_start: NaiveDate::from_ymd_opt(2024, month, 1),
            period_end: NaiveDate::from_ymd_opt(2024, month, 28),
            ..Default::default()
        }
    }

    #[test]
    fn test_analyze_reports_industry_used() {
        let engine = FinancialEngine::default();
        let a = engine.analyze(&record(dec!(100_000), 1), None, "retail");
        assert_eq!(a.industry, "retail");
        let b = engine.analyze(&record(dec!(100_000), 1), None, "space mining");
        assert_eq!(b.industry, "general");
    }

    #[test]
    fn test_analyze_copies_period() {
        let a = FinancialEngine::default().analyze(&record(dec!(100_000), 3), None, "general");
        assert_eq!(a.period.start, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(a.period.end, NaiveDate::from_ymd_opt(2024, 3, 28));
    }

    #[test]
    fn test_analyze_records_uses_latest_and_growth() {
        // Provider order: most recent first
        let records = vec![
            record(dec!(121_000), 3),
            record(dec!(110_000), 2),
            record(dec!(100_000), 1),
        ];
        let a = FinancialEngine::default()
            .analyze_records(&records, "general")
            .unwrap();

        assert_eq!(a.period.end, NaiveDate::from_ymd_opt(2024, 3, 28));
        let growth = a.ratios.growth.unwrap();
        // +10% each step
        assert_eq!(growth.revenue_growth_rate, dec!(10));
    }

    #[test]
    fn test_analyze_records_sorts_shuffled_input() {
        let records = vec![
            record(dec!(110_000), 2),
            record(dec!(121_000), 3),
            record(dec!(100_000), 1),
        ];
        let a = FinancialEngine::default()
            .analyze_records(&records, "general")
            .unwrap();
        assert_eq!(a.period.end, NaiveDate::from_ymd_opt(2024, 3, 28));
        assert_eq!(a.ratios.growth.unwrap().revenue_growth_rate, dec!(10));
    }

    #[test]
    fn test_analyze_records_window_is_truncated() {
        let mut records: Vec<FinancialRecord> = (1..=12)
            .rev()
            .map(|m| record(dec!(100_000), m))
            .collect();
        // A 13th, oldest record with a revenue that would distort growth
        let mut old = record(dec!(1), 1);
        old.period_end = NaiveDate::from_ymd_opt(2023, 12, 28);
        records.push(old);

        let a = FinancialEngine::default()
            .analyze_records(&records, "general")
            .unwrap();
        assert_eq!(a.ratios.growth.unwrap().revenue_growth_rate, Decimal::ZERO);
    }

    #[test]
    fn test_analyze_records_empty_and_single() {
        let engine = FinancialEngine::default();
        assert!(engine.analyze_records(&[], "general").is_none());
        let single = engine
            .analyze_records(&[record(dec!(100_000), 1)], "general")
            .unwrap();
        assert!(single.ratios.growth.is_none());
    }

    #[test]
    fn test_run_analysis_warnings() {
        let input = AnalysisInput {
            record: FinancialRecord::default(),
            history: Some(HistoricalSeries::default()),
            industry: Some("bakery".into()),
        };
        let out = run_analysis(&input, &FinancialEngine::default());
        assert!(out.warnings.iter().any(|w| w.contains("Revenue is zero")));
        assert!(out.warnings.iter().any(|w| w.contains("Current liabilities are zero")));
        assert!(out.warnings.iter().any(|w| w.contains("999")));
        assert!(out.warnings.iter().any(|w| w.contains("growth")));
        assert!(out.warnings.iter().any(|w| w.contains("bakery")));
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    }

    #[test]
    fn test_run_series_analysis_requires_records() {
        let err = run_series_analysis(&SeriesInput::default(), &FinancialEngine::default())
            .unwrap_err();
        assert!(matches!(err, FinHealthError::InsufficientData(_)));
    }

    #[test]
    fn test_run_series_single_period_warns() {
        let input = SeriesInput {
            records: vec![record(dec!(100_000), 1)],
            industry: None,
        };
        let out = run_series_analysis(&input, &FinancialEngine::default()).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("growth ratios omitted")));
        assert_eq!(out.result.industry, "general");
    }

    #[test]
    fn test_run_ratios_envelope() {
        let input = RatiosInput {
            record: record(dec!(100_000), 1),
            history: None,
        };
        let out = run_ratios(&input);
        assert!(out.warnings.is_empty());
        assert_eq!(out.result.liquidity.current_ratio, dec!(2));
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FinancialEngine>();
    }
}
