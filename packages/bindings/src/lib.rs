use finhealth_core::{AnalysisInput, FinancialEngine, RatiosInput, SeriesInput};
use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Engine over the built-in benchmark table.
fn engine() -> FinancialEngine {
    FinancialEngine::default()
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_financial_health(input_json: String) -> NapiResult<String> {
    let input: AnalysisInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finhealth_core::run_analysis(&input, &engine());
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_financial_series(input_json: String) -> NapiResult<String> {
    let input: SeriesInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finhealth_core::run_series_analysis(&input, &engine()).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Ratios and benchmarks
// ---------------------------------------------------------------------------

#[napi]
pub fn financial_ratios(input_json: String) -> NapiResult<String> {
    let input: RatiosInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finhealth_core::run_ratios(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn industry_benchmarks() -> NapiResult<String> {
    serde_json::to_string(engine().benchmarks()).map_err(to_napi_error)
}
