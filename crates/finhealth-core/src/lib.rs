pub mod benchmark;
pub mod engine;
pub mod error;
pub mod ratios;
pub mod record;
pub mod risk;
pub mod scoring;
pub mod types;

pub use engine::{
    run_analysis, run_ratios, run_series_analysis, AnalysisInput, FinancialAnalysis,
    FinancialEngine, RatiosInput, SeriesInput,
};
pub use error::FinHealthError;
pub use types::*;

/// Standard result type for the fallible edges of the engine (config and I/O boundaries).
pub type FinHealthResult<T> = Result<T, FinHealthError>;
