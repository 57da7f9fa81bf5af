use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finhealth_core::record::{parse_amount, FinancialRecord};
use finhealth_core::{run_analysis, run_series_analysis, AnalysisInput, RatiosInput, SeriesInput};

use super::load_engine;
use crate::input;

fn amount(raw: &str) -> Result<Decimal, std::convert::Infallible> {
    Ok(parse_amount(raw))
}

/// Record fields as individual flags. Amounts accept currency symbols and
/// thousands separators.
#[derive(Args, Default)]
#[group(id = "record", multiple = true)]
pub struct RecordArgs {
    /// Total revenue
    #[arg(long, alias = "revenue", value_parser = amount, allow_negative_numbers = true)]
    pub total_revenue: Option<Decimal>,

    /// Total expenses
    #[arg(long, alias = "expenses", value_parser = amount, allow_negative_numbers = true)]
    pub total_expenses: Option<Decimal>,

    /// Gross profit (defaults to net profit)
    #[arg(long, value_parser = amount, allow_negative_numbers = true)]
    pub gross_profit: Option<Decimal>,

    /// Net profit (defaults to revenue - expenses)
    #[arg(long, value_parser = amount, allow_negative_numbers = true)]
    pub net_profit: Option<Decimal>,

    /// Accounts receivable
    #[arg(long, alias = "receivables", value_parser = amount, allow_negative_numbers = true)]
    pub accounts_receivable: Option<Decimal>,

    /// Accounts payable
    #[arg(long, alias = "payables", value_parser = amount, allow_negative_numbers = true)]
    pub accounts_payable: Option<Decimal>,

    /// Inventory value
    #[arg(long, alias = "inventory", value_parser = amount, allow_negative_numbers = true)]
    pub inventory_value: Option<Decimal>,

    /// Cash balance
    #[arg(long, alias = "cash", value_parser = amount, allow_negative_numbers = true)]
    pub cash_balance: Option<Decimal>,

    /// Total assets
    #[arg(long, value_parser = amount, allow_negative_numbers = true)]
    pub total_assets: Option<Decimal>,

    /// Total liabilities
    #[arg(long, value_parser = amount, allow_negative_numbers = true)]
    pub total_liabilities: Option<Decimal>,

    /// Owner equity (defaults to assets - liabilities)
    #[arg(long, value_parser = amount, allow_negative_numbers = true)]
    pub equity: Option<Decimal>,

    /// Cost of goods sold (defaults to 70% of expenses)
    #[arg(long, alias = "cogs", value_parser = amount, allow_negative_numbers = true)]
    pub cost_of_goods_sold: Option<Decimal>,

    /// Earnings before interest and tax
    #[arg(long, value_parser = amount, allow_negative_numbers = true)]
    pub ebit: Option<Decimal>,

    /// Interest expense
    #[arg(long, value_parser = amount, allow_negative_numbers = true)]
    pub interest_expense: Option<Decimal>,

    /// Current assets (defaults to cash + receivables)
    #[arg(long, value_parser = amount, allow_negative_numbers = true)]
    pub current_assets: Option<Decimal>,

    /// Current liabilities (defaults to payables)
    #[arg(long, value_parser = amount, allow_negative_numbers = true)]
    pub current_liabilities: Option<Decimal>,

    /// Period start (YYYY-MM-DD)
    #[arg(long)]
    pub period_start: Option<NaiveDate>,

    /// Period end (YYYY-MM-DD)
    #[arg(long)]
    pub period_end: Option<NaiveDate>,
}

impl RecordArgs {
    fn to_record(&self) -> FinancialRecord {
        FinancialRecord {
            total_revenue: self.total_revenue,
            total_expenses: self.total_expenses,
            gross_profit: self.gross_profit,
            net_profit: self.net_profit,
            accounts_receivable: self.accounts_receivable,
            accounts_payable: self.accounts_payable,
            inventory_value: self.inventory_value,
            cash_balance: self.cash_balance,
            total_assets: self.total_assets,
            total_liabilities: self.total_liabilities,
            equity: self.equity,
            cost_of_goods_sold: self.cost_of_goods_sold,
            ebit: self.ebit,
            interest_expense: self.interest_expense,
            current_assets: self.current_assets,
            current_liabilities: self.current_liabilities,
            period_start: self.period_start,
            period_end: self.period_end,
        }
    }

    /// Flag-built record, or `None` when no record flag was given.
    fn flagged_record(&self) -> Option<FinancialRecord> {
        let record = self.to_record();
        (record != FinancialRecord::default()).then_some(record)
    }
}

const NO_RECORD: &str =
    "no record supplied: use --input, pipe JSON on stdin, or pass record flags such as --total-revenue";

/// Arguments for a single-record analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to JSON input file: {"record": {...}, "history": [...], "industry": "..."}.
    /// Cannot be combined with record flags; flags take precedence over stdin.
    #[arg(long, conflicts_with = "record")]
    pub input: Option<String>,

    /// Industry key for benchmarking (case-sensitive; unknown keys use "general")
    #[arg(long)]
    pub industry: Option<String>,

    /// Benchmark table to use instead of the built-in one (JSON or YAML)
    #[arg(long)]
    pub benchmarks: Option<String>,

    #[command(flatten)]
    pub record: RecordArgs,
}

/// Arguments for a multi-record analysis
#[derive(Args)]
pub struct SeriesArgs {
    /// Path to JSON input file: {"records": [...], "industry": "..."}, most recent period first
    #[arg(long)]
    pub input: Option<String>,

    /// Industry key for benchmarking (overrides the input file)
    #[arg(long)]
    pub industry: Option<String>,

    /// Benchmark table to use instead of the built-in one (JSON or YAML)
    #[arg(long)]
    pub benchmarks: Option<String>,
}

/// Arguments for ratio calculation
#[derive(Args)]
pub struct RatiosArgs {
    /// Path to JSON input file: {"record": {...}, "history": [...]}.
    /// Cannot be combined with record flags; flags take precedence over stdin.
    #[arg(long, conflicts_with = "record")]
    pub input: Option<String>,

    #[command(flatten)]
    pub record: RecordArgs,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut analysis_input: AnalysisInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(record) = args.record.flagged_record() {
        AnalysisInput {
            record,
            history: None,
            industry: None,
        }
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err(NO_RECORD.into());
    };
    if args.industry.is_some() {
        analysis_input.industry = args.industry;
    }

    let engine = load_engine(args.benchmarks.as_deref())?;
    let result = run_analysis(&analysis_input, &engine);
    Ok(serde_json::to_value(result)?)
}

pub fn run_series(args: SeriesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut series_input: SeriesInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err("--input is required (or pipe JSON on stdin)".into());
    };
    if args.industry.is_some() {
        series_input.industry = args.industry;
    }

    let engine = load_engine(args.benchmarks.as_deref())?;
    let result = run_series_analysis(&series_input, &engine)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_ratios(args: RatiosArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let ratios_input: RatiosInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(record) = args.record.flagged_record() {
        RatiosInput {
            record,
            history: None,
        }
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err(NO_RECORD.into());
    };

    let result = finhealth_core::run_ratios(&ratios_input);
    Ok(serde_json::to_value(result)?)
}
