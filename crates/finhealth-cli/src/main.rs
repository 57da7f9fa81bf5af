mod commands;
mod input;
mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::analysis::{AnalyzeArgs, RatiosArgs, SeriesArgs};
use commands::benchmarks::BenchmarksArgs;

/// Small-business financial health analysis
#[derive(Parser)]
#[command(
    name = "finhealth",
    version,
    about = "Small-business financial health analysis",
    long_about = "Computes financial ratios, a 0-100 health score, a 300-900 credit score, \
                  a rule-based risk assessment and an industry benchmark comparison from \
                  financial-statement records supplied as JSON or flags."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one financial record (ratios, scores, risk, benchmarks)
    Analyze(AnalyzeArgs),
    /// Analyze the most recent of several records, with growth over the window
    Series(SeriesArgs),
    /// Calculate financial ratios only
    Ratios(RatiosArgs),
    /// Show the industry benchmark table
    Benchmarks(BenchmarksArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::analysis::run_analyze(args),
        Commands::Series(args) => commands::analysis::run_series(args),
        Commands::Ratios(args) => commands::analysis::run_ratios(args),
        Commands::Benchmarks(args) => commands::benchmarks::run_benchmarks(args),
        Commands::Version => {
            println!("finhealth {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
