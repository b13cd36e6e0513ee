//! CLI entry point for the cleaning pipeline.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use satisfaction_prep::{
    CleaningConfig, CleaningError, CleaningStrategy, CleaningSummary, DataCleaning, DataStrategy,
    DivideStrategy, PreProcessStrategy, StrategyOutput, clean_df_with_summary,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Which part of the pipeline to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Stage {
    /// Clean the raw table only
    Preprocess,
    /// Split an already cleaned table only
    Split,
    /// Clean, then split
    All,
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Customer satisfaction data cleaning and train/test split",
    long_about = "Cleans a raw order/review table and splits it into train and test sets.\n\n\
                  EXAMPLES:\n  \
                  # Clean and split with defaults (test size 0.2, seed 42)\n  \
                  satisfaction-prep -i olist_customers_dataset.csv\n\n  \
                  # Only run the preprocessing stage\n  \
                  satisfaction-prep -i data.csv --stage preprocess\n\n  \
                  # Machine-readable summary\n  \
                  satisfaction-prep -i data.csv --json | jq .train_rows"
)]
struct Args {
    /// Path to the CSV file to process
    #[arg(short, long)]
    input: PathBuf,

    /// Stage to run
    #[arg(long, value_enum, default_value = "all")]
    stage: Stage,

    /// JSON configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fraction of rows placed in the test set
    #[arg(long)]
    test_size: Option<f64>,

    /// Seed for the row shuffle
    #[arg(long)]
    seed: Option<u64>,

    /// Label column
    #[arg(short, long)]
    target: Option<String>,

    /// Fail when a median-imputed column has no values
    #[arg(long)]
    strict_imputation: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of a human-readable summary
    ///
    /// Disables all logging; only the final JSON is written.
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Merge the optional config file with command line overrides.
fn build_config(args: &Args) -> Result<CleaningConfig> {
    let base = match &args.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            CleaningConfig::from_json(&content)?
        }
        None => CleaningConfig::default(),
    };

    let config = CleaningConfig::builder()
        .test_size(args.test_size.unwrap_or(base.test_size))
        .random_state(args.seed.unwrap_or(base.random_state))
        .target_column(args.target.clone().unwrap_or(base.target_column))
        .strict_imputation(args.strict_imputation || base.strict_imputation)
        .build()?;

    debug!("Using configuration: {:?}", config);
    Ok(config)
}

fn load_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_infer_schema_length(Some(1000))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
        .map_err(|e| anyhow!("Failed to read {}: {}", path.display(), e))
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !args.input.exists() {
        return Err(anyhow!("Input file not found: {}", args.input.display()));
    }

    let config = build_config(&args)?;

    info!("Loading dataset from: {}", args.input.display());
    let data = load_csv(&args.input)?;
    info!("Dataset loaded successfully: {:?}", data.shape());

    let outcome = match args.stage {
        Stage::All => run_all(&args, &data, &config),
        Stage::Preprocess | Stage::Split => run_stage(&args, &data, &config),
    };

    if let Err(e) = &outcome {
        error!("Cleaning failed: {}", e);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&json!({ "error": e }))?);
        }
    }
    outcome.map_err(Into::into)
}

fn run_all(
    args: &Args,
    data: &DataFrame,
    config: &CleaningConfig,
) -> std::result::Result<(), CleaningError> {
    let (_, summary) = clean_df_with_summary(data, config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&args.input, &summary);
    }
    Ok(())
}

/// Run a single stage, selecting the strategy at run time.
fn run_stage(
    args: &Args,
    data: &DataFrame,
    config: &CleaningConfig,
) -> std::result::Result<(), CleaningError> {
    let strategy: CleaningStrategy = match args.stage {
        Stage::Preprocess => PreProcessStrategy::new()
            .with_strict_imputation(config.strict_imputation)
            .into(),
        _ => DivideStrategy::from_config(config).into(),
    };
    let stage_name = strategy.name();

    let output = DataCleaning::new(data, strategy).handle_data()?;

    let report = match output {
        StrategyOutput::Cleaned(df) => json!({
            "stage": stage_name,
            "input_shape": data.shape(),
            "output_shape": df.shape(),
            "columns": df.get_column_names().iter().map(|s| s.as_str()).collect::<Vec<_>>(),
        }),
        StrategyOutput::Split(split) => json!({
            "stage": stage_name,
            "input_shape": data.shape(),
            "label_column": split.y_train.name().as_str(),
            "features": split.feature_names(),
            "train_rows": split.x_train.height(),
            "test_rows": split.x_test.height(),
        }),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        println!("{}", "=".repeat(60));
        println!("STAGE COMPLETE: {}", stage_name);
        println!("{}", "=".repeat(60));
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

/// Print a human-readable summary of a full run.
///
/// Uses `println!` so the summary is visible regardless of log level.
fn print_summary(input: &Path, summary: &CleaningSummary) {
    println!();
    println!("{}", "=".repeat(60));
    println!("CLEANING COMPLETE");
    println!("{}", "=".repeat(60));
    println!(
        "Input:    {} ({} rows x {} columns)",
        input.display(),
        summary.input_shape.0,
        summary.input_shape.1
    );
    println!(
        "Cleaned:  {} rows x {} columns",
        summary.cleaned_shape.0, summary.cleaned_shape.1
    );
    println!("Label:    {}", summary.label_column);
    println!("Features: {}", summary.feature_columns.join(", "));
    println!(
        "Split:    {} train / {} test (test_size {}, seed {})",
        summary.train_rows, summary.test_rows, summary.test_size, summary.random_state
    );
    println!("{}", "=".repeat(60));
}
