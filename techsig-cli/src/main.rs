//! techsig CLI: indicator and signal reports for one or more symbols.
//!
//! Commands:
//! - `analyze`: compute indicators and print the latest signals per symbol
//! - `indicators`: export the full indicator table for one symbol as CSV

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use std::io::Write;
use std::path::PathBuf;
use techsig_core::data::{CsvProvider, DataProvider, SyntheticProvider};
use techsig_core::{analyze, Analysis, AnalysisConfig, IndicatorEngine, IndicatorRow};
use techsig_core::{PriceSeries, SignalClassifier};
use tracing::warn;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

#[derive(Parser)]
#[command(
    name = "techsig",
    about = "techsig CLI: technical indicators and trading signals"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute indicators and classify the latest bar for each symbol.
    Analyze {
        /// Symbols to analyze (e.g., SPY QQQ AAPL).
        #[arg(required = true)]
        symbols: Vec<String>,

        #[command(flatten)]
        source: SourceArgs,

        /// Path to a TOML config file with thresholds and lookback.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Write every indicator row for one symbol as CSV.
    Indicators {
        /// Symbol to export.
        symbol: String,

        #[command(flatten)]
        source: SourceArgs,

        /// Output file. Defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct SourceArgs {
    /// Directory holding `{SYMBOL}.csv` files. Defaults to ./data.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Use a deterministic synthetic random walk instead of CSV files.
    #[arg(long, default_value_t = false)]
    synthetic: bool,

    /// Start date (YYYY-MM-DD). Defaults to `lookback_days` before the end.
    #[arg(long)]
    start: Option<String>,

    /// End date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    end: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            symbols,
            source,
            config,
            format,
        } => run_analyze(symbols, source, config, format),
        Commands::Indicators {
            symbol,
            source,
            output,
        } => run_indicators(symbol, source, output),
    }
}

/// Logs go to stderr; stdout carries report output only.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        // Disable colours on release builds
        .with_ansi(cfg!(debug_assertions))
        .init();
}

fn load_config(path: Option<PathBuf>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => AnalysisConfig::from_file(&path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(AnalysisConfig::default()),
    }
}

fn make_provider(source: &SourceArgs) -> Box<dyn DataProvider> {
    if source.synthetic {
        Box::new(SyntheticProvider::default())
    } else {
        Box::new(CsvProvider::new(&source.data_dir))
    }
}

fn parse_date(raw: Option<&str>, flag: &str) -> Result<Option<NaiveDate>> {
    raw.map(|s| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("--{flag} '{s}' is not a YYYY-MM-DD date"))
    })
    .transpose()
}

fn date_range(source: &SourceArgs, lookback_days: u32) -> Result<(NaiveDate, NaiveDate)> {
    let end = parse_date(source.end.as_deref(), "end")?
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let start = parse_date(source.start.as_deref(), "start")?
        .unwrap_or_else(|| end - chrono::Duration::days(i64::from(lookback_days)));
    if start > end {
        bail!("start date {start} is after end date {end}");
    }
    Ok((start, end))
}

fn warn_if_short(series: &PriceSeries, engine: &IndicatorEngine) {
    if series.len() <= engine.warmup() {
        warn!(
            symbol = series.symbol(),
            bars = series.len(),
            warmup = engine.warmup(),
            "series shorter than the longest indicator window; some signals will be unavailable"
        );
    }
}

fn run_analyze(
    symbols: Vec<String>,
    source: SourceArgs,
    config_path: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let config = load_config(config_path)?;
    let (start, end) = date_range(&source, config.data.lookback_days)?;
    let provider = make_provider(&source);
    let engine = IndicatorEngine::new();
    let classifier = SignalClassifier::new(config.signals);

    let results: Vec<(String, Result<Analysis, techsig_core::data::DataError>)> = symbols
        .par_iter()
        .map(|symbol| {
            let analysis = provider.fetch(symbol, start, end).map(|series| {
                warn_if_short(&series, &engine);
                analyze(&series, &engine, &classifier)
            });
            (symbol.clone(), analysis)
        })
        .collect();

    let mut analyses = Vec::new();
    let mut failed = false;
    for (symbol, result) in results {
        match result {
            Ok(analysis) => analyses.push(analysis),
            Err(err) => {
                eprintln!("Error for {symbol}: {err}");
                failed = true;
            }
        }
    }

    match format {
        OutputFormat::Table => {
            for analysis in &analyses {
                print_report(analysis);
            }
        }
        OutputFormat::Json => {
            let reports: Vec<_> = analyses
                .iter()
                .map(|a| {
                    serde_json::json!({
                        "symbol": a.symbol,
                        "bars": a.rows.len(),
                        "close": a.last_close(),
                        "report": a.report,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

fn fmt_value(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
}

fn print_report(analysis: &Analysis) {
    let report = &analysis.report;
    println!();
    println!("=== {} ===", analysis.symbol);
    match report.timestamp {
        Some(ts) => println!("As of:          {ts}"),
        None => println!("As of:          (no bars)"),
    }
    println!("Bars:           {}", analysis.rows.len());
    println!("Close:          {}", fmt_value(analysis.last_close()));
    println!();
    println!("--- Signals ---");
    println!(
        "RSI:            {:<18} rsi {}",
        report.rsi.signal.to_string(),
        fmt_value(report.rsi.rsi)
    );
    println!(
        "MACD:           {:<18} macd {} signal {} diff {}",
        report.macd.signal.to_string(),
        fmt_value(report.macd.macd),
        fmt_value(report.macd.macd_signal),
        fmt_value(report.macd.difference)
    );
    println!(
        "Bollinger:      {:<18} lower {} upper {}",
        report.bollinger.signal.to_string(),
        fmt_value(report.bollinger.lower),
        fmt_value(report.bollinger.upper)
    );
    println!(
        "Trend:          {:<18} sma20 {} sma50 {}",
        report.trend.signal.to_string(),
        fmt_value(report.trend.sma_20),
        fmt_value(report.trend.sma_50)
    );
}

fn run_indicators(symbol: String, source: SourceArgs, output: Option<PathBuf>) -> Result<()> {
    let (start, end) = date_range(&source, AnalysisConfig::default().data.lookback_days)?;
    let provider = make_provider(&source);
    let series = provider
        .fetch(&symbol, start, end)
        .with_context(|| format!("fetching {symbol} from {}", provider.name()))?;

    let engine = IndicatorEngine::new();
    warn_if_short(&series, &engine);
    let rows = engine.compute(&series);

    let sink: Box<dyn Write> = match &output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };
    write_rows(sink, &rows)?;

    if let Some(path) = output {
        eprintln!("Wrote {} rows to {}", rows.len(), path.display());
    }
    Ok(())
}

fn write_rows(sink: impl Write, rows: &[IndicatorRow]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(sink);

    let mut header = vec!["timestamp", "open", "high", "low", "close", "volume"];
    header.extend(IndicatorRow::DERIVED_COLUMNS);
    writer.write_record(&header)?;

    for row in rows {
        let bar = &row.bar;
        let mut record = vec![
            bar.timestamp.to_string(),
            bar.open.to_string(),
            bar.high.to_string(),
            bar.low.to_string(),
            bar.close.to_string(),
            bar.volume.to_string(),
        ];
        record.extend(
            row.derived_values()
                .iter()
                .map(|v| v.map(|x| x.to_string()).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
