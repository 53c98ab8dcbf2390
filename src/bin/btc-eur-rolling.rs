//! btc-eur-rolling CLI - fetch, convert and average the Bitcoin price index
//!
//! ## Example Usage
//!
//! ```bash
//! # Default run: outputs land in the working directory
//! btc-eur-rolling
//!
//! # Custom config and output directory, debug logging
//! btc-eur-rolling --config my.toml --output-dir reports --verbose
//! ```

use btc_eur_rolling::config::PipelineConfig;
use btc_eur_rolling::error::Result as PipelineResult;
use btc_eur_rolling::pipeline::Pipeline;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process;

/// btc-eur-rolling: Bitcoin price in EUR with a 7-day rolling average
#[derive(Parser)]
#[command(name = "btc-eur-rolling")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Bitcoin price in EUR with a 7-day rolling average", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the CSV and chart (overrides the config file)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> PipelineResult<()> {
    let mut config = PipelineConfig::load(cli.config.as_deref())?;
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }

    if cli.verbose {
        println!(
            "{} v{}",
            "btc-eur-rolling".cyan().bold(),
            env!("CARGO_PKG_VERSION")
        );
        println!(
            "Output dir: {}",
            config.output_dir.display().to_string().dimmed()
        );
    }

    let pipeline = Pipeline::from_config(config)?;
    let report = pipeline.run()?;

    println!(
        "{} {} rows for {}",
        "Done:".green().bold(),
        report.rows,
        report.window
    );
    println!("  CSV:   {}", report.csv_path.display());
    println!("  Chart: {}", report.chart_path.display());

    Ok(())
}
