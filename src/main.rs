// Entry point and high-level CLI flow.
//
// One run reads every report export in the input directory, parses each into
// a `ReportRecord`, and regenerates the dashboard's `reportsData.ts`.
// The process exits non-zero on any fatal error so a caller that shells out
// to it can relay success or failure.
mod classifier;
mod config;
mod error;
mod loader;
mod output;
mod pipeline;
mod reports;
mod sections;
mod types;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use config::PipelineConfig;
use std::path::PathBuf;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "report_parser")]
#[command(about = "Parse event report exports into the dashboard's reportsData module")]
#[command(version)]
struct Args {
    /// Directory holding the report exports
    #[arg(long, env = "REPORT_INPUT_DIR", default_value = "data_report")]
    input_dir: PathBuf,

    /// Generated TypeScript module, overwritten on every run
    #[arg(long, env = "REPORT_OUTPUT", default_value = "app/data/reportsData.ts")]
    output: PathBuf,

    /// File extension of report exports
    #[arg(long, default_value = "txt")]
    extension: String,

    /// Also write the parsed reports as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Also write a one-row-per-report CSV index
    #[arg(long)]
    summary_csv: Option<PathBuf>,

    /// Parse and list reports without writing any file
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> PipelineConfig {
        PipelineConfig {
            input_dir: self.input_dir,
            output: self.output,
            extension: self.extension,
            json_output: self.json,
            summary_csv: self.summary_csv,
            dry_run: self.dry_run,
            ..PipelineConfig::default()
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "report_parser=debug,info" } else { "report_parser=info,warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = args.into_config();
    let summary = pipeline::run(&config)
        .with_context(|| format!("Report parsing failed for {}", config.input_dir.display()))?;

    if !summary.skipped.is_empty() {
        println!(
            "Note: {} of {} report files skipped.",
            summary.skipped.len(),
            summary.discovered
        );
        for skipped in &summary.skipped {
            println!("  - {}: {}", skipped.path.display(), skipped.reason);
        }
        println!();
    }

    let index = reports::build_index(&summary.reports);
    output::print_report_index(&index);
    if summary.written {
        println!(
            "Processed {} reports ({} written).",
            summary.reports.len(),
            config.output.display()
        );
    } else {
        println!("Processed {} reports (dry run, nothing written).", summary.reports.len());
    }
    Ok(())
}
