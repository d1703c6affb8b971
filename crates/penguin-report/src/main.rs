//! CLI entry point for the penguin analysis report.

use anyhow::Result;
use clap::Parser;
use penguin_report::{ReportConfig, ReportPipeline};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Exploratory analysis report for the Palmer penguins dataset",
    long_about = "Loads the Palmer penguins dataset, renders a fixed set of charts and \
                  writes a markdown report next to them.\n\n\
                  EXAMPLES:\n  \
                  # Default run: charts in ./output, report in ./penguins_analysis.md\n  \
                  penguin-report\n\n  \
                  # Use a local copy of the dataset\n  \
                  penguin-report --dataset data/penguins.csv\n\n  \
                  # Machine-readable summary\n  \
                  penguin-report --json"
)]
struct Args {
    /// Directory for chart images
    #[arg(short, long, default_value = penguin_report::config::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Path of the markdown report
    #[arg(short, long, default_value = penguin_report::config::DEFAULT_REPORT_PATH)]
    report: PathBuf,

    /// CSV file tried before the packaged and remote copies
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Resolution used to size the charts
    #[arg(long, default_value_t = penguin_report::config::DEFAULT_DPI)]
    dpi: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,

    /// Print the run summary as JSON instead of the confirmation line
    #[arg(long)]
    json: bool,
}

fn init_logging(level: &str, quiet: bool, json_output: bool) {
    // stdout must carry only the JSON summary
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "error" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_config(args: &Args) -> Result<ReportConfig> {
    let mut builder = ReportConfig::builder()
        .output_dir(args.output_dir.clone())
        .report_path(args.report.clone())
        .dpi(args.dpi);

    if let Some(dataset) = &args.dataset {
        builder = builder.bundled_dataset_path(dataset.clone());
    }

    Ok(builder.build()?)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, args.quiet, args.json);

    let config = build_config(&args)?;
    debug!("Configuration: {:?}", config);

    let summary = ReportPipeline::builder().config(config).build()?.run()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Report saved to: {}", summary.report_path.display());
    }

    Ok(())
}
