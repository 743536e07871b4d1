use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser};
use console::style;
use spamset::PipelineConfig;
use spamset::config::DEFAULT_OUTPUT_DIR;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Clone, Debug, Parser)]
#[command(name = "spamset", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
struct Cli {
    /// Directory for the archive, the extracted collection and the CSV
    #[arg(default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// More diagnostics on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Do not draw the download progress bar
    #[arg(long)]
    no_progress: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet)?;

    let config = PipelineConfig::default()
        .output_dir(cli.output_dir)
        .progress(!cli.no_progress);

    match spamset::download_sms_dataset(&config) {
        Some(path) => {
            println!("{} Dataset ready at {}", style("✓").green().bold(), path.display());
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("{} Failed to prepare the dataset", style("✗").red().bold());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) -> anyhow::Result<()> {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .context("failed to install tracing subscriber")
}
