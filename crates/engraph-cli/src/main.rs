//! engraph - Weekly email engagement reporting

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use engraph_cli::ReportPipeline;
use engraph_common::init_logging;
use engraph_config::ConfigLoader;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Aggregate weekly email-open CSV exports into stacked bar charts", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => ConfigLoader::load().context("failed to load configuration")?,
    };

    let mut logging = config.logging.to_logging_config();
    if let Some(level) = args.log_level {
        logging.level = level;
    }
    init_logging(logging).map_err(|err| anyhow::anyhow!("failed to initialize logging: {err}"))?;

    info!(
        groups = config.weeks.len(),
        output = %config.output.directory.display(),
        "starting report generation"
    );

    ReportPipeline::new(config).run().await?;
    Ok(())
}
