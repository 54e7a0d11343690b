use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use seedplate_core::batch::run_batch;
use seedplate_core::batch::config::BatchConfig;
use seedplate_core::classify::StubClassifier;

use crate::progress::CliProgress;
use crate::summary;

#[derive(Args)]
pub struct RunArgs {
    /// Batch config file (TOML)
    pub config: PathBuf,

    /// Print the parsed config and exit without processing
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.config)
        .with_context(|| format!("Failed to read config {}", args.config.display()))?;
    let config: BatchConfig = toml::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", args.config.display()))?;

    summary::print_run_summary(&config);
    if args.dry_run {
        return Ok(());
    }

    let cancel = AtomicBool::new(false);
    let result = run_batch(
        &config,
        &StubClassifier,
        Arc::new(CliProgress::new()),
        &cancel,
    )?;

    summary::print_batch_result(&result);
    Ok(())
}
