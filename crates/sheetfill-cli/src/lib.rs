pub mod config;

use std::path::PathBuf;

use sheetfill_engine::{run_batch, BatchOptions, BatchSummary};

use crate::config::Config;

/// Fill `files`, or the configured default script when none are given
pub fn run(config: &Config, files: Vec<PathBuf>) -> BatchSummary {
    let files = if files.is_empty() {
        vec![config.default_input.clone()]
    } else {
        files
    };

    let options = BatchOptions {
        dry_run: config.dry_run,
    };

    tracing::info!("Filling {} script(s)", files.len());
    run_batch(&files, &options)
}
