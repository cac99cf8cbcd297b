use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sheetfill_cli::config::Config;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sheetfill")]
#[command(about = "Fill spreadsheet documents from fill scripts", long_about = None)]
#[command(version)]
struct Cli {
    /// Fill scripts to run, in order
    files: Vec<PathBuf>,

    /// Interpret the scripts but don't write any output document
    #[arg(long)]
    dry_run: bool,

    /// tracing filter, e.g. "debug" or "sheetfill_engine=trace"
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(filter) = cli.log_level {
        config.log_filter = filter;
    }
    if cli.dry_run {
        config.dry_run = true;
    }

    let filter = EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("invalid log filter '{}'", config.log_filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    sheetfill_cli::run(&config, cli.files);
    Ok(())
}
