use std::env;
use std::path::PathBuf;

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Script filled when no files are given
    pub default_input: PathBuf,
    /// tracing filter directive
    pub log_filter: String,
    /// Interpret scripts without writing any output
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_input: PathBuf::from("CareerPlan.md"),
            log_filter: "info".to_string(),
            dry_run: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let default_input = lookup("SHEETFILL_DEFAULT_INPUT")
            .map(PathBuf::from)
            .unwrap_or(defaults.default_input);
        let log_filter = lookup("SHEETFILL_LOG")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or(defaults.log_filter);
        let dry_run = match lookup("SHEETFILL_DRY_RUN") {
            Some(value) => parse_flag(&value)?,
            None => defaults.dry_run,
        };

        Ok(Self {
            default_input,
            log_filter,
            dry_run,
        })
    }
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("SHEETFILL_DRY_RUN: expected a boolean, got '{}'", other),
    }
}
