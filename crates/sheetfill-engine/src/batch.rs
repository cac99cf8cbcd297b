use std::path::{Path, PathBuf};

use sheetfill_script::Template;
use tracing::{error, info};

use crate::error::{FillError, GridError};
use crate::grid::open_grid;
use crate::interpreter::{ApplyReport, Interpreter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOptions {
    /// Interpret every script but write nothing
    pub dry_run: bool,
}

/// Outcome of a batch: one entry per script that was attempted
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub completed: Vec<(PathBuf, ApplyReport)>,
    pub failed: Vec<(PathBuf, FillError)>,
}

impl BatchSummary {
    pub fn attempted(&self) -> usize {
        self.completed.len() + self.failed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Parse one fill script, open its document and fill it
pub fn fill_file(path: &Path, options: &BatchOptions) -> Result<ApplyReport, FillError> {
    let template = Template::from_path(path)?;

    info!("Opening {}", template.source.display());
    let mut grid = open_grid(&template.source).map_err(|err| match err {
        GridError::NotFound(path) => FillError::DocumentNotFound(path),
        source => FillError::Open {
            path: template.source.clone(),
            source,
        },
    })?;

    let interpreter = Interpreter::new(&template);
    let report = if options.dry_run {
        info!("Dry run: {} not written", template.output.display());
        interpreter.run(grid.as_mut())
    } else {
        interpreter.apply(grid.as_mut())
    };
    Ok(report)
}

/// Fill every script in order. A failing script is logged and skipped.
pub fn run_batch<P: AsRef<Path>>(paths: &[P], options: &BatchOptions) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for path in paths {
        let path = path.as_ref();
        match fill_file(path, options) {
            Ok(report) => summary.completed.push((path.to_path_buf(), report)),
            Err(err) => {
                error!("{}", err);
                summary.failed.push((path.to_path_buf(), err));
            }
        }
    }

    info!(
        "Processed {} script(s), {} failed",
        summary.attempted(),
        summary.failed.len()
    );
    summary
}
