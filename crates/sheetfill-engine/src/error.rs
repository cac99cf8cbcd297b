use std::path::PathBuf;

use sheetfill_script::ScriptError;
use thiserror::Error;

/// Errors raised by document backends
#[derive(Error, Debug)]
pub enum GridError {
    #[error("Cannot find {}", .0.display())]
    NotFound(PathBuf),

    #[error("Unsupported document format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Invalid cell position ({row}, {col})")]
    InvalidCoordinate { row: i64, col: i64 },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("xlsx error: {0}")]
    Xlsx(String),
}

/// Failures while filling a document.
///
/// None of these abort a batch; they are logged and the run moves on.
#[derive(Error, Debug)]
pub enum FillError {
    #[error("Cannot find {}", .0.display())]
    DocumentNotFound(PathBuf),

    #[error("Cannot find '{value}' in sheet {sheet}")]
    CellNotFound { sheet: String, value: String },

    #[error("Failed to save {}: {source}", .path.display())]
    SaveFailure {
        path: PathBuf,
        #[source]
        source: GridError,
    },

    #[error("Unrecognized command in sheet {sheet}: {line}")]
    MalformedCommand { sheet: String, line: String },

    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: GridError,
    },

    #[error(transparent)]
    Script(ScriptError),
}

impl From<ScriptError> for FillError {
    fn from(err: ScriptError) -> Self {
        match err {
            ScriptError::NotFound(path) => FillError::DocumentNotFound(path),
            other => FillError::Script(other),
        }
    }
}
