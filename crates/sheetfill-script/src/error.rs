use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a fill script
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Cannot find {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
