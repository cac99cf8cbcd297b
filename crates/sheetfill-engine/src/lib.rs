//! Replays sheetfill templates against spreadsheet documents.
//!
//! A [`Grid`] is the document capability; [`backends`] holds the JSON and
//! Excel implementations. The [`Interpreter`] walks each sheet section of a
//! [`sheetfill_script::Template`], threading a [`CursorState`] through
//! [`dispatch`] line by line, and [`run_batch`] drives whole files.

pub mod backends;
pub mod batch;
pub mod context;
pub mod error;
pub mod grid;
pub mod interpreter;
pub mod search;
pub mod state;

pub use backends::JsonGrid;
#[cfg(feature = "xlsx")]
pub use backends::XlsxGrid;
pub use batch::{fill_file, run_batch, BatchOptions, BatchSummary};
pub use context::{CommandStats, SheetContext};
pub use error::{FillError, GridError};
pub use grid::{open_grid, Grid};
pub use interpreter::{ApplyReport, Interpreter};
pub use state::{dispatch, ActiveCommand, Cursor, CursorState};
