//! In-memory model of a sheetfill document: a [`Workbook`] of named
//! [`Sheet`]s holding sparse [`Cell`]s.

pub mod cell;
pub mod coord;
pub mod format;
pub mod sheet;
pub mod workbook;

pub use cell::{Cell, CellValue};
pub use coord::{col_from_label, col_to_label, CellCoord};
pub use format::{CellFormat, VerticalAlign};
pub use sheet::Sheet;
pub use workbook::Workbook;
