//! The document capability the interpreter works against.

use std::path::Path;

use sheetfill_core::{CellCoord, CellFormat};

use crate::backends::JsonGrid;
use crate::error::GridError;

/// A document of named sheets holding string cells.
///
/// Coordinates are 0-based and row 0 is the header row. Reads on a sheet
/// that does not exist return empty results; writes fail with
/// [`GridError::SheetNotFound`].
pub trait Grid {
    fn sheet_names(&self) -> Vec<String>;

    fn has_sheet(&self, sheet: &str) -> bool {
        self.sheet_names().iter().any(|name| name == sheet)
    }

    /// Titles in row 0, up to the last used column
    fn header(&self, sheet: &str) -> Vec<String> {
        match self.last_used_column(sheet, 0) {
            Some(last) => (0..=last)
                .map(|col| self.get_cell(sheet, CellCoord::new(0, col)))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Highest row holding a value
    fn last_used_row(&self, sheet: &str) -> Option<u32>;

    /// Highest column holding a value in `row`
    fn last_used_column(&self, sheet: &str, row: u32) -> Option<u32>;

    /// Displayed text of a cell; empty for blank cells
    fn get_cell(&self, sheet: &str, coord: CellCoord) -> String;

    /// Store `text` as a string cell and merge `format` into its style
    fn set_cell(
        &mut self,
        sheet: &str,
        coord: CellCoord,
        text: &str,
        format: &CellFormat,
    ) -> Result<(), GridError>;

    /// Merge `format` into a cell's style without touching its value
    fn format_cell(
        &mut self,
        sheet: &str,
        coord: CellCoord,
        format: &CellFormat,
    ) -> Result<(), GridError>;

    fn save(&self, path: &Path) -> Result<(), GridError>;
}

/// Open a document, picking the backend from the file extension.
///
/// `.json` opens a serialized workbook; `.xlsx` and `.xlsm` open an Excel
/// document when the `xlsx` feature is enabled.
pub fn open_grid(path: impl AsRef<Path>) -> Result<Box<dyn Grid>, GridError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(GridError::NotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "json" => Ok(Box::new(JsonGrid::open(path)?)),
        #[cfg(feature = "xlsx")]
        "xlsx" | "xlsm" => Ok(Box::new(crate::backends::XlsxGrid::open(path)?)),
        _ => Err(GridError::UnsupportedFormat(path.to_path_buf())),
    }
}
