use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use sheetfill_core::{CellCoord, CellFormat, VerticalAlign};
use umya_spreadsheet::{reader, writer, Spreadsheet, VerticalAlignmentValues, Worksheet};

use crate::error::GridError;
use crate::grid::Grid;

/// 0-based row → last 0-based column holding a value
type RowBounds = BTreeMap<u32, u32>;

/// An Excel document loaded through umya-spreadsheet
pub struct XlsxGrid {
    book: Spreadsheet,
    bounds: HashMap<String, RowBounds>,
}

impl XlsxGrid {
    pub fn from_spreadsheet(book: Spreadsheet) -> Self {
        let bounds = book
            .get_sheet_collection()
            .iter()
            .map(|ws| (ws.get_name().to_string(), scan_bounds(ws)))
            .collect();
        Self { book, bounds }
    }

    pub fn open(path: &Path) -> Result<Self, GridError> {
        let book = reader::xlsx::read(path).map_err(|e| GridError::Xlsx(e.to_string()))?;
        Ok(Self::from_spreadsheet(book))
    }

    pub fn spreadsheet(&self) -> &Spreadsheet {
        &self.book
    }

    fn worksheet(&self, name: &str) -> Option<&Worksheet> {
        self.book.get_sheet_by_name(name)
    }

    fn worksheet_mut(&mut self, name: &str) -> Result<&mut Worksheet, GridError> {
        self.book
            .get_sheet_by_name_mut(name)
            .ok_or_else(|| GridError::SheetNotFound(name.to_string()))
    }
}

fn scan_bounds(ws: &Worksheet) -> RowBounds {
    let mut bounds = RowBounds::new();
    for cell in ws.get_cell_collection() {
        if cell.get_value().is_empty() {
            continue;
        }
        let coordinate = cell.get_coordinate();
        note_used(
            &mut bounds,
            *coordinate.get_row_num() - 1,
            *coordinate.get_col_num() - 1,
        );
    }
    bounds
}

fn note_used(bounds: &mut RowBounds, row: u32, col: u32) {
    let last = bounds.entry(row).or_insert(col);
    *last = (*last).max(col);
}

/// umya addresses cells as 1-based (col, row)
fn position(coord: CellCoord) -> (u32, u32) {
    (coord.col + 1, coord.row + 1)
}

fn apply_format(ws: &mut Worksheet, coord: CellCoord, format: &CellFormat) {
    let alignment = ws.get_style_mut(position(coord)).get_alignment_mut();
    if format.wrap_text {
        alignment.set_wrap_text(true);
    }
    let vertical = match format.vertical_align {
        VerticalAlign::Top => VerticalAlignmentValues::Top,
        VerticalAlign::Middle => VerticalAlignmentValues::Center,
        VerticalAlign::Bottom => return,
    };
    alignment.set_vertical(vertical);
}

impl Grid for XlsxGrid {
    fn sheet_names(&self) -> Vec<String> {
        self.book
            .get_sheet_collection()
            .iter()
            .map(|ws| ws.get_name().to_string())
            .collect()
    }

    fn has_sheet(&self, sheet: &str) -> bool {
        self.worksheet(sheet).is_some()
    }

    fn last_used_row(&self, sheet: &str) -> Option<u32> {
        self.bounds.get(sheet)?.keys().next_back().copied()
    }

    fn last_used_column(&self, sheet: &str, row: u32) -> Option<u32> {
        self.bounds.get(sheet)?.get(&row).copied()
    }

    fn get_cell(&self, sheet: &str, coord: CellCoord) -> String {
        self.worksheet(sheet)
            .map(|ws| ws.get_value(position(coord)))
            .unwrap_or_default()
    }

    fn set_cell(
        &mut self,
        sheet: &str,
        coord: CellCoord,
        text: &str,
        format: &CellFormat,
    ) -> Result<(), GridError> {
        let ws = self.worksheet_mut(sheet)?;
        ws.get_cell_mut(position(coord)).set_value_string(text);
        apply_format(ws, coord, format);

        if text.is_empty() {
            let rescanned = scan_bounds(ws);
            self.bounds.insert(sheet.to_string(), rescanned);
        } else {
            let bounds = self.bounds.entry(sheet.to_string()).or_default();
            note_used(bounds, coord.row, coord.col);
        }
        Ok(())
    }

    fn format_cell(
        &mut self,
        sheet: &str,
        coord: CellCoord,
        format: &CellFormat,
    ) -> Result<(), GridError> {
        apply_format(self.worksheet_mut(sheet)?, coord, format);
        Ok(())
    }

    fn save(&self, path: &Path) -> Result<(), GridError> {
        writer::xlsx::write(&self.book, path).map_err(|e| GridError::Xlsx(e.to_string()))
    }
}
