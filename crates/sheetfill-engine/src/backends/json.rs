use std::fs;
use std::path::Path;

use sheetfill_core::{CellCoord, CellFormat, Sheet, Workbook};

use crate::error::GridError;
use crate::grid::Grid;

/// A workbook kept in memory and persisted as pretty-printed JSON
#[derive(Debug, Clone)]
pub struct JsonGrid {
    workbook: Workbook,
}

impl JsonGrid {
    pub fn from_workbook(workbook: Workbook) -> Self {
        Self { workbook }
    }

    pub fn open(path: &Path) -> Result<Self, GridError> {
        let json = fs::read_to_string(path).map_err(|source| GridError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_workbook(Workbook::from_json(&json)?))
    }

    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    pub fn into_workbook(self) -> Workbook {
        self.workbook
    }

    fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.workbook.get_sheet_by_name(name)
    }

    fn sheet_mut(&mut self, name: &str) -> Result<&mut Sheet, GridError> {
        self.workbook
            .get_sheet_by_name_mut(name)
            .ok_or_else(|| GridError::SheetNotFound(name.to_string()))
    }
}

impl Grid for JsonGrid {
    fn sheet_names(&self) -> Vec<String> {
        self.workbook
            .sheet_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn has_sheet(&self, sheet: &str) -> bool {
        self.sheet(sheet).is_some()
    }

    fn header(&self, sheet: &str) -> Vec<String> {
        self.sheet(sheet).map(Sheet::header).unwrap_or_default()
    }

    fn last_used_row(&self, sheet: &str) -> Option<u32> {
        self.sheet(sheet)?.last_used_row()
    }

    fn last_used_column(&self, sheet: &str, row: u32) -> Option<u32> {
        self.sheet(sheet)?.last_used_col(row)
    }

    fn get_cell(&self, sheet: &str, coord: CellCoord) -> String {
        self.sheet(sheet)
            .map(|s| s.get_text(coord))
            .unwrap_or_default()
    }

    fn set_cell(
        &mut self,
        sheet: &str,
        coord: CellCoord,
        text: &str,
        format: &CellFormat,
    ) -> Result<(), GridError> {
        let sheet = self.sheet_mut(sheet)?;
        sheet.set_cell_text(coord, text);
        sheet.apply_format(coord, format);
        Ok(())
    }

    fn format_cell(
        &mut self,
        sheet: &str,
        coord: CellCoord,
        format: &CellFormat,
    ) -> Result<(), GridError> {
        self.sheet_mut(sheet)?.apply_format(coord, format);
        Ok(())
    }

    fn save(&self, path: &Path) -> Result<(), GridError> {
        let json = self.workbook.to_json_pretty()?;
        fs::write(path, json).map_err(|source| GridError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetfill_core::{CellValue, VerticalAlign};

    fn grid() -> JsonGrid {
        let mut sheet = Sheet::with_header("Plan", ["Goal", "Notes"]);
        sheet.set_cell_text(CellCoord::new(1, 0), "Learn Rust");
        JsonGrid::from_workbook(Workbook::with_sheets("plan", vec![sheet]))
    }

    #[test]
    fn test_reads() {
        let grid = grid();
        assert!(grid.has_sheet("Plan"));
        assert!(!grid.has_sheet("Other"));
        assert_eq!(grid.header("Plan"), vec!["Goal", "Notes"]);
        assert_eq!(grid.last_used_row("Plan"), Some(1));
        assert_eq!(grid.last_used_column("Plan", 1), Some(0));
        assert_eq!(grid.get_cell("Plan", CellCoord::new(1, 0)), "Learn Rust");
        assert_eq!(grid.get_cell("Other", CellCoord::new(0, 0)), "");
        assert!(grid.header("Other").is_empty());
    }

    #[test]
    fn test_set_cell_stores_text_and_format() {
        let mut grid = grid();
        let format = CellFormat::new()
            .with_wrap_text(true)
            .with_vertical_align(VerticalAlign::Middle);
        grid.set_cell("Plan", CellCoord::new(1, 1), "-5", &format).unwrap();

        let cell = grid
            .workbook()
            .get_sheet_by_name("Plan")
            .unwrap()
            .get_cell(CellCoord::new(1, 1))
            .unwrap()
            .clone();
        assert_eq!(cell.value, CellValue::Text("-5".to_string()));
        assert_eq!(cell.format, format);
    }

    #[test]
    fn test_write_to_missing_sheet() {
        let mut grid = grid();
        let err = grid
            .set_cell("Nope", CellCoord::new(0, 0), "x", &CellFormat::default())
            .unwrap_err();
        assert!(matches!(err, GridError::SheetNotFound(name) if name == "Nope"));
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        grid().save(&path).unwrap();

        let reopened = JsonGrid::open(&path).unwrap();
        assert_eq!(reopened.get_cell("Plan", CellCoord::new(1, 0)), "Learn Rust");
    }

    #[test]
    fn test_open_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(JsonGrid::open(&path), Err(GridError::Json(_))));
    }
}
