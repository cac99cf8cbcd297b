use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::cell::{Cell, CellValue};
use crate::coord::CellCoord;
use crate::format::CellFormat;

/// A single named sheet with sparse, row-major cell storage.
///
/// Row 0 is the header row when the sheet is used as a titled table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet name (displayed in tab)
    pub name: String,
    /// Only non-empty cells are stored, keyed by (row, col)
    #[serde(default, with = "cell_map_serde")]
    cells: BTreeMap<(u32, u32), Cell>,
}

/// Serializes the cell map with stringified "row,col" keys for JSON compatibility
mod cell_map_serde {
    use super::*;
    use serde::ser::SerializeMap;
    use serde::{de, Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(cells: &BTreeMap<(u32, u32), Cell>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(cells.len()))?;
        for ((row, col), cell) in cells {
            let key = format!("{},{}", row, col);
            map.serialize_entry(&key, cell)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<(u32, u32), Cell>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CellMapVisitor;

        impl<'de> de::Visitor<'de> for CellMapVisitor {
            type Value = BTreeMap<(u32, u32), Cell>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map with \"row,col\" keys")
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: de::MapAccess<'de>,
            {
                let mut cells = BTreeMap::new();

                while let Some(key) = map.next_key::<String>()? {
                    let cell: Cell = map.next_value()?;

                    let (row, col) = key
                        .split_once(',')
                        .and_then(|(r, c)| Some((r.trim().parse::<u32>().ok()?, c.trim().parse::<u32>().ok()?)))
                        .ok_or_else(|| de::Error::custom(format!("invalid cell key '{}'", key)))?;

                    if !cell.is_empty() {
                        cells.insert((row, col), cell);
                    }
                }

                Ok(cells)
            }
        }

        deserializer.deserialize_map(CellMapVisitor)
    }
}

impl Sheet {
    /// Create a new empty sheet with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
        }
    }

    /// Create a sheet whose first row holds the given titles
    pub fn with_header<I, S>(name: impl Into<String>, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut sheet = Self::new(name);
        for (col, title) in titles.into_iter().enumerate() {
            sheet.set_cell(CellCoord::new(0, col as u32), Cell::text(title));
        }
        sheet
    }

    /// Get a reference to a cell at the given coordinate
    pub fn get_cell(&self, coord: CellCoord) -> Option<&Cell> {
        self.cells.get(&(coord.row, coord.col))
    }

    /// Get a mutable reference to a cell, creating it if it doesn't exist
    pub fn get_cell_mut(&mut self, coord: CellCoord) -> &mut Cell {
        self.cells.entry((coord.row, coord.col)).or_default()
    }

    /// Set a cell at the given coordinate
    pub fn set_cell(&mut self, coord: CellCoord, cell: Cell) {
        if cell.is_empty() {
            self.cells.remove(&(coord.row, coord.col));
        } else {
            self.cells.insert((coord.row, coord.col), cell);
        }
    }

    /// Store text verbatim in a cell, keeping its existing format
    pub fn set_cell_text(&mut self, coord: CellCoord, text: &str) {
        let cell = self.get_cell_mut(coord);
        cell.value = if text.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(text.to_string())
        };

        if cell.is_empty() {
            self.cells.remove(&(coord.row, coord.col));
        }
    }

    /// Merge layout hints into a cell's format
    pub fn apply_format(&mut self, coord: CellCoord, format: &CellFormat) {
        let cell = self.get_cell_mut(coord);
        cell.format.merge(format);

        if cell.is_empty() {
            self.cells.remove(&(coord.row, coord.col));
        }
    }

    /// Get the value of a cell (returns Empty for non-existent cells)
    pub fn get_cell_value(&self, coord: CellCoord) -> &CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        self.get_cell(coord).map(|c| &c.value).unwrap_or(EMPTY)
    }

    /// Get the displayed text of a cell
    pub fn get_text(&self, coord: CellCoord) -> String {
        self.get_cell_value(coord).as_text()
    }

    /// Titles of the header row, one entry per column up to the last used one
    pub fn header(&self) -> Vec<String> {
        match self.last_used_col(0) {
            Some(last) => (0..=last)
                .map(|col| self.get_text(CellCoord::new(0, col)))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Highest row index holding a value
    pub fn last_used_row(&self) -> Option<u32> {
        self.cells
            .iter()
            .rev()
            .find(|(_, cell)| !cell.value.is_empty())
            .map(|((row, _), _)| *row)
    }

    /// Highest column index holding a value in the given row
    pub fn last_used_col(&self, row: u32) -> Option<u32> {
        self.cells
            .range((row, 0)..=(row, u32::MAX))
            .rev()
            .find(|(_, cell)| !cell.value.is_empty())
            .map(|((_, col), _)| *col)
    }

    /// Number of stored cells, format-only ones included
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if the sheet is empty
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
