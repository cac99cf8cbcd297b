//! Cell operations for one sheet while its commands are replayed.

use std::borrow::Cow;

use sheetfill_core::{CellCoord, CellFormat, VerticalAlign};
use sheetfill_script::FindMode;
use tracing::{debug, error, info, warn};

use crate::error::{FillError, GridError};
use crate::grid::Grid;
use crate::search::{find_in_column, find_in_sheet, raw_matcher, LooseMatcher};
use crate::state::Cursor;

const LOG_TEXT_LIMIT: usize = 50;

/// Counters for the commands applied to a sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandStats {
    pub writes: usize,
    pub appends: usize,
    pub finds_hit: usize,
    pub finds_missed: usize,
    /// Writes or appends aimed at an invalid cursor
    pub skipped_writes: usize,
    pub unrecognized: usize,
}

impl CommandStats {
    pub fn absorb(&mut self, other: &CommandStats) {
        self.writes += other.writes;
        self.appends += other.appends;
        self.finds_hit += other.finds_hit;
        self.finds_missed += other.finds_missed;
        self.skipped_writes += other.skipped_writes;
        self.unrecognized += other.unrecognized;
    }
}

/// Layout applied to every written or appended cell
pub fn style_hint() -> CellFormat {
    CellFormat::new()
        .with_wrap_text(true)
        .with_vertical_align(VerticalAlign::Middle)
}

/// Prefix a leading `-` with `'` so the document keeps the value as text
pub fn escape_value(value: &str) -> Cow<'_, str> {
    if value.starts_with('-') {
        Cow::Owned(format!("'{}", value))
    } else {
        Cow::Borrowed(value)
    }
}

/// Shorten text for log lines: anything 50 characters or longer is cut to 47
/// plus `...`
pub fn truncate_for_log(text: &str) -> Cow<'_, str> {
    if text.chars().count() < LOG_TEXT_LIMIT {
        return Cow::Borrowed(text);
    }
    let kept: String = text.chars().take(LOG_TEXT_LIMIT - 3).collect();
    Cow::Owned(format!("{}...", kept))
}

/// One sheet of an open document plus what the interpreter needs to know about it
pub struct SheetContext<'a> {
    grid: &'a mut dyn Grid,
    sheet: &'a str,
    fill_columns: &'a [String],
    header: Vec<String>,
    last_row: Option<u32>,
    stats: CommandStats,
}

impl<'a> SheetContext<'a> {
    /// Snapshot the header row and last used row of `sheet`
    pub fn new(grid: &'a mut dyn Grid, sheet: &'a str, fill_columns: &'a [String]) -> Self {
        let header = grid.header(sheet);
        let last_row = grid.last_used_row(sheet);
        Self {
            grid,
            sheet,
            fill_columns,
            header,
            last_row,
            stats: CommandStats::default(),
        }
    }

    pub fn sheet(&self) -> &str {
        self.sheet
    }

    pub fn stats(&self) -> CommandStats {
        self.stats
    }

    pub fn is_fillable(&self, title: &str) -> bool {
        self.fill_columns.iter().any(|c| c == title)
    }

    /// Header position of `title`, or -1 when the header has no such column
    pub fn column_of(&self, title: &str) -> i64 {
        self.header
            .iter()
            .position(|t| t == title)
            .map_or(-1, |col| col as i64)
    }

    /// Title-mode find: scan the column for a loosely equal value
    pub fn find_in_column(&mut self, col: i64, value: &str) -> Cursor {
        let hit = u32::try_from(col).ok().and_then(|col| {
            find_in_column(
                &*self.grid,
                self.sheet,
                col,
                self.last_row,
                &LooseMatcher::new(value),
            )
        });
        self.found(hit, value)
    }

    /// Raw-mode find over the whole sheet
    pub fn find(&mut self, mode: FindMode, value: &str) -> Cursor {
        let matcher = raw_matcher(mode, value);
        let hit = find_in_sheet(&*self.grid, self.sheet, self.last_row, &*matcher);
        self.found(hit, value)
    }

    fn found(&mut self, hit: Option<CellCoord>, value: &str) -> Cursor {
        match hit {
            Some(coord) => {
                info!("Found '{}' at {} in {}", truncate_for_log(value), coord, self.sheet);
                self.stats.finds_hit += 1;
                Cursor::at(coord)
            }
            None => {
                let miss = FillError::CellNotFound {
                    sheet: self.sheet.to_string(),
                    value: truncate_for_log(value).into_owned(),
                };
                error!("{}", miss);
                self.stats.finds_missed += 1;
                Cursor::INVALID
            }
        }
    }

    /// Store `value` at `at`. A blank value only applies the style hint.
    pub fn write(&mut self, at: Cursor, value: &str) {
        let Some(coord) = self.target(at, value) else {
            return;
        };

        let result = if value.trim().is_empty() {
            self.grid.format_cell(self.sheet, coord, &style_hint())
        } else {
            self.grid
                .set_cell(self.sheet, coord, &escape_value(value), &style_hint())
        };

        match result {
            Ok(()) => {
                info!("Added '{}' at {} in {}", truncate_for_log(value), coord, self.sheet);
                self.stats.writes += 1;
            }
            Err(e) => error!("Failed to write {} in {}: {}", coord, self.sheet, e),
        }
    }

    /// Add `text` as a new line of the cell at `at`
    pub fn append(&mut self, at: Cursor, text: &str) {
        let Some(coord) = self.target(at, text) else {
            return;
        };

        let existing = self.grid.get_cell(self.sheet, coord);
        let content = if existing.trim().is_empty() {
            escape_value(text).into_owned()
        } else {
            format!("{}\n{}", existing, text)
        };

        match self
            .grid
            .set_cell(self.sheet, coord, &content, &style_hint())
        {
            Ok(()) => {
                info!("Appended '{}' at {} in {}", truncate_for_log(text), coord, self.sheet);
                self.stats.appends += 1;
            }
            Err(e) => error!("Failed to append at {} in {}: {}", coord, self.sheet, e),
        }
    }

    pub fn note_unrecognized(&mut self, line: &str) {
        let malformed = FillError::MalformedCommand {
            sheet: self.sheet.to_string(),
            line: truncate_for_log(line).into_owned(),
        };
        debug!("{}", malformed);
        self.stats.unrecognized += 1;
    }

    fn target(&mut self, at: Cursor, text: &str) -> Option<CellCoord> {
        match at.coord() {
            Some(coord) => Some(coord),
            None => {
                let err = GridError::InvalidCoordinate {
                    row: at.row,
                    col: at.col,
                };
                warn!("Skipping '{}' in {}: {}", truncate_for_log(text), self.sheet, err);
                self.stats.skipped_writes += 1;
                None
            }
        }
    }
}
