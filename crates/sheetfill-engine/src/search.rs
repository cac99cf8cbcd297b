use sheetfill_core::CellCoord;
use sheetfill_script::FindMode;

use crate::grid::Grid;

/// Matching strategy for a cell search
pub trait Matcher {
    fn is_match(&self, text: &str) -> bool;
}

/// Whole cell text equals the needle, case-sensitive
pub struct ExactMatcher<'a>(pub &'a str);

impl Matcher for ExactMatcher<'_> {
    fn is_match(&self, text: &str) -> bool {
        text == self.0
    }
}

/// Cell text starts with the needle, case-sensitive
pub struct PrefixMatcher<'a>(pub &'a str);

impl Matcher for PrefixMatcher<'_> {
    fn is_match(&self, text: &str) -> bool {
        text.starts_with(self.0)
    }
}

/// Trimmed cell text equals the trimmed needle, ignoring case
pub struct LooseMatcher {
    needle: String,
}

impl LooseMatcher {
    pub fn new(needle: &str) -> Self {
        Self {
            needle: needle.trim().to_lowercase(),
        }
    }
}

impl Matcher for LooseMatcher {
    fn is_match(&self, text: &str) -> bool {
        text.trim().to_lowercase() == self.needle
    }
}

/// Matcher used by a raw `cell equals:` / `cell starts:` find
pub fn raw_matcher(mode: FindMode, needle: &str) -> Box<dyn Matcher + '_> {
    match mode {
        FindMode::Equals => Box::new(ExactMatcher(needle)),
        FindMode::StartsWith => Box::new(PrefixMatcher(needle)),
    }
}

/// First matching cell of column `col`, scanning rows `1..=last_row` top to bottom.
/// The header row is never searched.
pub fn find_in_column(
    grid: &dyn Grid,
    sheet: &str,
    col: u32,
    last_row: Option<u32>,
    matcher: &dyn Matcher,
) -> Option<CellCoord> {
    let last_row = last_row?;
    (1..=last_row)
        .map(|row| CellCoord::new(row, col))
        .find(|&coord| matcher.is_match(&grid.get_cell(sheet, coord)))
}

/// First matching cell in row-major order over rows `0..=last_row`, each row
/// up to its own last used column.
pub fn find_in_sheet(
    grid: &dyn Grid,
    sheet: &str,
    last_row: Option<u32>,
    matcher: &dyn Matcher,
) -> Option<CellCoord> {
    let last_row = last_row?;
    for row in 0..=last_row {
        let Some(last_col) = grid.last_used_column(sheet, row) else {
            continue;
        };
        for col in 0..=last_col {
            let coord = CellCoord::new(row, col);
            if matcher.is_match(&grid.get_cell(sheet, coord)) {
                return Some(coord);
            }
        }
    }
    None
}
