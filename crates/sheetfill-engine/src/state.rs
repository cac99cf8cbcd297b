//! Cursor state machine.
//!
//! Each classified line moves the sheet from one [`CursorState`] to the next
//! through [`dispatch`]. All document access goes through the
//! [`SheetContext`], so the transitions can be exercised against an
//! in-memory grid.

use std::fmt;

use sheetfill_core::CellCoord;
use sheetfill_script::{Command, Direction};
use tracing::debug;

use crate::context::{truncate_for_log, SheetContext};

/// Signed (row, col) focus. Any negative component means "no cell".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub row: i64,
    pub col: i64,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.coord() {
            Some(coord) => write!(f, "{}", coord),
            None => write!(f, "({}, {})", self.row, self.col),
        }
    }
}

impl Cursor {
    pub const INVALID: Cursor = Cursor { row: -1, col: -1 };

    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    pub fn at(coord: CellCoord) -> Self {
        Self::new(coord.row as i64, coord.col as i64)
    }

    pub fn is_valid(&self) -> bool {
        self.row >= 0 && self.col >= 0
    }

    pub fn coord(&self) -> Option<CellCoord> {
        CellCoord::from_signed(self.row, self.col)
    }

    /// Same row, another column
    pub fn with_col(self, col: i64) -> Self {
        Self::new(self.row, col)
    }

    /// One cell in `direction`. An invalid cursor stays invalid until a find
    /// places it again.
    pub fn step(self, direction: Direction) -> Self {
        if !self.is_valid() {
            return Self::INVALID;
        }
        let (dr, dc) = direction.delta();
        Self::new(self.row + dr, self.col + dc)
    }
}

/// The command that plain continuation lines attach to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ActiveCommand {
    #[default]
    Idle,
    /// Last fill in title mode, by column title
    Fill(String),
    /// Last `add-X` move in raw mode
    Move(Direction),
}

impl ActiveCommand {
    pub fn is_idle(&self) -> bool {
        matches!(self, ActiveCommand::Idle)
    }

    /// Title or `add-X` token, as written in the script
    pub fn name(&self) -> Option<&str> {
        match self {
            ActiveCommand::Idle => None,
            ActiveCommand::Fill(title) => Some(title),
            ActiveCommand::Move(direction) => Some(direction.token()),
        }
    }
}

/// Interpreter state between two lines of a sheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorState {
    pub cursor: Cursor,
    pub active: ActiveCommand,
}

impl CursorState {
    pub fn new(cursor: Cursor, active: ActiveCommand) -> Self {
        Self { cursor, active }
    }
}

/// Apply one command and return the state for the next line.
///
/// Finds relocate the cursor but leave the active command alone; fills and
/// moves make themselves active.
pub fn dispatch(state: CursorState, command: &Command, ctx: &mut SheetContext<'_>) -> CursorState {
    match command {
        Command::Comment => state,

        Command::TitleAssign { title, value } => {
            let col = ctx.column_of(title);
            if ctx.is_fillable(title) {
                ctx.write(state.cursor.with_col(col), value);
                CursorState::new(state.cursor, ActiveCommand::Fill(title.clone()))
            } else {
                let cursor = ctx.find_in_column(col, value);
                CursorState { cursor, ..state }
            }
        }

        Command::RawFind { mode, value } => {
            let cursor = ctx.find(*mode, value);
            CursorState { cursor, ..state }
        }

        Command::Move { direction, value } => {
            let cursor = state.cursor.step(*direction);
            ctx.write(cursor, value);
            CursorState::new(cursor, ActiveCommand::Move(*direction))
        }

        Command::Continuation(text) => {
            match &state.active {
                ActiveCommand::Fill(title) => {
                    let col = ctx.column_of(title);
                    ctx.append(state.cursor.with_col(col), text);
                }
                ActiveCommand::Move(_) => ctx.append(state.cursor, text),
                ActiveCommand::Idle => {
                    debug!("dropping '{}' in {}: no active command", truncate_for_log(text), ctx.sheet())
                }
            }
            state
        }

        Command::BadMove(line) => {
            ctx.note_unrecognized(line);
            CursorState {
                active: ActiveCommand::Idle,
                ..state
            }
        }

        Command::Unrecognized(line) => {
            ctx.note_unrecognized(line);
            state
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::JsonGrid;
    use crate::grid::Grid;
    use sheetfill_core::{Sheet, Workbook};
    use sheetfill_script::FindMode;

    fn titled_grid() -> JsonGrid {
        let mut sheet = Sheet::with_header("S", ["Name", "Notes", "Status"]);
        sheet.set_cell_text(CellCoord::new(1, 0), "Alice");
        sheet.set_cell_text(CellCoord::new(2, 0), "Bob");
        JsonGrid::from_workbook(Workbook::with_sheets("b", vec![sheet]))
    }

    fn run(grid: &mut JsonGrid, fill: &[String], lines: &[Command]) -> CursorState {
        let mut ctx = SheetContext::new(grid, "S", fill);
        lines
            .iter()
            .fold(CursorState::default(), |state, command| dispatch(state, command, &mut ctx))
    }

    fn assign(title: &str, value: &str) -> Command {
        Command::TitleAssign {
            title: title.to_string(),
            value: value.to_string(),
        }
    }

    fn text(grid: &JsonGrid, row: u32, col: u32) -> String {
        grid.get_cell("S", CellCoord::new(row, col))
    }

    #[test]
    fn test_cursor_step() {
        let origin = Cursor::new(3, 3);
        assert_eq!(origin.step(Direction::Right), Cursor::new(3, 4));
        assert_eq!(origin.step(Direction::Left), Cursor::new(3, 2));
        assert_eq!(origin.step(Direction::Down), Cursor::new(4, 3));
        assert_eq!(origin.step(Direction::Up), Cursor::new(2, 3));
    }

    #[test]
    fn test_invalid_cursor_stays_invalid() {
        let lost = Cursor::INVALID.step(Direction::Down).step(Direction::Right);
        assert!(!lost.is_valid());
        assert_eq!(lost.coord(), None);

        let edge = Cursor::new(0, 0).step(Direction::Up);
        assert!(!edge.is_valid());
        assert!(!edge.step(Direction::Down).is_valid());
    }

    #[test]
    fn test_title_find_then_fill() {
        let mut grid = titled_grid();
        let fill = vec!["Notes".to_string()];
        let state = run(&mut grid, &fill, &[assign("Name", " bob "), assign("Notes", "likes tea")]);

        assert_eq!(state.cursor, Cursor::new(2, 0));
        assert_eq!(state.active, ActiveCommand::Fill("Notes".to_string()));
        assert_eq!(text(&grid, 2, 1), "likes tea");
    }

    #[test]
    fn test_title_find_miss_invalidates_cursor() {
        let mut grid = titled_grid();
        let fill = vec!["Notes".to_string()];
        let state = run(
            &mut grid,
            &fill,
            &[assign("Name", "Alice"), assign("Name", "Carol"), assign("Notes", "x")],
        );

        assert_eq!(state.cursor, Cursor::INVALID);
        assert_eq!(text(&grid, 1, 1), "");
        assert_eq!(grid.workbook().sheets[0].cell_count(), 5);
    }

    #[test]
    fn test_fill_of_unknown_title_is_skipped() {
        let mut grid = titled_grid();
        let fill = vec!["Missing".to_string()];
        run(&mut grid, &fill, &[assign("Name", "Alice"), assign("Missing", "x")]);
        assert_eq!(grid.workbook().sheets[0].cell_count(), 5);
    }

    #[test]
    fn test_title_continuation_appends() {
        let mut grid = titled_grid();
        let fill = vec!["Notes".to_string()];
        run(
            &mut grid,
            &fill,
            &[
                assign("Name", "Alice"),
                assign("Notes", "line1"),
                Command::Continuation("line2".to_string()),
                Command::Continuation("line3".to_string()),
            ],
        );
        assert_eq!(text(&grid, 1, 1), "line1\nline2\nline3");
    }

    #[test]
    fn test_find_keeps_active_fill() {
        let mut grid = titled_grid();
        let fill = vec!["Notes".to_string()];
        let state = run(
            &mut grid,
            &fill,
            &[
                assign("Name", "Alice"),
                assign("Notes", "first"),
                assign("Name", "Bob"),
                Command::Continuation("more".to_string()),
            ],
        );
        assert_eq!(state.active, ActiveCommand::Fill("Notes".to_string()));
        assert_eq!(text(&grid, 2, 1), "more");
    }

    #[test]
    fn test_moves_land_on_adjacent_cells() {
        let mut sheet = Sheet::new("S");
        sheet.set_cell_text(CellCoord::new(2, 2), "Origin");
        let mut grid = JsonGrid::from_workbook(Workbook::with_sheets("b", vec![sheet]));

        let mv = |direction, value: &str| Command::Move {
            direction,
            value: value.to_string(),
        };
        let state = run(
            &mut grid,
            &[],
            &[
                Command::RawFind {
                    mode: FindMode::Equals,
                    value: "Origin".to_string(),
                },
                mv(Direction::Right, "r"),
                mv(Direction::Down, "b"),
                mv(Direction::Left, "l"),
                mv(Direction::Up, "t"),
            ],
        );

        assert_eq!(text(&grid, 2, 3), "r");
        assert_eq!(text(&grid, 3, 3), "b");
        assert_eq!(text(&grid, 3, 2), "l");
        assert_eq!(text(&grid, 2, 2), "t");
        assert_eq!(state.cursor, Cursor::new(2, 2));
        assert_eq!(state.active, ActiveCommand::Move(Direction::Up));
    }

    #[test]
    fn test_idle_continuation_and_unrecognized_change_nothing() {
        let mut grid = titled_grid();
        let state = run(
            &mut grid,
            &[],
            &[
                Command::Continuation("stray".to_string()),
                Command::Unrecognized("cell contains:1".to_string()),
                Command::Comment,
            ],
        );
        assert_eq!(state, CursorState::default());
        assert_eq!(grid.workbook().sheets[0].cell_count(), 5);
    }

    #[test]
    fn test_bad_move_ends_active_move() {
        let mut sheet = Sheet::new("S");
        sheet.set_cell_text(CellCoord::new(0, 0), "Anchor");
        let mut grid = JsonGrid::from_workbook(Workbook::with_sheets("b", vec![sheet]));

        for bad in ["add-x:bogus", "add-r:"] {
            let lines: Vec<Command> = ["cell equals:Anchor", "add-r:one", bad, "stray"]
                .iter()
                .map(|line| Command::classify(line, false))
                .collect();
            let state = run(&mut grid, &[], &lines);

            assert_eq!(text(&grid, 0, 1), "one");
            assert_eq!(state.cursor, Cursor::new(0, 1));
            assert!(state.active.is_idle());
        }
    }

    #[test]
    fn test_active_command_name() {
        assert_eq!(ActiveCommand::Idle.name(), None);
        assert_eq!(ActiveCommand::Move(Direction::Left).name(), Some("add-l"));
        assert_eq!(ActiveCommand::Fill("Notes".to_string()).name(), Some("Notes"));
    }
}
