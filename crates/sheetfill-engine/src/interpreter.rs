use std::path::Path;

use sheetfill_script::{Command, Template};
use tracing::{error, info};

use crate::context::{CommandStats, SheetContext};
use crate::error::{FillError, GridError};
use crate::grid::Grid;
use crate::state::{dispatch, CursorState};

/// What happened while a template was applied to a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub sheets_processed: usize,
    /// Sections naming a sheet the document doesn't have
    pub sheets_missing: Vec<String>,
    pub commands: CommandStats,
    pub saved: bool,
}

/// Replays a parsed template against an open document
pub struct Interpreter<'t> {
    template: &'t Template,
}

impl<'t> Interpreter<'t> {
    pub fn new(template: &'t Template) -> Self {
        Self { template }
    }

    /// Run every sheet section, then save to the template's output path.
    /// A failed save is logged and reported, never returned.
    pub fn apply(&self, grid: &mut dyn Grid) -> ApplyReport {
        let mut report = self.run(grid);
        report.saved = self.save(grid);
        report
    }

    /// Run every sheet section without saving
    pub fn run(&self, grid: &mut dyn Grid) -> ApplyReport {
        let mut report = ApplyReport::default();

        for section in self.template.sheets.iter() {
            if !grid.has_sheet(&section.name) {
                error!("{}", GridError::SheetNotFound(section.name.clone()));
                report.sheets_missing.push(section.name.clone());
                continue;
            }

            let stats = self.run_sheet(grid, &section.name, &section.lines);
            report.commands.absorb(&stats);
            report.sheets_processed += 1;
        }

        report
    }

    /// Replay the lines of one sheet from a fresh cursor
    pub fn run_sheet(&self, grid: &mut dyn Grid, sheet: &str, lines: &[String]) -> CommandStats {
        info!("Filling sheet {}", sheet);
        let mut ctx = SheetContext::new(grid, sheet, &self.template.fill_columns);

        let mut state = CursorState::default();
        for line in lines {
            let command = Command::classify(line, self.template.use_title);
            state = dispatch(state, &command, &mut ctx);
        }

        ctx.stats()
    }

    fn save(&self, grid: &dyn Grid) -> bool {
        let output = self.template.output.as_path();
        if output.as_os_str().is_empty() {
            error!("No output path given; document not saved");
            return false;
        }

        match grid.save(output) {
            Ok(()) => {
                info!("Saved {}", output.display());
                true
            }
            Err(source) => {
                error!("{}", save_failure(output, source));
                false
            }
        }
    }
}

fn save_failure(path: &Path, source: GridError) -> FillError {
    FillError::SaveFailure {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::JsonGrid;
    use sheetfill_core::{CellCoord, Sheet, Workbook};

    fn grid() -> JsonGrid {
        let mut plan = Sheet::with_header("Plan", ["Goal", "Notes"]);
        plan.set_cell_text(CellCoord::new(1, 0), "Learn Rust");
        let mut raw = Sheet::new("Raw");
        raw.set_cell_text(CellCoord::new(0, 0), "Total");
        JsonGrid::from_workbook(Workbook::with_sheets("b", vec![plan, raw]))
    }

    #[test]
    fn test_missing_sheet_is_skipped() {
        let template = Template::parse(
            "params: use-title\nfill: Notes\n---\n#Ghost\nGoal: x\n#Plan\nGoal: learn rust\nNotes: daily\n",
        );
        let mut grid = grid();
        let report = Interpreter::new(&template).run(&mut grid);

        assert_eq!(report.sheets_missing, vec!["Ghost"]);
        assert_eq!(report.sheets_processed, 1);
        assert_eq!(report.commands.finds_hit, 1);
        assert_eq!(report.commands.writes, 1);
        assert_eq!(grid.get_cell("Plan", CellCoord::new(1, 1)), "daily");
    }

    #[test]
    fn test_cursor_resets_between_sheets() {
        let template = Template::parse(
            "---\n#Raw\ncell equals:Total\nadd-r:1\n#Plan\nadd-r:leak\n",
        );
        let mut grid = grid();
        let report = Interpreter::new(&template).run(&mut grid);

        assert_eq!(grid.get_cell("Raw", CellCoord::new(0, 1)), "1");
        assert_eq!(report.commands.skipped_writes, 1);
        assert_eq!(grid.get_cell("Plan", CellCoord::new(0, 1)), "Notes");
    }

    #[test]
    fn test_apply_without_output_does_not_save() {
        let template = Template::parse("---\n#Plan\n");
        let mut grid = grid();
        let report = Interpreter::new(&template).apply(&mut grid);
        assert!(!report.saved);
    }

    #[test]
    fn test_save_failure_is_reported_not_raised() {
        let template = Template::parse("output: /no/such/dir/out.json\n---\n#Plan\n");
        let mut grid = grid();
        let report = Interpreter::new(&template).apply(&mut grid);
        assert!(!report.saved);
        assert_eq!(report.sheets_processed, 1);
    }

    #[test]
    fn test_apply_saves_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.json");
        let mut template = Template::parse("---\n#Raw\ncell starts:Tot\nadd-b:-3\n");
        template.output = output.clone();

        let mut grid = grid();
        let report = Interpreter::new(&template).apply(&mut grid);

        assert!(report.saved);
        let saved = JsonGrid::open(&output).unwrap();
        assert_eq!(saved.get_cell("Raw", CellCoord::new(1, 0)), "'-3");
    }
}
