//! Fill-script parser.
//!
//! ```text
//! file: plan.xlsx
//! output: plan-filled.xlsx
//! params: use-title
//! fill: Notes, Status
//! ---
//! #Goals
//! Goal: Learn Rust
//! Notes: read the book
//! keep practising
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ScriptError;

/// Line that separates the header from the sheet sections
pub const HEADER_END: &str = "---";
/// Everything after this marker on a line is ignored
pub const INLINE_COMMENT: &str = "#comment";
/// Flag in `params:` that switches the script to title mode
pub const USE_TITLE_PARAM: &str = "use-title";

/// Raw command lines collected for one sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetCommands {
    pub name: String,
    pub lines: Vec<String>,
}

/// Sheet name → command lines, in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetCommandSet {
    entries: Vec<SheetCommands>,
}

impl SheetCommandSet {
    /// Store the lines of a finished section. A name seen before keeps its
    /// position but takes the new lines.
    pub fn commit(&mut self, name: String, lines: Vec<String>) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => existing.lines = lines,
            None => self.entries.push(SheetCommands { name, lines }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.lines.as_slice())
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SheetCommands> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A parsed fill script: where to read, where to write, and what to do per sheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    /// Document to fill. Empty when the script has no `file:` line.
    pub source: PathBuf,
    /// Where the filled document is written
    pub output: PathBuf,
    /// Address columns by header title instead of searching cells
    pub use_title: bool,
    /// Every flag listed in `params:`, lower-cased
    pub params: Vec<String>,
    /// Column titles that are written to rather than searched
    pub fill_columns: Vec<String>,
    pub sheets: SheetCommandSet,
}

impl Template {
    /// Read and parse a script file.
    ///
    /// A relative source that doesn't exist as given is looked up next to the
    /// script. The output path is kept as written.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ScriptError::NotFound(path.to_path_buf()));
        }

        let text = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut template = Self::parse(&text);
        if let Some(base) = path.parent() {
            template.resolve_paths(base);
        }
        Ok(template)
    }

    /// Parse script text. Never fails: unknown lines are kept for the
    /// interpreter or dropped.
    pub fn parse(text: &str) -> Self {
        let mut parser = TemplateParser::default();
        for line in text.lines() {
            parser.feed(line);
        }
        parser.finish()
    }

    /// Whether `title` is declared in `fill:`
    pub fn is_fillable(&self, title: &str) -> bool {
        self.fill_columns.iter().any(|c| c == title)
    }

    fn resolve_paths(&mut self, base: &Path) {
        if !self.source.as_os_str().is_empty() && self.source.is_relative() && !self.source.exists()
        {
            let resolved = base.join(&self.source);
            debug!(
                "resolved {} relative to script: {}",
                self.source.display(),
                resolved.display()
            );
            self.source = resolved;
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Region {
    #[default]
    Header,
    Body,
}

/// Line-at-a-time builder behind [`Template::parse`]
#[derive(Debug, Default)]
struct TemplateParser {
    template: Template,
    region: Region,
    current: Option<SheetCommands>,
}

impl TemplateParser {
    fn feed(&mut self, raw: &str) {
        let line = strip_inline_comment(raw).trim();
        if line.is_empty() {
            return;
        }

        if let Some(marker) = sheet_marker(line) {
            self.region = Region::Body;
            self.commit_current();
            match marker {
                Some(name) => {
                    self.current = Some(SheetCommands {
                        name: name.to_string(),
                        lines: Vec::new(),
                    })
                }
                None => debug!("ignoring sheet marker without a name"),
            }
            return;
        }

        match self.region {
            Region::Header => self.header_line(line),
            Region::Body => match self.current.as_mut() {
                Some(section) => section.lines.push(line.to_string()),
                None => debug!("dropping line outside any sheet: {}", line),
            },
        }
    }

    fn header_line(&mut self, line: &str) {
        if line == HEADER_END {
            self.region = Region::Body;
        } else if let Some(path) = line.strip_prefix("file:") {
            self.template.source = PathBuf::from(path.trim());
        } else if let Some(path) = line.strip_prefix("output:") {
            self.template.output = PathBuf::from(path.trim());
        } else if let Some(params) = line.strip_prefix("params:") {
            let params = split_list(&params.to_lowercase());
            if params.iter().any(|p| p == USE_TITLE_PARAM) {
                self.template.use_title = true;
            }
            for unknown in params.iter().filter(|p| *p != USE_TITLE_PARAM) {
                debug!("unrecognized param: {}", unknown);
            }
            self.template.params = params;
        } else if let Some(columns) = line.strip_prefix("fill:") {
            self.template.fill_columns = split_list(columns);
        } else {
            debug!("ignoring header line: {}", line);
        }
    }

    fn commit_current(&mut self) {
        if let Some(section) = self.current.take() {
            self.template.sheets.commit(section.name, section.lines);
        }
    }

    fn finish(mut self) -> Template {
        self.commit_current();
        self.template
    }
}

fn strip_inline_comment(line: &str) -> &str {
    match line.find(INLINE_COMMENT) {
        Some(at) => &line[..at],
        None => line,
    }
}

/// `Some(Some(name))` for `#name`, `Some(None)` for a bare `#`, `None` otherwise
fn sheet_marker(line: &str) -> Option<Option<&str>> {
    let name = line.strip_prefix('#')?.trim_start_matches('#').trim();
    Some((!name.is_empty()).then_some(name))
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
