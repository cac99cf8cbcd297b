//! Parsing for sheetfill fill scripts.
//!
//! A fill script is a small markup file: a header naming the document to
//! open and the output to write, a `---` separator, then one `#Sheet`
//! section per worksheet holding the commands to replay against it.
//! [`Template`] is the parsed file; [`Command`] is one classified line.

pub mod command;
pub mod error;
pub mod template;

pub use command::{Command, Direction, FindMode};
pub use error::ScriptError;
pub use template::{SheetCommandSet, SheetCommands, Template};
