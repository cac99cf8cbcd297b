//! Command-line classification.
//!
//! Turns one raw script line into a typed [`Command`]. Which commands are
//! recognized depends on whether the script addresses columns by title
//! (`params: use-title`) or searches cells directly.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till1},
    character::complete::char,
    combinator::{map, rest, value, verify},
    sequence::{preceded, separated_pair, terminated},
    IResult,
};

/// How a raw find compares cell text with the search value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindMode {
    /// Whole cell text must equal the value (case-sensitive)
    Equals,
    /// Cell text must start with the value (case-sensitive)
    StartsWith,
}

/// Direction of a relative `add-X` move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Left,
    Down,
    Up,
}

impl Direction {
    /// The script token that selects this direction
    pub fn token(self) -> &'static str {
        match self {
            Direction::Right => "add-r",
            Direction::Left => "add-l",
            Direction::Down => "add-b",
            Direction::Up => "add-t",
        }
    }

    /// (row, col) step for one move
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::Right => (0, 1),
            Direction::Left => (0, -1),
            Direction::Down => (1, 0),
            Direction::Up => (-1, 0),
        }
    }
}

/// A classified script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `// ...`
    Comment,
    /// `title:value` in title mode; a fill or a find depending on the title
    TitleAssign { title: String, value: String },
    /// `cell equals:value` / `cell starts:value`
    RawFind { mode: FindMode, value: String },
    /// `add-{r,l,b,t}:value`
    Move { direction: Direction, value: String },
    /// Plain text appended under the active command
    Continuation(String),
    /// `add-` line with an unknown direction or no value; ends the active move
    BadMove(String),
    /// Looks like a raw command but matches none of the known forms
    Unrecognized(String),
}

impl Command {
    /// Classify a single line. The line is trimmed first.
    pub fn classify(line: &str, use_title: bool) -> Command {
        let line = line.trim();

        if parse_comment(line).is_ok() {
            return Command::Comment;
        }

        if use_title {
            return match parse_title_assign(line) {
                Ok((_, command)) => command,
                Err(_) => Command::Continuation(line.to_string()),
            };
        }

        if let Ok((_, command)) = alt((parse_raw_find, parse_move))(line) {
            return command;
        }

        if line.starts_with("add-") {
            Command::BadMove(line.to_string())
        } else if line.starts_with("cell") {
            Command::Unrecognized(line.to_string())
        } else {
            Command::Continuation(line.to_string())
        }
    }

    /// True for plain text that attaches to the active command
    pub fn is_continuation(&self) -> bool {
        matches!(self, Command::Continuation(_))
    }
}

fn parse_comment(input: &str) -> IResult<&str, &str> {
    preceded(tag("//"), rest)(input)
}

fn parse_title_assign(input: &str) -> IResult<&str, Command> {
    map(
        separated_pair(
            verify(take_till1(|c: char| c == ':'), |title: &str| !title.trim().is_empty()),
            char(':'),
            rest,
        ),
        |(title, value): (&str, &str)| Command::TitleAssign {
            title: title.trim().to_string(),
            value: value.trim().to_string(),
        },
    )(input)
}

fn parse_raw_find(input: &str) -> IResult<&str, Command> {
    map(
        separated_pair(
            alt((
                value(FindMode::Equals, tag("cell equals")),
                value(FindMode::StartsWith, tag("cell starts")),
            )),
            char(':'),
            rest,
        ),
        |(mode, value): (FindMode, &str)| Command::RawFind {
            mode,
            value: value.trim().to_string(),
        },
    )(input)
}

fn parse_move(input: &str) -> IResult<&str, Command> {
    let (input, direction) = terminated(
        preceded(
            tag("add-"),
            alt((
                value(Direction::Right, char('r')),
                value(Direction::Left, char('l')),
                value(Direction::Down, char('b')),
                value(Direction::Up, char('t')),
            )),
        ),
        char(':'),
    )(input)?;
    let (input, value) = verify(rest, |v: &str| !v.trim().is_empty())(input)?;

    Ok((
        input,
        Command::Move {
            direction,
            value: value.trim().to_string(),
        },
    ))
}
