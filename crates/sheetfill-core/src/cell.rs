use serde::{Deserialize, Serialize};

use crate::format::CellFormat;

/// Value held by a cell
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// The text a reader of the sheet sees; whole numbers print without a fraction
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Boolean(true) => "TRUE".to_string(),
            CellValue::Boolean(false) => "FALSE".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub value: CellValue,
    #[serde(default)]
    pub format: CellFormat,
}

impl Cell {
    pub fn new(value: CellValue) -> Self {
        Cell {
            value,
            format: CellFormat::default(),
        }
    }

    pub fn number(value: f64) -> Self {
        Cell::new(CellValue::Number(value))
    }

    pub fn text(value: impl Into<String>) -> Self {
        Cell::new(CellValue::Text(value.into()))
    }

    /// No value and no formatting: nothing worth storing
    pub fn is_empty(&self) -> bool {
        self.value.is_empty() && self.format == CellFormat::default()
    }
}
