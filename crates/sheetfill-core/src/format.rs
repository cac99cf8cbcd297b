use serde::{Deserialize, Serialize};

/// Vertical text alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    Middle,
    #[default]
    Bottom,
}

/// Cell formatting properties.
///
/// Only the layout hints a fill script can request are modelled; anything
/// richer stays in the underlying document untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellFormat {
    #[serde(default, skip_serializing_if = "is_false")]
    pub wrap_text: bool,
    #[serde(default, skip_serializing_if = "is_default_v_align")]
    pub vertical_align: VerticalAlign,
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn is_default_v_align(a: &VerticalAlign) -> bool {
    *a == VerticalAlign::default()
}

impl CellFormat {
    /// Create a new format with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: set text wrapping
    pub fn with_wrap_text(mut self, wrap: bool) -> Self {
        self.wrap_text = wrap;
        self
    }

    /// Builder pattern: set vertical alignment
    pub fn with_vertical_align(mut self, align: VerticalAlign) -> Self {
        self.vertical_align = align;
        self
    }

    /// Merge another format into this one (other's values override)
    pub fn merge(&mut self, other: &CellFormat) {
        if other.wrap_text {
            self.wrap_text = true;
        }
        if other.vertical_align != VerticalAlign::default() {
            self.vertical_align = other.vertical_align;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_builder() {
        let format = CellFormat::new()
            .with_wrap_text(true)
            .with_vertical_align(VerticalAlign::Middle);

        assert!(format.wrap_text);
        assert_eq!(format.vertical_align, VerticalAlign::Middle);
    }

    #[test]
    fn test_merge_keeps_existing_hints() {
        let mut format = CellFormat::new().with_vertical_align(VerticalAlign::Top);
        format.merge(&CellFormat::new().with_wrap_text(true));

        assert!(format.wrap_text);
        assert_eq!(format.vertical_align, VerticalAlign::Top);
    }

    #[test]
    fn test_default_format_serializes_empty() {
        let json = serde_json::to_string(&CellFormat::default()).unwrap();
        assert_eq!(json, "{}");
    }
}
