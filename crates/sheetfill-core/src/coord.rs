use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-based cell position
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    pub const fn new(row: u32, col: u32) -> Self {
        CellCoord { row, col }
    }

    /// Parse an A1 reference such as `B3`; letters are case-insensitive
    pub fn from_a1(reference: &str) -> Option<Self> {
        let reference = reference.trim();
        let split = reference.find(|c: char| c.is_ascii_digit())?;
        let (letters, digits) = reference.split_at(split);

        let col = col_from_label(letters)?;
        let row = digits.parse::<u32>().ok()?.checked_sub(1)?;
        Some(CellCoord { row, col })
    }

    pub fn to_a1(&self) -> String {
        format!("{}{}", col_to_label(self.col), u64::from(self.row) + 1)
    }

    /// Build a coordinate from signed indices; negative components have no cell
    pub fn from_signed(row: i64, col: i64) -> Option<Self> {
        let row = u32::try_from(row).ok()?;
        let col = u32::try_from(col).ok()?;
        Some(CellCoord { row, col })
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

/// Column letters for a zero-based index: 0 → `A`, 26 → `AA`
pub fn col_to_label(col: u32) -> String {
    let mut letters = Vec::new();
    let mut n = u64::from(col) + 1;
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push(char::from(b'A' + rem));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Zero-based index for column letters; `None` for anything but ASCII letters
pub fn col_from_label(label: &str) -> Option<u32> {
    if label.is_empty() {
        return None;
    }
    label
        .chars()
        .try_fold(0u32, |acc, c| {
            let digit = c.is_ascii_alphabetic().then(|| c.to_ascii_uppercase() as u32 - 'A' as u32 + 1)?;
            acc.checked_mul(26)?.checked_add(digit)
        })
        .map(|n| n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        for (col, label) in [(0, "A"), (25, "Z"), (26, "AA"), (51, "AZ"), (52, "BA"), (702, "AAA")] {
            assert_eq!(col_to_label(col), label);
            assert_eq!(col_from_label(label), Some(col));
        }
        assert_eq!(col_from_label("b"), Some(1));
        assert_eq!(col_from_label(""), None);
        assert_eq!(col_from_label("A1"), None);
    }

    #[test]
    fn test_a1_parsing() {
        assert_eq!(CellCoord::from_a1("A1"), Some(CellCoord::new(0, 0)));
        assert_eq!(CellCoord::from_a1(" c12 "), Some(CellCoord::new(11, 2)));
        assert_eq!(CellCoord::from_a1("A0"), None);
        assert_eq!(CellCoord::from_a1("12"), None);
        assert_eq!(CellCoord::from_a1("B"), None);
        assert_eq!(CellCoord::from_a1("B2x"), None);
    }

    #[test]
    fn test_display_is_a1() {
        assert_eq!(CellCoord::new(2, 27).to_string(), "AB3");
    }

    #[test]
    fn test_from_signed() {
        assert_eq!(CellCoord::from_signed(2, 3), Some(CellCoord::new(2, 3)));
        assert_eq!(CellCoord::from_signed(-1, 3), None);
        assert_eq!(CellCoord::from_signed(0, -1), None);
        assert_eq!(CellCoord::from_signed(-1, -1), None);
    }
}
