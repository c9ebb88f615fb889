//! A1-style cell addressing (1-indexed rows and columns).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Convert a 1-indexed column number to its letter label (1 = A, 27 = AA).
///
/// Column 0 has no label and renders as an empty string.
pub fn column_letter(column: u32) -> String {
    let mut letters = Vec::new();
    let mut n = column;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Parse a column label (`D`, `aa`) back to its 1-indexed number.
pub fn column_index(label: &str) -> Option<u32> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }
    let mut index: u32 = 0;
    for ch in label.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = u32::from(ch.to_ascii_uppercase() as u8 - b'A') + 1;
        index = index.checked_mul(26)?.checked_add(digit)?;
    }
    Some(index)
}

/// Position of a cell in a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellRef {
    pub row: u32,
    pub column: u32,
}

impl CellRef {
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letter(self.column), self.row)
    }
}
