//! Rectangular cell windows.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::address::{CellRef, column_letter};

/// Inclusive rectangular window over a sheet.
///
/// A region whose `last_row` is below `first_row` is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRegion {
    pub first_row: u32,
    pub last_row: u32,
    pub first_column: u32,
    pub last_column: u32,
}

impl ConversionRegion {
    pub fn is_empty(&self) -> bool {
        self.last_row < self.first_row || self.last_column < self.first_column
    }

    pub fn row_count(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            u64::from(self.last_row - self.first_row) + 1
        }
    }

    pub fn column_count(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            u64::from(self.last_column - self.first_column) + 1
        }
    }

    pub fn cell_count(&self) -> u64 {
        self.row_count() * self.column_count()
    }

    pub fn contains_column(&self, column: u32) -> bool {
        (self.first_column..=self.last_column).contains(&column)
    }

    pub fn contains(&self, cell: CellRef) -> bool {
        !self.is_empty()
            && (self.first_row..=self.last_row).contains(&cell.row)
            && self.contains_column(cell.column)
    }

    /// Cells in row-major order (row increasing, then column increasing).
    pub fn cells(&self) -> impl Iterator<Item = CellRef> + use<> {
        let region = *self;
        let rows = if region.is_empty() {
            1..=0
        } else {
            region.first_row..=region.last_row
        };
        rows.flat_map(move |row| {
            (region.first_column..=region.last_column).map(move |column| CellRef::new(row, column))
        })
    }
}

impl fmt::Display for ConversionRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}:{}{}",
            column_letter(self.first_column),
            self.first_row,
            column_letter(self.last_column),
            self.last_row
        )
    }
}
