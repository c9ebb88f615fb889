//! A named, sparse grid of cells.

use std::collections::BTreeMap;

use tonumber_model::{CellRef, CellValue};

static EMPTY: CellValue = CellValue::Empty;

/// Sparse sheet keyed by 1-indexed `(row, column)`.
///
/// Only non-empty cells are stored; setting a cell to [`CellValue::Empty`]
/// removes it. Keys are ordered row-major.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    name: String,
    cells: BTreeMap<(u32, u32), CellValue>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Value at `(row, column)`; absent cells read as [`CellValue::Empty`].
    pub fn cell(&self, row: u32, column: u32) -> &CellValue {
        self.cells.get(&(row, column)).unwrap_or(&EMPTY)
    }

    pub fn cell_at(&self, cell: CellRef) -> &CellValue {
        self.cell(cell.row, cell.column)
    }

    /// Store `value` at `(row, column)` and return the previous value.
    pub fn set_cell(&mut self, row: u32, column: u32, value: impl Into<CellValue>) -> CellValue {
        debug_assert!(row > 0 && column > 0, "cells are 1-indexed");
        let value = value.into();
        let previous = if matches!(value, CellValue::Empty) {
            self.cells.remove(&(row, column))
        } else {
            self.cells.insert((row, column), value)
        };
        previous.unwrap_or_default()
    }

    /// Highest row holding a value, or 0 for an empty sheet.
    pub fn max_row(&self) -> u32 {
        self.cells
            .keys()
            .next_back()
            .map_or(0, |&(row, _)| row)
    }

    /// Highest column holding a value, or 0 for an empty sheet.
    pub fn max_column(&self) -> u32 {
        self.cells.keys().map(|&(_, column)| column).max().unwrap_or(0)
    }

    /// Stored cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellRef, &CellValue)> {
        self.cells
            .iter()
            .map(|(&(row, column), value)| (CellRef::new(row, column), value))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
