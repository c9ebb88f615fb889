//! Workbook storage for spreadsheet number normalization.
//!
//! A [`Workbook`] is loaded whole from an xlsx file, edited in memory through
//! [`Sheet`] handles, and written back in one step.
//!
//! # Example
//!
//! ```ignore
//! use tonumber_grid::Workbook;
//!
//! let mut workbook = Workbook::open("ToNumber.xlsx")?;
//! if !workbook.contains_sheet("RawData_Numbers") {
//!     workbook.copy_sheet("RawData", "RawData_Numbers")?;
//! }
//! let sheet = workbook.sheet_mut("RawData_Numbers")?;
//! sheet.set_cell(2, 4, 1200_i64);
//! workbook.save()?;
//! ```

mod error;
mod sheet;
mod workbook;
mod xlsx;

// === Error Types ===
pub use error::{GridError, Result};

// === Grid Types ===
pub use sheet::Sheet;
pub use workbook::Workbook;
