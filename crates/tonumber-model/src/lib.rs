//! Shared types for spreadsheet number normalization.
//!
//! - **cell**: typed cell values and their kind tags
//! - **address**: A1-style column letters and cell references
//! - **region**: the rectangular window a conversion sweeps
//! - **config**: sheet names, file path, and region bounds for a run

pub mod address;
pub mod cell;
pub mod config;
pub mod error;
pub mod region;

pub use address::{CellRef, column_index, column_letter};
pub use cell::{CellKind, CellValue};
pub use config::ConversionConfig;
pub use error::{ConfigError, Result};
pub use region::ConversionRegion;
