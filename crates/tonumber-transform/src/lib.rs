//! Numeric normalization of spreadsheet regions.
//!
//! - **normalization**: the per-cell rule (missing marker, integer, or unchanged)
//! - **converter**: sweeps the configured region of the target sheet and
//!   writes back changed cells

pub mod converter;
mod error;
pub mod normalization;

pub use converter::{
    ConversionProgress, ConversionReport, TargetStatus, convert_file, convert_workbook,
    resolve_target,
};
pub use error::{Result, TransformError};
pub use normalization::{
    MISSING_MARKERS, Normalized, is_missing_marker, is_missing_value, normalize, parse_truncated,
    strip_separators,
};
