//! Error types for conversion configuration.

use thiserror::Error;

/// Errors raised when a [`ConversionConfig`](crate::ConversionConfig) is inconsistent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Column numbers are 1-indexed.
    #[error("column numbers start at 1 (got {column})")]
    ZeroColumn { column: u32 },

    /// The column span selects nothing.
    #[error("first column {first} is after last column {last}")]
    EmptyColumnSpan { first: u32, last: u32 },

    /// Row 1 is the header row and is never converted.
    #[error("first data row must be at least 2 (got {row})")]
    HeaderRowInRegion { row: u32 },

    /// Converting a sheet onto itself would mutate the source.
    #[error("source and target sheet are both named '{name}'")]
    SameSheet { name: String },

    /// Sheet names may not be blank.
    #[error("{role} sheet name is empty")]
    EmptySheetName { role: &'static str },

    /// Progress checkpoints need a positive interval.
    #[error("progress interval must be greater than zero")]
    ZeroProgressInterval,
}

/// Result type for configuration checks.
pub type Result<T> = std::result::Result<T, ConfigError>;
