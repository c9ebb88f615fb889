//! Error types for workbook storage.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, editing, or saving a workbook.
#[derive(Debug, Error)]
pub enum GridError {
    // === File System Errors ===
    /// Workbook file does not exist.
    #[error("workbook not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to write the workbook file.
    #[error("failed to write workbook {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Workbook was built in memory and has no file to save to.
    #[error("workbook has no file path; use save_as")]
    NoPath,

    // === xlsx Errors ===
    /// Failed to open or parse the xlsx container.
    #[error("failed to open workbook {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },

    /// Failed to read a worksheet's cells.
    #[error("failed to read sheet '{sheet}': {source}")]
    ReadSheet {
        sheet: String,
        #[source]
        source: calamine::XlsxError,
    },

    /// Failed to serialize the workbook.
    #[error("failed to encode workbook: {source}")]
    Encode {
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    // === Sheet Errors ===
    /// Expected sheet is absent.
    #[error("sheet '{name}' not found")]
    SheetNotFound { name: String },

    /// A sheet with this name already exists.
    #[error("sheet '{name}' already exists")]
    DuplicateSheet { name: String },

    /// Cell lies outside what an xlsx sheet can hold.
    #[error("cell at row {row}, column {column} is outside the sheet limits")]
    CellOutOfRange { row: u32, column: u32 },
}

impl From<rust_xlsxwriter::XlsxError> for GridError {
    fn from(source: rust_xlsxwriter::XlsxError) -> Self {
        Self::Encode { source }
    }
}

/// Result type for workbook operations.
pub type Result<T> = std::result::Result<T, GridError>;
