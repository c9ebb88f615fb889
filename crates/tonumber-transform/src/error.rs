//! Error types for conversion runs.

use thiserror::Error;
use tonumber_grid::GridError;
use tonumber_model::ConfigError;

/// Errors that abort a conversion pass.
///
/// Normalization itself cannot fail; every error here comes from the
/// configuration or the workbook storage.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Workbook could not be opened, read, or saved.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, TransformError>;
