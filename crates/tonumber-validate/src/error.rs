//! Error types for validation and analysis.

use thiserror::Error;
use tonumber_grid::GridError;
use tonumber_model::ConfigError;

/// Errors that prevent a validation or analysis run from completing.
///
/// Data problems found by validation are reported as issues, not errors.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Grid(#[from] GridError),
}

pub type Result<T> = std::result::Result<T, ValidateError>;
