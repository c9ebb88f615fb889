//! Checks on a converted workbook.
//!
//! - **validator**: full sweep comparing every target cell with the
//!   normalized source value
//! - **analysis**: per-column tallies over the first data rows

pub mod analysis;
mod error;
pub mod issue;
pub mod validator;

pub use analysis::{
    AnalysisOptions, AnalysisReport, CellSample, ColumnAnalysis, HealthCheck, analyze_file,
    analyze_workbook,
};
pub use error::{Result, ValidateError};
pub use issue::{IssueKind, IssueSeverity, ValidationIssue};
pub use validator::{
    SampleCell, SampleStatus, ValidationCounts, ValidationReport, Validator, validate_file,
};
