//! Validation issue types.

use serde::Serialize;
use tonumber_model::CellRef;

/// How serious a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum IssueSeverity {
    Warning,
    Error,
}

impl IssueSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueSeverity::Warning => "WARN",
            IssueSeverity::Error => "ERROR",
        }
    }
}

/// What a validation finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IssueKind {
    /// Source and target sheets have different extents.
    DimensionMismatch,
    /// A header cell differs between source and target.
    HeaderMismatch,
    /// A missing marker in the source is not empty in the target.
    MissingNotPreserved,
    /// A numeric source cell did not become the expected integer.
    IncorrectConversion,
    /// A numeric source cell has the right value but is still stored as a real.
    RealNotInteger,
    /// A non-numeric source cell changed in the target.
    UnexpectedChange,
    /// A cell outside the conversion region changed.
    OutsideRegionChanged,
}

impl IssueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueKind::DimensionMismatch => "dimension_mismatch",
            IssueKind::HeaderMismatch => "header_mismatch",
            IssueKind::MissingNotPreserved => "missing_not_preserved",
            IssueKind::IncorrectConversion => "incorrect_conversion",
            IssueKind::RealNotInteger => "real_not_integer",
            IssueKind::UnexpectedChange => "unexpected_change",
            IssueKind::OutsideRegionChanged => "outside_region_changed",
        }
    }

    pub fn default_severity(self) -> IssueSeverity {
        match self {
            IssueKind::DimensionMismatch | IssueKind::RealNotInteger => IssueSeverity::Warning,
            _ => IssueSeverity::Error,
        }
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub kind: IssueKind,
    /// Affected cell; `None` for sheet-level findings.
    pub cell: Option<CellRef>,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(kind: IssueKind, cell: Option<CellRef>, message: impl Into<String>) -> Self {
        Self {
            severity: kind.default_severity(),
            kind,
            cell,
            message: message.into(),
        }
    }
}
