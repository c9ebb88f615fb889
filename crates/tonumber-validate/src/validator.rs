//! Post-conversion validation.
//!
//! Compares the source sheet against the converted target:
//!
//! - **Dimensions**: row and column extents should match → **Warning**
//! - **Headers**: rows above the region must be identical → **Error**
//! - **Region**: every cell must equal the normalized source value
//!   - missing marker → empty target, else **Error**
//!   - numeric → integer equal to the truncation, else **Error**
//!     (right value stored as a real → **Warning**)
//!   - anything else → identical to the source, else **Error**
//! - **Outside region**: columns outside the span must be identical → **Error**
//!
//! Every cell is checked; there is no sampling.

use serde::Serialize;
use tonumber_grid::{Sheet, Workbook};
use tonumber_model::{CellRef, CellValue, ConversionConfig, ConversionRegion, column_letter};
use tonumber_transform::{Normalized, normalize, strip_separators};
use tracing::{debug, info, info_span};

use crate::error::Result;
use crate::issue::{IssueKind, IssueSeverity, ValidationIssue};

pub const DEFAULT_MAX_ISSUE_DETAILS: usize = 50;
pub const DEFAULT_SAMPLE_CELLS: usize = 10;
/// Rows and columns of the sample window at the top-left of the region.
const SAMPLE_WINDOW: u32 = 5;

/// Status of one cell in the sample table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SampleStatus {
    Preserved,
    Converted,
    Unchanged,
    Error,
}

impl SampleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SampleStatus::Preserved => "Preserved",
            SampleStatus::Converted => "Converted",
            SampleStatus::Unchanged => "Unchanged",
            SampleStatus::Error => "ERROR",
        }
    }
}

/// Source and converted value of one region cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleCell {
    pub cell: CellRef,
    pub source: CellValue,
    pub target: CellValue,
    pub status: SampleStatus,
}

/// Cell counts gathered during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationCounts {
    pub region_cells: u64,
    pub headers_checked: u64,
    pub headers_preserved: u64,
    pub missing_preserved: u64,
    pub numbers_converted: u64,
    /// Numeric source cells that had a fractional part.
    pub decimals_truncated: u64,
    pub unchanged: u64,
    pub outside_cells_checked: u64,
}

/// Result of validating one source/target pair.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub source_sheet: String,
    pub target_sheet: String,
    pub region: ConversionRegion,
    /// `(max_row, max_column)` of the source.
    pub source_extent: (u32, u32),
    /// `(max_row, max_column)` of the target.
    pub target_extent: (u32, u32),
    pub counts: ValidationCounts,
    /// First issues found, up to the configured detail limit.
    pub issues: Vec<ValidationIssue>,
    pub error_count: u64,
    pub warning_count: u64,
    pub samples: Vec<SampleCell>,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.error_count == 0
    }

    /// Issues found beyond the detail limit.
    pub fn omitted_issues(&self) -> u64 {
        (self.error_count + self.warning_count).saturating_sub(self.issues.len() as u64)
    }
}

/// Validation context.
#[derive(Debug, Clone)]
pub struct Validator {
    max_issue_details: usize,
    sample_cells: usize,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self {
            max_issue_details: DEFAULT_MAX_ISSUE_DETAILS,
            sample_cells: DEFAULT_SAMPLE_CELLS,
        }
    }

    /// Keep at most `limit` issues in the report; the rest are only counted.
    #[must_use]
    pub fn with_max_issue_details(mut self, limit: usize) -> Self {
        self.max_issue_details = limit;
        self
    }

    #[must_use]
    pub fn with_sample_cells(mut self, count: usize) -> Self {
        self.sample_cells = count;
        self
    }

    /// Validate the configured source/target pair of an open workbook.
    pub fn validate(
        &self,
        workbook: &Workbook,
        config: &ConversionConfig,
    ) -> Result<ValidationReport> {
        config.validate()?;
        let span = info_span!(
            "validate",
            source_sheet = %config.source_sheet,
            target_sheet = %config.target_sheet
        );
        let _guard = span.enter();

        let source = workbook.sheet(&config.source_sheet)?;
        let target = workbook.sheet(&config.target_sheet)?;
        // A truncated target must not shrink the sweep.
        let region = config.region(source.max_row().max(target.max_row()));

        let mut state = ValidationState::new(self.max_issue_details);
        check_dimensions(&mut state, source, target);
        check_headers(&mut state, source, target, config.first_data_row);
        check_region(&mut state, source, target, region);
        check_outside_region(&mut state, source, target, config);

        let samples = sample_cells(source, target, region, self.sample_cells);
        let report = ValidationReport {
            source_sheet: config.source_sheet.clone(),
            target_sheet: config.target_sheet.clone(),
            region,
            source_extent: (source.max_row(), source.max_column()),
            target_extent: (target.max_row(), target.max_column()),
            counts: state.counts,
            issues: state.issues,
            error_count: state.error_count,
            warning_count: state.warning_count,
            samples,
        };
        info!(
            region_cells = report.counts.region_cells,
            errors = report.error_count,
            warnings = report.warning_count,
            "validation complete"
        );
        Ok(report)
    }
}

/// Open the configured workbook and validate it with `validator`.
pub fn validate_file(config: &ConversionConfig, validator: &Validator) -> Result<ValidationReport> {
    config.validate()?;
    let workbook = Workbook::open(&config.workbook_path)?;
    validator.validate(&workbook, config)
}

struct ValidationState {
    counts: ValidationCounts,
    issues: Vec<ValidationIssue>,
    error_count: u64,
    warning_count: u64,
    max_issue_details: usize,
}

impl ValidationState {
    fn new(max_issue_details: usize) -> Self {
        Self {
            counts: ValidationCounts::default(),
            issues: Vec::new(),
            error_count: 0,
            warning_count: 0,
            max_issue_details,
        }
    }

    fn push(&mut self, issue: ValidationIssue) {
        match issue.severity {
            IssueSeverity::Error => self.error_count += 1,
            IssueSeverity::Warning => self.warning_count += 1,
        }
        debug!(kind = issue.kind.as_str(), cell = ?issue.cell, "{}", issue.message);
        if self.issues.len() < self.max_issue_details {
            self.issues.push(issue);
        }
    }
}

fn check_dimensions(state: &mut ValidationState, source: &Sheet, target: &Sheet) {
    let source_extent = (source.max_row(), source.max_column());
    let target_extent = (target.max_row(), target.max_column());
    if source_extent != target_extent {
        state.push(ValidationIssue::new(
            IssueKind::DimensionMismatch,
            None,
            format!(
                "source is {}x{}, target is {}x{}",
                source_extent.0, source_extent.1, target_extent.0, target_extent.1
            ),
        ));
    }
}

fn check_headers(state: &mut ValidationState, source: &Sheet, target: &Sheet, first_data_row: u32) {
    let columns = source.max_column().max(target.max_column());
    for row in 1..first_data_row {
        for column in 1..=columns {
            state.counts.headers_checked += 1;
            let expected = source.cell(row, column);
            let actual = target.cell(row, column);
            if expected == actual {
                state.counts.headers_preserved += 1;
            } else {
                state.push(ValidationIssue::new(
                    IssueKind::HeaderMismatch,
                    Some(CellRef::new(row, column)),
                    format!("header '{expected}' became '{actual}'"),
                ));
            }
        }
    }
}

fn check_region(
    state: &mut ValidationState,
    source: &Sheet,
    target: &Sheet,
    region: ConversionRegion,
) {
    for cell in region.cells() {
        state.counts.region_cells += 1;
        let original = source.cell_at(cell);
        let converted = target.cell_at(cell);
        match normalize(original) {
            Normalized::Missing => {
                if converted.is_blank() {
                    state.counts.missing_preserved += 1;
                } else {
                    state.push(ValidationIssue::new(
                        IssueKind::MissingNotPreserved,
                        Some(cell),
                        format!("missing '{original}' became '{converted}'"),
                    ));
                }
            }
            Normalized::Integer(expected) => {
                if has_fraction(original) {
                    state.counts.decimals_truncated += 1;
                }
                check_integer(state, cell, original, converted, expected);
            }
            Normalized::Unchanged => {
                if converted == original {
                    state.counts.unchanged += 1;
                } else {
                    state.push(ValidationIssue::new(
                        IssueKind::UnexpectedChange,
                        Some(cell),
                        format!("non-numeric '{original}' became '{converted}'"),
                    ));
                }
            }
        }
    }
}

fn check_integer(
    state: &mut ValidationState,
    cell: CellRef,
    original: &CellValue,
    converted: &CellValue,
    expected: i64,
) {
    match converted {
        CellValue::Int(actual) if *actual == expected => {
            state.counts.numbers_converted += 1;
        }
        CellValue::Real(actual) if actual.fract() == 0.0 && *actual == expected as f64 => {
            state.counts.numbers_converted += 1;
            state.push(ValidationIssue::new(
                IssueKind::RealNotInteger,
                Some(cell),
                format!("'{original}' converted to {actual} but is still stored as a real"),
            ));
        }
        _ => {
            state.push(ValidationIssue::new(
                IssueKind::IncorrectConversion,
                Some(cell),
                format!("'{original}' expected {expected}, got '{converted}'"),
            ));
        }
    }
}

fn check_outside_region(
    state: &mut ValidationState,
    source: &Sheet,
    target: &Sheet,
    config: &ConversionConfig,
) {
    let rows = source.max_row().max(target.max_row());
    let columns = source.max_column().max(target.max_column());
    let span = config.region(rows);
    for row in config.first_data_row..=rows {
        for column in 1..=columns {
            if span.contains_column(column) {
                continue;
            }
            state.counts.outside_cells_checked += 1;
            let expected = source.cell(row, column);
            let actual = target.cell(row, column);
            if expected != actual {
                state.push(ValidationIssue::new(
                    IssueKind::OutsideRegionChanged,
                    Some(CellRef::new(row, column)),
                    format!(
                        "column {} changed: '{expected}' became '{actual}'",
                        column_letter(column)
                    ),
                ));
            }
        }
    }
}

/// True when a numeric source value carries a fractional part.
pub(crate) fn has_fraction(value: &CellValue) -> bool {
    match value {
        CellValue::Real(number) => number.fract() != 0.0,
        CellValue::Text(text) => strip_separators(text)
            .parse::<f64>()
            .is_ok_and(|number| number.is_finite() && number.fract() != 0.0),
        _ => false,
    }
}

fn sample_status(original: &CellValue, converted: &CellValue) -> SampleStatus {
    match normalize(original) {
        Normalized::Missing if converted.is_blank() => SampleStatus::Preserved,
        Normalized::Integer(expected) if converted.as_int() == Some(expected) => {
            SampleStatus::Converted
        }
        Normalized::Unchanged if converted == original => SampleStatus::Unchanged,
        _ => SampleStatus::Error,
    }
}

fn sample_cells(
    source: &Sheet,
    target: &Sheet,
    region: ConversionRegion,
    limit: usize,
) -> Vec<SampleCell> {
    let window = ConversionRegion {
        first_row: region.first_row,
        last_row: region.last_row.min(region.first_row + SAMPLE_WINDOW - 1),
        first_column: region.first_column,
        last_column: region
            .last_column
            .min(region.first_column + SAMPLE_WINDOW - 1),
    };
    window
        .cells()
        .take(limit)
        .map(|cell| {
            let original = source.cell_at(cell).clone();
            let converted = target.cell_at(cell).clone();
            let status = sample_status(&original, &converted);
            SampleCell {
                cell,
                source: original,
                target: converted,
                status,
            }
        })
        .collect()
}
