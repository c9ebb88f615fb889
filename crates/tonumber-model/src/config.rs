//! Configuration for a conversion run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::address::column_letter;
use crate::error::{ConfigError, Result};
use crate::region::ConversionRegion;

pub const DEFAULT_WORKBOOK_PATH: &str = "ToNumber.xlsx";
pub const DEFAULT_SOURCE_SHEET: &str = "RawData";
pub const DEFAULT_TARGET_SHEET: &str = "RawData_Numbers";
/// Column D.
pub const DEFAULT_FIRST_COLUMN: u32 = 4;
/// Column AA.
pub const DEFAULT_LAST_COLUMN: u32 = 27;
pub const DEFAULT_FIRST_DATA_ROW: u32 = 2;
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1000;

/// Where to read, where to write, and which window to normalize.
///
/// Every field has a default, so a TOML file only needs to name the values
/// that differ:
///
/// ```toml
/// workbook_path = "exports/survey.xlsx"
/// last_column = 30
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConversionConfig {
    /// Workbook file read and written by the run.
    pub workbook_path: PathBuf,
    /// Sheet holding the raw export. Never modified.
    pub source_sheet: String,
    /// Sheet receiving the normalized copy.
    pub target_sheet: String,
    /// First column of the region (1-indexed, inclusive).
    pub first_column: u32,
    /// Last column of the region (1-indexed, inclusive).
    pub last_column: u32,
    /// First row of the region; rows above it are headers.
    pub first_data_row: u32,
    /// Cells between progress checkpoints.
    pub progress_interval: u64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            workbook_path: PathBuf::from(DEFAULT_WORKBOOK_PATH),
            source_sheet: DEFAULT_SOURCE_SHEET.to_string(),
            target_sheet: DEFAULT_TARGET_SHEET.to_string(),
            first_column: DEFAULT_FIRST_COLUMN,
            last_column: DEFAULT_LAST_COLUMN,
            first_data_row: DEFAULT_FIRST_DATA_ROW,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl ConversionConfig {
    pub fn new(workbook_path: impl Into<PathBuf>) -> Self {
        Self {
            workbook_path: workbook_path.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_sheets(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.source_sheet = source.into();
        self.target_sheet = target.into();
        self
    }

    #[must_use]
    pub fn with_columns(mut self, first: u32, last: u32) -> Self {
        self.first_column = first;
        self.last_column = last;
        self
    }

    #[must_use]
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Check the configuration for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.source_sheet.trim().is_empty() {
            return Err(ConfigError::EmptySheetName { role: "source" });
        }
        if self.target_sheet.trim().is_empty() {
            return Err(ConfigError::EmptySheetName { role: "target" });
        }
        if self.source_sheet == self.target_sheet {
            return Err(ConfigError::SameSheet {
                name: self.source_sheet.clone(),
            });
        }
        if self.first_column == 0 {
            return Err(ConfigError::ZeroColumn {
                column: self.first_column,
            });
        }
        if self.first_column > self.last_column {
            return Err(ConfigError::EmptyColumnSpan {
                first: self.first_column,
                last: self.last_column,
            });
        }
        if self.first_data_row < DEFAULT_FIRST_DATA_ROW {
            return Err(ConfigError::HeaderRowInRegion {
                row: self.first_data_row,
            });
        }
        if self.progress_interval == 0 {
            return Err(ConfigError::ZeroProgressInterval);
        }
        Ok(())
    }

    /// The conversion window for a sheet whose last populated row is `last_row`.
    pub fn region(&self, last_row: u32) -> ConversionRegion {
        ConversionRegion {
            first_row: self.first_data_row,
            last_row,
            first_column: self.first_column,
            last_column: self.last_column,
        }
    }

    /// Column span as letters, e.g. `D-AA`.
    pub fn column_span_label(&self) -> String {
        format!(
            "{}-{}",
            column_letter(self.first_column),
            column_letter(self.last_column)
        )
    }
}
