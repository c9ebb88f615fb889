//! Per-column conversion analysis.
//!
//! Looks at the first few data rows of every region column and tallies what
//! the source held against what the target holds now. Intended as a quick
//! read on a conversion, not a proof of correctness; see
//! [`Validator`](crate::Validator) for the full sweep.

use std::collections::BTreeMap;

use serde::Serialize;
use tonumber_grid::{Sheet, Workbook};
use tonumber_model::{
    CellKind, CellRef, CellValue, ConversionConfig, ConversionRegion, column_letter,
};
use tonumber_transform::{Normalized, normalize};
use tracing::{info, info_span};

use crate::error::Result;
use crate::validator::has_fraction;

pub const DEFAULT_SAMPLE_ROWS: u32 = 10;
const MAX_DECIMAL_EXAMPLES: usize = 3;
const MAX_COLUMN_SAMPLES: usize = 5;
const MAX_PATTERNS: usize = 10;
/// Health checks pass at 95%.
const HEALTH_THRESHOLD_PERCENT: u64 = 95;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Data rows inspected per column.
    pub sample_rows: u32,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            sample_rows: DEFAULT_SAMPLE_ROWS,
        }
    }
}

/// One cell as it was and as it is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellSample {
    pub cell: CellRef,
    pub original: CellValue,
    pub converted: CellValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnAnalysis {
    pub column: u32,
    pub label: String,
    pub cells: u64,
    /// Source cells that normalize to an integer.
    pub numeric: u64,
    pub missing: u64,
    pub converted_integers: u64,
    pub converted_empty: u64,
    pub decimal_truncations: u64,
    pub decimal_examples: Vec<CellSample>,
    pub samples: Vec<CellSample>,
}

impl ColumnAnalysis {
    fn new(column: u32) -> Self {
        Self {
            column,
            label: column_letter(column),
            cells: 0,
            numeric: 0,
            missing: 0,
            converted_integers: 0,
            converted_empty: 0,
            decimal_truncations: 0,
            decimal_examples: Vec::new(),
            samples: Vec::new(),
        }
    }
}

/// A ratio check such as "at least 95% of numbers became integers".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub name: &'static str,
    pub expected: u64,
    pub actual: u64,
    pub passed: bool,
}

impl HealthCheck {
    fn new(name: &'static str, expected: u64, actual: u64) -> Self {
        Self {
            name,
            expected,
            actual,
            passed: actual * 100 >= expected * HEALTH_THRESHOLD_PERCENT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub source_sheet: String,
    pub target_sheet: String,
    /// Rows and columns actually inspected.
    pub region: ConversionRegion,
    pub total_cells: u64,
    pub columns: Vec<ColumnAnalysis>,
    pub original_kinds: BTreeMap<CellKind, u64>,
    pub converted_kinds: BTreeMap<CellKind, u64>,
    /// Missing-marker text by literal value.
    pub markers: BTreeMap<String, u64>,
    pub decimal_truncations: u64,
    /// Most frequent `"<original kind> -> <converted kind>"` transitions.
    pub patterns: Vec<(String, u64)>,
    pub integer_health: HealthCheck,
    pub missing_health: HealthCheck,
}

impl AnalysisReport {
    pub fn healthy(&self) -> bool {
        self.integer_health.passed && self.missing_health.passed
    }

    /// Percentage of inspected cells, `0.0` when nothing was inspected.
    pub fn percent(&self, count: u64) -> f64 {
        if self.total_cells == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.total_cells as f64
        }
    }
}

pub fn analyze_workbook(
    workbook: &Workbook,
    config: &ConversionConfig,
    options: &AnalysisOptions,
) -> Result<AnalysisReport> {
    config.validate()?;
    let span = info_span!(
        "analyze",
        source_sheet = %config.source_sheet,
        target_sheet = %config.target_sheet
    );
    let _guard = span.enter();

    let source = workbook.sheet(&config.source_sheet)?;
    let target = workbook.sheet(&config.target_sheet)?;
    let region = sampled_region(config, source, target, options.sample_rows);

    let mut original_kinds = BTreeMap::new();
    let mut converted_kinds = BTreeMap::new();
    let mut markers = BTreeMap::new();
    let mut pattern_counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut columns = Vec::new();
    let mut total_cells = 0;
    let mut numeric = 0;
    let mut missing = 0;
    let mut converted_integers = 0;
    let mut converted_empty = 0;

    for column in region.first_column..=region.last_column {
        let mut analysis = ColumnAnalysis::new(column);
        for row in region.first_row..=region.last_row {
            let cell = CellRef::new(row, column);
            let original = source.cell_at(cell);
            let converted = target.cell_at(cell);
            analysis.cells += 1;
            *original_kinds.entry(original.kind()).or_insert(0) += 1;
            *converted_kinds.entry(converted.kind()).or_insert(0) += 1;
            *pattern_counts
                .entry(format!("{} -> {}", original.kind(), converted.kind()))
                .or_insert(0) += 1;

            match normalize(original) {
                Normalized::Missing => {
                    analysis.missing += 1;
                    if let CellValue::Text(text) = original {
                        *markers.entry(text.clone()).or_insert(0) += 1;
                    }
                }
                Normalized::Integer(_) => {
                    analysis.numeric += 1;
                    if has_fraction(original) {
                        analysis.decimal_truncations += 1;
                        if analysis.decimal_examples.len() < MAX_DECIMAL_EXAMPLES {
                            analysis.decimal_examples.push(sample(cell, original, converted));
                        }
                    }
                }
                Normalized::Unchanged => {}
            }
            if converted.kind() == CellKind::Integer {
                analysis.converted_integers += 1;
            }
            if converted.is_blank() {
                analysis.converted_empty += 1;
            }
            if analysis.samples.len() < MAX_COLUMN_SAMPLES {
                analysis.samples.push(sample(cell, original, converted));
            }
        }
        total_cells += analysis.cells;
        numeric += analysis.numeric;
        missing += analysis.missing;
        converted_integers += analysis.converted_integers;
        converted_empty += analysis.converted_empty;
        columns.push(analysis);
    }

    let decimal_truncations = columns.iter().map(|c| c.decimal_truncations).sum();
    let report = AnalysisReport {
        source_sheet: config.source_sheet.clone(),
        target_sheet: config.target_sheet.clone(),
        region,
        total_cells,
        columns,
        original_kinds,
        converted_kinds,
        markers,
        decimal_truncations,
        patterns: top_patterns(pattern_counts),
        integer_health: HealthCheck::new(
            "numbers converted to integers",
            numeric,
            converted_integers,
        ),
        missing_health: HealthCheck::new("missing data left empty", missing, converted_empty),
    };
    info!(
        %region,
        total_cells,
        healthy = report.healthy(),
        "analysis complete"
    );
    Ok(report)
}

pub fn analyze_file(
    config: &ConversionConfig,
    options: &AnalysisOptions,
) -> Result<AnalysisReport> {
    config.validate()?;
    let workbook = Workbook::open(&config.workbook_path)?;
    analyze_workbook(&workbook, config, options)
}

fn sampled_region(
    config: &ConversionConfig,
    source: &Sheet,
    target: &Sheet,
    sample_rows: u32,
) -> ConversionRegion {
    let last_row = source.max_row().max(target.max_row());
    let mut region = config.region(last_row);
    if sample_rows == 0 {
        region.last_row = region.first_row - 1;
    } else {
        region.last_row = region
            .last_row
            .min(region.first_row.saturating_add(sample_rows - 1));
    }
    region
}

fn sample(cell: CellRef, original: &CellValue, converted: &CellValue) -> CellSample {
    CellSample {
        cell,
        original: original.clone(),
        converted: converted.clone(),
    }
}

/// Sort by count, descending, then by name for a stable order.
fn top_patterns(counts: BTreeMap<String, u64>) -> Vec<(String, u64)> {
    let mut patterns: Vec<(String, u64)> = counts.into_iter().collect();
    patterns.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    patterns.truncate(MAX_PATTERNS);
    patterns
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonumber_transform::convert_workbook;

    fn converted_workbook(rows: u32) -> Workbook {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_sheet(Sheet::new("RawData")).unwrap();
        for column in 1..=27 {
            sheet.set_cell(1, column, format!("H{column}"));
        }
        for row in 2..=rows {
            sheet.set_cell(row, 4, format!("{row}.5"));
            sheet.set_cell(row, 5, "--");
            sheet.set_cell(row, 6, "text");
            sheet.set_cell(row, 7, i64::from(row));
        }
        convert_workbook(&mut workbook, &ConversionConfig::default(), |_| {}).unwrap();
        workbook
    }

    #[test]
    fn inspects_only_sample_rows() {
        let workbook = converted_workbook(30);
        let report = analyze_workbook(
            &workbook,
            &ConversionConfig::default(),
            &AnalysisOptions::default(),
        )
        .unwrap();
        assert_eq!(report.region.to_string(), "D2:AA11");
        assert_eq!(report.columns.len(), 24);
        assert_eq!(report.total_cells, 240);
        assert_eq!(report.columns[0].label, "D");
        assert_eq!(report.columns[0].samples.len(), 5);
    }

    #[test]
    fn tallies_kinds_markers_and_decimals() {
        let workbook = converted_workbook(4);
        let report = analyze_workbook(
            &workbook,
            &ConversionConfig::default(),
            &AnalysisOptions::default(),
        )
        .unwrap();
        let d = &report.columns[0];
        assert_eq!(d.numeric, 3);
        assert_eq!(d.converted_integers, 3);
        assert_eq!(d.decimal_truncations, 3);
        assert_eq!(d.decimal_examples.len(), 3);
        assert_eq!(d.decimal_examples[0].converted, CellValue::Int(2));
        assert_eq!(report.decimal_truncations, 3);

        assert_eq!(report.markers.get("--"), Some(&3));
        assert_eq!(report.original_kinds.get(&CellKind::Integer), Some(&3));
        assert_eq!(report.converted_kinds.get(&CellKind::Integer), Some(&6));
        // 20 untouched empty columns x 3 rows.
        assert_eq!(report.patterns[0], ("empty -> empty".to_string(), 60));
        assert!(report.patterns.contains(&("text -> empty".to_string(), 3)));
        assert!(report.healthy());
    }

    #[test]
    fn unconverted_target_fails_health() {
        let mut workbook = Workbook::new();
        for name in ["RawData", "RawData_Numbers"] {
            workbook.add_sheet(Sheet::new(name)).unwrap().set_cell(2, 4, "1,5");
        }

        let report = analyze_workbook(
            &workbook,
            &ConversionConfig::default(),
            &AnalysisOptions::default(),
        )
        .unwrap();
        assert!(!report.integer_health.passed);
        assert!(report.missing_health.passed);
        assert!(!report.healthy());
    }

    #[test]
    fn truncated_target_fails_health() {
        let mut workbook = converted_workbook(5);
        let target = workbook.sheet_mut("RawData_Numbers").unwrap();
        for row in 4..=5 {
            for column in 4..=7 {
                target.set_cell(row, column, CellValue::Empty);
            }
        }

        let report = analyze_workbook(
            &workbook,
            &ConversionConfig::default(),
            &AnalysisOptions::default(),
        )
        .unwrap();
        assert_eq!(report.region.last_row, 5);
        assert_eq!(report.integer_health.expected, 8);
        assert_eq!(report.integer_health.actual, 4);
        assert!(!report.integer_health.passed);
        assert!(!report.healthy());
    }

    #[test]
    fn zero_sample_rows_inspects_nothing() {
        let workbook = converted_workbook(5);
        let report = analyze_workbook(
            &workbook,
            &ConversionConfig::default(),
            &AnalysisOptions { sample_rows: 0 },
        )
        .unwrap();
        assert_eq!(report.total_cells, 0);
        assert!(report.healthy());
        assert_eq!(report.percent(0), 0.0);
    }

    #[test]
    fn patterns_sort_by_count_then_name() {
        let counts = BTreeMap::from([
            ("b".to_string(), 2),
            ("a".to_string(), 2),
            ("c".to_string(), 5),
        ]);
        let sorted = top_patterns(counts);
        let names: Vec<&str> = sorted.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
