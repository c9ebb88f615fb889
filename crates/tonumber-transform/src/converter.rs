//! Range conversion: apply [`normalize`] across the configured region.
//!
//! The target sheet is created once as a full copy of the source and then
//! mutated in place on every later run. Each cell is normalized from the
//! target's own current value, so a second run over converted data is a
//! no-op.

use std::time::Instant;

use serde::Serialize;
use tonumber_grid::Workbook;
use tonumber_model::{ConversionConfig, ConversionRegion};
use tracing::{debug, info, info_span, trace};

use crate::error::Result;
use crate::normalization::{Normalized, normalize};

/// Whether the target sheet existed before the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TargetStatus {
    /// Target was created as a copy of the source.
    Created,
    /// Existing target was converted in place.
    Reused,
}

/// Progress checkpoint emitted during a conversion sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionProgress {
    pub processed: u64,
    pub total: u64,
}

impl ConversionProgress {
    /// Fraction of the region processed, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.processed as f64 / self.total as f64
        }
    }
}

/// Outcome of one conversion pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionReport {
    pub source_sheet: String,
    pub target_sheet: String,
    pub target_status: TargetStatus,
    pub region: ConversionRegion,
    pub cells_processed: u64,
    /// Cells whose stored value changed.
    pub cells_written: u64,
    pub missing: u64,
    pub integers: u64,
    pub unchanged: u64,
}

/// Make sure the target sheet exists, copying the source if it does not.
///
/// The source sheet is only required when the target has to be created.
pub fn resolve_target(workbook: &mut Workbook, config: &ConversionConfig) -> Result<TargetStatus> {
    if workbook.contains_sheet(&config.target_sheet) {
        info!(target_sheet = %config.target_sheet, "using existing target sheet");
        return Ok(TargetStatus::Reused);
    }
    workbook.copy_sheet(&config.source_sheet, &config.target_sheet)?;
    info!(
        source_sheet = %config.source_sheet,
        target_sheet = %config.target_sheet,
        "created target sheet from source"
    );
    Ok(TargetStatus::Created)
}

/// Normalize the configured region of the target sheet in memory.
///
/// `on_progress` is called every `config.progress_interval` cells. The
/// workbook is not saved; see [`convert_file`] for the full run.
pub fn convert_workbook<F>(
    workbook: &mut Workbook,
    config: &ConversionConfig,
    mut on_progress: F,
) -> Result<ConversionReport>
where
    F: FnMut(ConversionProgress),
{
    config.validate()?;
    let span = info_span!(
        "convert",
        source_sheet = %config.source_sheet,
        target_sheet = %config.target_sheet
    );
    let _guard = span.enter();

    let target_status = resolve_target(workbook, config)?;
    let sheet = workbook.sheet_mut(&config.target_sheet)?;
    let region = config.region(sheet.max_row());
    let total = region.cell_count();
    info!(%region, total_cells = total, "processing region");

    let mut report = ConversionReport {
        source_sheet: config.source_sheet.clone(),
        target_sheet: config.target_sheet.clone(),
        target_status,
        region,
        cells_processed: 0,
        cells_written: 0,
        missing: 0,
        integers: 0,
        unchanged: 0,
    };

    for cell in region.cells() {
        let original = sheet.cell_at(cell);
        let outcome = normalize(original);
        match outcome {
            Normalized::Missing => report.missing += 1,
            Normalized::Integer(_) => report.integers += 1,
            Normalized::Unchanged => report.unchanged += 1,
        }
        let converted = outcome.resolve(original);
        if converted != *original {
            trace!(
                %cell,
                from = %original.kind(),
                to = %converted.kind(),
                "cell rewritten"
            );
            sheet.set_cell(cell.row, cell.column, converted);
            report.cells_written += 1;
        }

        report.cells_processed += 1;
        if report.cells_processed % config.progress_interval == 0 {
            let progress = ConversionProgress {
                processed: report.cells_processed,
                total,
            };
            debug!(
                processed = progress.processed,
                total,
                percent = %format!("{:.1}", progress.fraction() * 100.0),
                "progress"
            );
            on_progress(progress);
        }
    }

    info!(
        cells_processed = report.cells_processed,
        cells_written = report.cells_written,
        missing = report.missing,
        integers = report.integers,
        unchanged = report.unchanged,
        "region converted"
    );
    Ok(report)
}

/// Open the configured workbook, convert it, and save it once.
///
/// Any storage error aborts the run; nothing is written unless the whole
/// pass completed.
pub fn convert_file<F>(config: &ConversionConfig, on_progress: F) -> Result<ConversionReport>
where
    F: FnMut(ConversionProgress),
{
    config.validate()?;
    let start = Instant::now();
    let mut workbook = Workbook::open(&config.workbook_path)?;
    let report = convert_workbook(&mut workbook, config, on_progress)?;
    workbook.save()?;
    info!(
        path = %config.workbook_path.display(),
        duration_ms = start.elapsed().as_millis(),
        "conversion saved"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonumber_grid::{GridError, Sheet};
    use tonumber_model::CellValue;

    use crate::error::TransformError;

    fn config() -> ConversionConfig {
        ConversionConfig::default()
    }

    fn workbook_with_rows(rows: u32) -> Workbook {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_sheet(Sheet::new("RawData")).unwrap();
        for column in 1..=30 {
            sheet.set_cell(1, column, format!("H{column}"));
        }
        for row in 2..=rows {
            for column in 1..=30 {
                sheet.set_cell(row, column, format!("{row}.{column}"));
            }
        }
        workbook
    }

    #[test]
    fn first_run_creates_target() {
        let mut workbook = workbook_with_rows(3);
        let report = convert_workbook(&mut workbook, &config(), |_| {}).unwrap();
        assert_eq!(report.target_status, TargetStatus::Created);
        assert_eq!(report.region.to_string(), "D2:AA3");
        assert_eq!(report.cells_processed, 48);
        assert_eq!(report.integers, 48);
        assert_eq!(report.cells_written, 48);

        let report = convert_workbook(&mut workbook, &config(), |_| {}).unwrap();
        assert_eq!(report.target_status, TargetStatus::Reused);
        assert_eq!(report.cells_written, 0);
    }

    #[test]
    fn source_is_never_modified() {
        let mut workbook = workbook_with_rows(4);
        let before = workbook.sheet("RawData").unwrap().clone();
        convert_workbook(&mut workbook, &config(), |_| {}).unwrap();
        assert_eq!(workbook.sheet("RawData").unwrap(), &before);
    }

    #[test]
    fn reads_values_from_existing_target() {
        let mut workbook = workbook_with_rows(2);
        let target = workbook.copy_sheet("RawData", "RawData_Numbers").unwrap();
        target.set_cell(2, 4, "--");

        convert_workbook(&mut workbook, &config(), |_| {}).unwrap();

        let target = workbook.sheet("RawData_Numbers").unwrap();
        assert_eq!(target.cell(2, 4), &CellValue::Empty);
        assert_eq!(target.cell(2, 5), &CellValue::Int(2));
    }

    #[test]
    fn progress_fires_on_checkpoints() {
        // 11 data rows x 24 columns = 264 cells.
        let mut workbook = workbook_with_rows(12);
        let mut seen = Vec::new();
        let config = config().with_progress_interval(100);
        convert_workbook(&mut workbook, &config, |progress| seen.push(progress)).unwrap();

        let processed: Vec<u64> = seen.iter().map(|p| p.processed).collect();
        assert_eq!(processed, vec![100, 200]);
        assert!(seen.iter().all(|p| p.total == 264));
        assert!((seen[1].fraction() - 200.0 / 264.0).abs() < 1e-9);
    }

    #[test]
    fn header_only_sheet_converts_nothing() {
        let mut workbook = workbook_with_rows(1);
        let report = convert_workbook(&mut workbook, &config(), |_| {}).unwrap();
        assert_eq!(report.cells_processed, 0);
        assert!(report.region.is_empty());
        assert!(workbook.contains_sheet("RawData_Numbers"));
    }

    #[test]
    fn missing_source_is_fatal() {
        let mut workbook = Workbook::new();
        let err = convert_workbook(&mut workbook, &config(), |_| {}).unwrap_err();
        assert!(matches!(
            err,
            TransformError::Grid(GridError::SheetNotFound { name }) if name == "RawData"
        ));
    }

    #[test]
    fn invalid_config_is_rejected_before_touching_workbook() {
        let mut workbook = workbook_with_rows(3);
        let config = config().with_columns(10, 2);
        let err = convert_workbook(&mut workbook, &config, |_| {}).unwrap_err();
        assert!(matches!(err, TransformError::Config(_)));
        assert!(!workbook.contains_sheet("RawData_Numbers"));
    }

    #[test]
    fn empty_region_reports_complete_progress() {
        let progress = ConversionProgress {
            processed: 0,
            total: 0,
        };
        assert_eq!(progress.fraction(), 1.0);
    }
}
