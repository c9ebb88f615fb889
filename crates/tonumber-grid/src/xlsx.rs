//! xlsx encoding and decoding.
//!
//! Reading goes through `calamine`, writing through `rust_xlsxwriter`. Cell
//! values and formulas survive a round trip; styles and layout are not
//! carried. Error literals are written as error-constant formulas (`=#N/A`)
//! so they reload as errors rather than text.

use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};
use rust_xlsxwriter::{Format, Formula, Workbook as XlsxWorkbook, Worksheet};
use tonumber_model::CellValue;
use tracing::trace;

use crate::error::{GridError, Result};
use crate::sheet::Sheet;

/// xlsx sheets hold at most this many columns (XFD).
const MAX_COLUMNS: u32 = 16_384;
/// xlsx sheets hold at most this many rows.
const MAX_ROWS: u32 = 1_048_576;

const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Excel error literals; a formula consisting of one of these is an error cell.
const ERROR_LITERALS: [&str; 8] = [
    "#NULL!",
    "#DIV/0!",
    "#VALUE!",
    "#REF!",
    "#NAME?",
    "#NUM!",
    "#N/A",
    "#GETTING_DATA",
];

pub(crate) fn read_sheets(path: &Path) -> Result<Vec<Sheet>> {
    if !path.exists() {
        return Err(GridError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|source| GridError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|source| GridError::ReadSheet {
                sheet: name.clone(),
                source,
            })?;
        let mut sheet = Sheet::new(name.as_str());
        // `used_cells` positions are relative to the range origin.
        let (row_origin, column_origin) = range.start().unwrap_or((0, 0));
        for (row, column, data) in range.used_cells() {
            let row = row_origin + row as u32 + 1;
            let column = column_origin + column as u32 + 1;
            sheet.set_cell(row, column, cell_from_data(data));
        }
        let formulas = workbook
            .worksheet_formula(&name)
            .map_err(|source| GridError::ReadSheet {
                sheet: name.clone(),
                source,
            })?;
        let (row_origin, column_origin) = formulas.start().unwrap_or((0, 0));
        for (row, column, formula) in formulas.used_cells() {
            let row = row_origin + row as u32 + 1;
            let column = column_origin + column as u32 + 1;
            let cached = sheet.cell(row, column).to_string();
            sheet.set_cell(row, column, formula_cell(formula, cached));
        }
        trace!(sheet = %name, cell_count = sheet.len(), "sheet decoded");
        sheets.push(sheet);
    }
    Ok(sheets)
}

pub(crate) fn write_sheets(path: &Path, sheets: &[Sheet]) -> Result<()> {
    let mut workbook = XlsxWorkbook::new();
    let datetime_format = Format::new().set_num_format(DATETIME_FORMAT);
    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name())?;
        write_cells(worksheet, sheet, &datetime_format)?;
    }
    let buffer = workbook.save_to_buffer()?;
    std::fs::write(path, buffer).map_err(|source| GridError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn write_cells(worksheet: &mut Worksheet, sheet: &Sheet, datetime_format: &Format) -> Result<()> {
    for (cell, value) in sheet.cells() {
        let in_range =
            (1..=MAX_ROWS).contains(&cell.row) && (1..=MAX_COLUMNS).contains(&cell.column);
        if !in_range {
            return Err(GridError::CellOutOfRange {
                row: cell.row,
                column: cell.column,
            });
        }
        // rust_xlsxwriter is 0-indexed with u16 columns.
        let row = cell.row - 1;
        let column = (cell.column - 1) as u16;
        match value {
            CellValue::Empty => {}
            CellValue::Text(text) => {
                worksheet.write_string(row, column, text)?;
            }
            CellValue::Error(literal) => {
                let formula = Formula::new(format!("={literal}")).set_result(literal);
                worksheet.write_formula(row, column, formula)?;
            }
            CellValue::Formula { formula, cached } => {
                let formula = Formula::new(format!("={formula}")).set_result(cached);
                worksheet.write_formula(row, column, formula)?;
            }
            CellValue::Int(number) => {
                // Exact up to 2^53; larger magnitudes round to the nearest double.
                worksheet.write_number(row, column, *number as f64)?;
            }
            CellValue::Real(number) => {
                worksheet.write_number(row, column, *number)?;
            }
            CellValue::Bool(flag) => {
                worksheet.write_boolean(row, column, *flag)?;
            }
            CellValue::DateTime(serial) => {
                worksheet.write_number_with_format(row, column, *serial, datetime_format)?;
            }
        }
    }
    Ok(())
}

/// Map a decoded xlsx value onto [`CellValue`].
///
/// xlsx stores every number as a double, so whole values within `i64` range
/// load as [`CellValue::Int`]; an integer written by a conversion reads back
/// as the same integer.
pub(crate) fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(text) => CellValue::Text(text.clone()),
        Data::Int(number) => CellValue::Int(*number),
        Data::Float(number) => {
            whole_number(*number).map_or(CellValue::Real(*number), CellValue::Int)
        }
        Data::Bool(flag) => CellValue::Bool(*flag),
        Data::DateTime(datetime) => CellValue::DateTime(datetime.as_f64()),
        Data::DateTimeIso(text) | Data::DurationIso(text) => CellValue::Text(text.clone()),
        Data::Error(error) => CellValue::Error(error.to_string()),
    }
}

/// Combine a formula with the rendered value calamine decoded for the same cell.
fn formula_cell(formula: &str, cached: String) -> CellValue {
    let formula = formula.strip_prefix('=').unwrap_or(formula);
    if ERROR_LITERALS.contains(&formula) {
        return CellValue::Error(formula.to_string());
    }
    CellValue::Formula {
        formula: formula.to_string(),
        cached,
    }
}

fn whole_number(value: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
    if value.is_finite()
        && value.fract() == 0.0
        && value >= i64::MIN as f64
        && value < i64::MAX as f64
    {
        Some(value as i64)
    } else {
        None
    }
}
