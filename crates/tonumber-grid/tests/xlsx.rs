//! xlsx load/save tests.

use tempfile::TempDir;
use tonumber_grid::{GridError, Sheet, Workbook};
use tonumber_model::CellValue;

fn sample_workbook() -> Workbook {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_sheet(Sheet::new("RawData")).expect("add sheet");
    sheet.set_cell(1, 1, "Region");
    sheet.set_cell(1, 4, "Population");
    sheet.set_cell(2, 1, "North");
    sheet.set_cell(2, 4, "1,200.50");
    sheet.set_cell(2, 5, 42_i64);
    sheet.set_cell(2, 6, 7.5);
    sheet.set_cell(2, 7, true);
    sheet.set_cell(3, 28, "outside");
    workbook
}

#[test]
fn saved_workbook_reloads_with_same_values() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("ToNumber.xlsx");

    let mut workbook = sample_workbook();
    workbook.save_as(&path).expect("save");

    let reloaded = Workbook::open(&path).expect("open");
    assert_eq!(reloaded.path(), Some(path.as_path()));
    assert_eq!(reloaded.sheet_names(), vec!["RawData"]);

    let sheet = reloaded.sheet("RawData").expect("sheet");
    assert_eq!(sheet.cell(1, 4), &CellValue::from("Population"));
    assert_eq!(sheet.cell(2, 4), &CellValue::from("1,200.50"));
    assert_eq!(sheet.cell(2, 5), &CellValue::Int(42));
    assert_eq!(sheet.cell(2, 6), &CellValue::Real(7.5));
    assert_eq!(sheet.cell(2, 7), &CellValue::Bool(true));
    assert_eq!(sheet.cell(3, 28), &CellValue::from("outside"));
    assert_eq!(sheet.max_row(), 3);
    assert_eq!(sheet.max_column(), 28);
}

#[test]
fn copied_sheet_is_persisted() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("ToNumber.xlsx");

    let mut workbook = sample_workbook();
    workbook
        .copy_sheet("RawData", "RawData_Numbers")
        .expect("copy")
        .set_cell(2, 4, 1200_i64);
    workbook.save_as(&path).expect("save");

    let reloaded = Workbook::open(&path).expect("open");
    assert_eq!(reloaded.sheet_names(), vec!["RawData", "RawData_Numbers"]);
    let target = reloaded.sheet("RawData_Numbers").expect("target");
    assert_eq!(target.cell(2, 4), &CellValue::Int(1200));
    assert_eq!(target.cell(2, 1), &CellValue::from("North"));
}

#[test]
fn formulas_survive_save_and_copy() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("ToNumber.xlsx");

    let mut workbook = sample_workbook();
    let formula = CellValue::Formula {
        formula: "1+2".to_string(),
        cached: "3".to_string(),
    };
    let raw = workbook.sheet_mut("RawData").expect("sheet");
    raw.set_cell(3, 1, formula.clone());
    raw.set_cell(3, 2, CellValue::Error("#DIV/0!".to_string()));
    workbook.save_as(&path).expect("save");

    let mut reloaded = Workbook::open(&path).expect("open");
    let source = reloaded.sheet("RawData").expect("sheet");
    assert_eq!(source.cell(3, 1), &formula);
    assert_eq!(source.cell(3, 2), &CellValue::Error("#DIV/0!".to_string()));

    reloaded.copy_sheet("RawData", "RawData_Numbers").expect("copy");
    reloaded.save().expect("save copy");

    let copied = Workbook::open(&path).expect("reopen");
    for name in ["RawData", "RawData_Numbers"] {
        let sheet = copied.sheet(name).expect("sheet");
        assert_eq!(sheet.cell(3, 1), &formula, "{name}");
        assert_eq!(sheet.cell(3, 2), &CellValue::Error("#DIV/0!".to_string()), "{name}");
    }
}

#[test]
fn integers_beyond_double_precision_round_on_save() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("ToNumber.xlsx");

    let mut workbook = sample_workbook();
    let raw = workbook.sheet_mut("RawData").expect("sheet");
    raw.set_cell(4, 4, 9_007_199_254_740_992_i64);
    raw.set_cell(4, 5, 9_007_199_254_740_993_i64);
    workbook.save_as(&path).expect("save");

    let reloaded = Workbook::open(&path).expect("open");
    let sheet = reloaded.sheet("RawData").expect("sheet");
    assert_eq!(sheet.cell(4, 4), &CellValue::Int(9_007_199_254_740_992));
    assert_eq!(sheet.cell(4, 5), &CellValue::Int(9_007_199_254_740_992));
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("absent.xlsx");
    let err = Workbook::open(&path).unwrap_err();
    assert!(matches!(err, GridError::FileNotFound { .. }));
}

#[test]
fn corrupt_file_fails_to_open() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("corrupt.xlsx");
    std::fs::write(&path, b"not a zip archive").expect("write");
    let err = Workbook::open(&path).unwrap_err();
    assert!(matches!(err, GridError::Open { .. }));
}
