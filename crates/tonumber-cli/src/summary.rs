use std::collections::BTreeMap;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tonumber_model::{CellKind, CellValue};
use tonumber_transform::{ConversionReport, TargetStatus};
use tonumber_validate::{
    AnalysisReport, HealthCheck, IssueSeverity, SampleStatus, ValidationReport,
};

pub fn print_conversion(report: &ConversionReport) {
    let status = match report.target_status {
        TargetStatus::Created => "created from source",
        TargetStatus::Reused => "existing sheet reused",
    };
    println!("Source: {}", report.source_sheet);
    println!("Target: {} ({status})", report.target_sheet);
    println!("Region: {}", report.region);

    let mut table = Table::new();
    table.set_header(vec![header_cell("Outcome"), header_cell("Cells")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    add_count_row(&mut table, "Converted to integer", report.integers, Color::Green);
    add_count_row(&mut table, "Missing, left empty", report.missing, Color::Blue);
    add_count_row(&mut table, "Left unchanged", report.unchanged, Color::Yellow);
    table.add_row(vec![
        Cell::new("TOTAL").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(report.cells_processed).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    println!("{} cells rewritten", report.cells_written);
}

pub fn print_validation(report: &ValidationReport) {
    println!(
        "Validating {} against {} over {}",
        report.target_sheet, report.source_sheet, report.region
    );
    println!(
        "Source {}x{}, target {}x{}",
        report.source_extent.0,
        report.source_extent.1,
        report.target_extent.0,
        report.target_extent.1
    );

    let counts = &report.counts;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Check"), header_cell("Cells")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Headers preserved"),
        Cell::new(format!("{}/{}", counts.headers_preserved, counts.headers_checked)),
    ]);
    table.add_row(vec![Cell::new("Region cells"), Cell::new(counts.region_cells)]);
    add_count_row(&mut table, "Numbers converted", counts.numbers_converted, Color::Green);
    add_count_row(&mut table, "Decimals truncated", counts.decimals_truncated, Color::Green);
    add_count_row(&mut table, "Missing preserved", counts.missing_preserved, Color::Blue);
    add_count_row(&mut table, "Unchanged", counts.unchanged, Color::Yellow);
    table.add_row(vec![
        Cell::new("Outside cells checked"),
        Cell::new(counts.outside_cells_checked),
    ]);
    add_count_row(&mut table, "Errors", report.error_count, Color::Red);
    add_count_row(&mut table, "Warnings", report.warning_count, Color::Yellow);
    println!("{table}");

    print_samples(report);
    print_issues(report);

    if report.passed() {
        println!("PASSED");
    } else {
        println!("FAILED: {} error(s)", report.error_count);
    }
}

fn print_samples(report: &ValidationReport) {
    if report.samples.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Cell"),
        header_cell("Source"),
        header_cell("Target"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    for sample in &report.samples {
        table.add_row(vec![
            Cell::new(sample.cell),
            value_cell(&sample.source),
            value_cell(&sample.target),
            status_cell(sample.status),
        ]);
    }
    println!();
    println!("Sample:");
    println!("{table}");
}

fn print_issues(report: &ValidationReport) {
    if report.issues.is_empty() {
        return;
    }
    let mut issues: Vec<_> = report.issues.iter().collect();
    issues.sort_by(|a, b| b.severity.cmp(&a.severity).then_with(|| a.cell.cmp(&b.cell)));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Cell"),
        header_cell("Kind"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for issue in issues {
        table.add_row(vec![
            severity_cell(issue.severity),
            issue.cell.map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(issue.kind.as_str()),
            Cell::new(&issue.message),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
    let omitted = report.omitted_issues();
    if omitted > 0 {
        println!("... and {omitted} more not shown");
    }
}

pub fn print_analysis(report: &AnalysisReport) {
    println!(
        "Analyzing {} against {} over {}",
        report.target_sheet, report.source_sheet, report.region
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Numbers"),
        header_cell("Missing"),
        header_cell("Integers"),
        header_cell("Empty"),
        header_cell("Decimals"),
        header_cell("Decimal examples"),
    ]);
    apply_issue_table_style(&mut table);
    for index in 1..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for column in &report.columns {
        let examples = column
            .decimal_examples
            .iter()
            .map(|sample| format!("{}: {} -> {}", sample.cell, sample.original, sample.converted))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(&column.label).fg(Color::Blue).add_attribute(Attribute::Bold),
            Cell::new(column.numeric),
            Cell::new(column.missing),
            Cell::new(column.converted_integers),
            Cell::new(column.converted_empty),
            count_cell(column.decimal_truncations, Color::Yellow),
            if examples.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(examples)
            },
        ]);
    }
    println!("{table}");

    println!("Total cells analyzed: {}", report.total_cells);
    println!("Decimal values truncated: {}", report.decimal_truncations);
    print_kind_table("Original kinds", &report.original_kinds, report);
    print_kind_table("Converted kinds", &report.converted_kinds, report);

    if !report.markers.is_empty() {
        println!();
        println!("Missing markers:");
        for (marker, count) in &report.markers {
            println!("  '{marker}': {count}");
        }
    }

    let mut patterns = Table::new();
    patterns.set_header(vec![header_cell("Pattern"), header_cell("Cells"), header_cell("%")]);
    apply_table_style(&mut patterns);
    align_column(&mut patterns, 1, CellAlignment::Right);
    align_column(&mut patterns, 2, CellAlignment::Right);
    for (pattern, count) in &report.patterns {
        patterns.add_row(vec![
            Cell::new(pattern),
            Cell::new(count),
            Cell::new(format!("{:.1}", report.percent(*count))),
        ]);
    }
    println!();
    println!("Conversion patterns:");
    println!("{patterns}");

    println!();
    print_health(&report.integer_health);
    print_health(&report.missing_health);
}

fn print_kind_table(title: &str, kinds: &BTreeMap<CellKind, u64>, report: &AnalysisReport) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Kind"), header_cell("Cells"), header_cell("%")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (kind, count) in kinds {
        table.add_row(vec![
            Cell::new(kind),
            Cell::new(count),
            Cell::new(format!("{:.1}", report.percent(*count))),
        ]);
    }
    println!();
    println!("{title}:");
    println!("{table}");
}

fn print_health(check: &HealthCheck) {
    let verdict = if check.passed { "OK" } else { "WARNING" };
    println!("{verdict}: {} ({} of {})", check.name, check.actual, check.expected);
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

fn add_count_row(table: &mut Table, label: &str, count: u64, color: Color) {
    table.add_row(vec![Cell::new(label), count_cell(count, color)]);
}

fn count_cell(count: u64, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn value_cell(value: &CellValue) -> Cell {
    match value {
        CellValue::Empty => dim_cell("(empty)"),
        CellValue::Text(text) => Cell::new(format!("'{text}'")),
        other => Cell::new(other),
    }
}

fn status_cell(status: SampleStatus) -> Cell {
    let color = match status {
        SampleStatus::Preserved => Color::Blue,
        SampleStatus::Converted => Color::Green,
        SampleStatus::Unchanged => Color::Yellow,
        SampleStatus::Error => Color::Red,
    };
    Cell::new(status.as_str()).fg(color)
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new(severity.as_str())
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        IssueSeverity::Warning => Cell::new(severity.as_str()).fg(Color::Yellow),
    }
}
