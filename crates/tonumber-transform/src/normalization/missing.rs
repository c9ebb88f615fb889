//! Missing-data markers.

use tonumber_model::CellValue;

/// Literals the export uses for "no data".
///
/// Matching trims surrounding whitespace and ignores case, so the padded
/// variants and `n/a` collapse onto `--`, the empty string, `N/A`, and `NA`.
pub const MISSING_MARKERS: [&str; 8] = ["--", " --", "-- ", " -- ", "", "N/A", "NA", "n/a"];

/// Returns true if `text` is a missing-data marker.
pub fn is_missing_marker(text: &str) -> bool {
    let trimmed = text.trim();
    MISSING_MARKERS
        .iter()
        .any(|marker| marker.trim().eq_ignore_ascii_case(trimmed))
}

/// Returns true for an absent cell or a text cell holding a missing marker.
pub fn is_missing_value(value: &CellValue) -> bool {
    match value {
        CellValue::Empty => true,
        CellValue::Text(text) => is_missing_marker(text),
        _ => false,
    }
}
