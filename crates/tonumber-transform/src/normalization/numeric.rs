//! Numeric normalization of cell values.

use serde::{Deserialize, Serialize};
use tonumber_model::CellValue;

use super::missing::is_missing_marker;

/// Outcome of normalizing one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Normalized {
    /// Missing data; written back as an empty cell.
    Missing,
    /// Numeric value truncated toward zero.
    Integer(i64),
    /// Neither missing nor numeric; the original value is kept as-is.
    Unchanged,
}

impl Normalized {
    /// The value to store for a cell that originally held `original`.
    pub fn resolve(self, original: &CellValue) -> CellValue {
        match self {
            Normalized::Missing => CellValue::Empty,
            Normalized::Integer(value) => CellValue::Int(value),
            Normalized::Unchanged => original.clone(),
        }
    }
}

/// Classify a cell value as missing, integer, or unchanged.
///
/// Text is trimmed and checked against the missing markers, then every comma
/// and whitespace character is removed and the rest parsed as a real number.
/// Numbers are truncated toward zero (`7.9` → 7, `-7.9` → -7). Anything that
/// does not parse, including booleans, dates, error literals, and formulas,
/// is [`Normalized::Unchanged`]. This never fails.
pub fn normalize(value: &CellValue) -> Normalized {
    match value {
        CellValue::Empty => Normalized::Missing,
        CellValue::Text(text) if is_missing_marker(text) => Normalized::Missing,
        CellValue::Text(text) => {
            parse_truncated(text).map_or(Normalized::Unchanged, Normalized::Integer)
        }
        CellValue::Int(value) => Normalized::Integer(*value),
        CellValue::Real(value) => {
            truncate_to_i64(*value).map_or(Normalized::Unchanged, Normalized::Integer)
        }
        CellValue::Bool(_)
        | CellValue::DateTime(_)
        | CellValue::Error(_)
        | CellValue::Formula { .. } => Normalized::Unchanged,
    }
}

/// Parse numeric text with separators and return its integer part.
///
/// Commas and whitespace anywhere in the text are ignored, so `"1,234"`,
/// `" 1 234 "`, and `"1,200.50"` all parse. Returns `None` for text that is
/// not a finite number or whose integer part does not fit in `i64`.
///
/// The result is exact for every `i64`, but xlsx stores numbers as doubles:
/// once saved, magnitudes above 2^53 round to the nearest representable
/// value.
pub fn parse_truncated(text: &str) -> Option<i64> {
    let clean = strip_separators(text);
    if clean.is_empty() {
        return None;
    }
    // Exact for integers beyond f64's 53-bit mantissa.
    if let Ok(value) = clean.parse::<i64>() {
        return Some(value);
    }
    clean.parse::<f64>().ok().and_then(truncate_to_i64)
}

/// Remove every comma and whitespace character.
pub fn strip_separators(text: &str) -> String {
    text.chars()
        .filter(|ch| *ch != ',' && !ch.is_whitespace())
        .collect()
}

/// Truncate toward zero; `None` for NaN, infinities, and out-of-range values.
pub fn truncate_to_i64(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    let truncated = value.trunc();
    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
    if truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        Some(truncated as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> CellValue {
        CellValue::from(value)
    }

    #[test]
    fn absent_and_markers_are_missing() {
        assert_eq!(normalize(&CellValue::Empty), Normalized::Missing);
        for marker in ["--", " --", "-- ", " -- ", "", "N/A", "NA", "n/a"] {
            assert_eq!(normalize(&text(marker)), Normalized::Missing, "{marker:?}");
        }
    }

    #[test]
    fn decimals_truncate_toward_zero() {
        assert_eq!(normalize(&text("7.9")), Normalized::Integer(7));
        assert_eq!(normalize(&text("-7.9")), Normalized::Integer(-7));
        assert_eq!(normalize(&text("0.999")), Normalized::Integer(0));
        assert_eq!(normalize(&text("-0.5")), Normalized::Integer(0));
    }

    #[test]
    fn separators_are_stripped() {
        assert_eq!(normalize(&text("1,234")), Normalized::Integer(1234));
        assert_eq!(normalize(&text(" 1 234 ")), Normalized::Integer(1234));
        assert_eq!(normalize(&text("1,234,567.89")), Normalized::Integer(1_234_567));
        assert_eq!(normalize(&text("1,200.50")), Normalized::Integer(1200));
    }

    #[test]
    fn numeric_literal_grammar() {
        assert_eq!(normalize(&text("+42")), Normalized::Integer(42));
        assert_eq!(normalize(&text("1e3")), Normalized::Integer(1000));
        assert_eq!(normalize(&text("2.5E-1")), Normalized::Integer(0));
        assert_eq!(normalize(&text(".75")), Normalized::Integer(0));
        assert_eq!(normalize(&text("12.")), Normalized::Integer(12));
    }

    #[test]
    fn typed_numbers() {
        assert_eq!(normalize(&CellValue::Int(42)), Normalized::Integer(42));
        assert_eq!(normalize(&CellValue::Real(7.0)), Normalized::Integer(7));
        assert_eq!(normalize(&CellValue::Real(-3.75)), Normalized::Integer(-3));
    }

    #[test]
    fn large_integers_are_exact() {
        assert_eq!(
            normalize(&text("9,007,199,254,740,993")),
            Normalized::Integer(9_007_199_254_740_993)
        );
    }

    #[test]
    fn non_numeric_passes_through() {
        for value in ["text", "12abc", "1.2.3", "-", "- -", "N.A.", "$5", "inf", "NaN"] {
            assert_eq!(normalize(&text(value)), Normalized::Unchanged, "{value:?}");
        }
        assert_eq!(normalize(&CellValue::Bool(true)), Normalized::Unchanged);
        assert_eq!(normalize(&CellValue::DateTime(45000.5)), Normalized::Unchanged);
        assert_eq!(
            normalize(&CellValue::Error("#DIV/0!".to_string())),
            Normalized::Unchanged
        );
        let formula = CellValue::Formula {
            formula: "D2*1.5".to_string(),
            cached: "7.5".to_string(),
        };
        assert_eq!(normalize(&formula), Normalized::Unchanged);
        assert_eq!(Normalized::Unchanged.resolve(&formula), formula);
    }

    #[test]
    fn out_of_range_passes_through() {
        assert_eq!(normalize(&text("1e30")), Normalized::Unchanged);
        assert_eq!(normalize(&CellValue::Real(f64::INFINITY)), Normalized::Unchanged);
    }

    #[test]
    fn resolve_keeps_original_for_unchanged() {
        let original = text("  text  ");
        assert_eq!(Normalized::Unchanged.resolve(&original), original);
        assert_eq!(Normalized::Missing.resolve(&original), CellValue::Empty);
        assert_eq!(Normalized::Integer(5).resolve(&original), CellValue::Int(5));
    }
}
