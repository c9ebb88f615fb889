//! Property tests for the value normalizer.

use proptest::prelude::*;
use tonumber_model::CellValue;
use tonumber_transform::{Normalized, is_missing_marker, normalize, parse_truncated};

fn with_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[test]
fn thousands_helper_groups_digits() {
    assert_eq!(with_thousands(1234567), "1,234,567");
    assert_eq!(with_thousands(-1000), "-1,000");
    assert_eq!(with_thousands(999), "999");
}

proptest! {
    #[test]
    fn decimal_text_truncates_toward_zero(value in -1.0e12f64..1.0e12f64) {
        let text = format!("{value}");
        prop_assert_eq!(
            normalize(&CellValue::from(text.as_str())),
            Normalized::Integer(value.trunc() as i64)
        );
    }

    #[test]
    fn thousands_separators_are_ignored(value in any::<i64>()) {
        let text = format!("  {}  ", with_thousands(value));
        prop_assert_eq!(normalize(&CellValue::from(text.as_str())), Normalized::Integer(value));
    }

    #[test]
    fn integers_normalize_to_themselves(value in any::<i64>()) {
        prop_assert_eq!(normalize(&CellValue::Int(value)), Normalized::Integer(value));
    }

    #[test]
    fn non_numeric_text_is_unchanged(text in "[a-zA-Z][a-zA-Z ]{0,11}") {
        prop_assume!(!is_missing_marker(&text));
        prop_assume!(parse_truncated(&text).is_none());
        let value = CellValue::from(text.as_str());
        prop_assert_eq!(normalize(&value), Normalized::Unchanged);
        prop_assert_eq!(normalize(&value).resolve(&value), value);
    }

    #[test]
    fn normalizing_twice_changes_nothing(text in "[ 0-9,.\\-a-zN/A]{0,12}") {
        let original = CellValue::from(text.as_str());
        let once = normalize(&original).resolve(&original);
        let twice = normalize(&once).resolve(&once);
        prop_assert_eq!(twice, once);
    }
}
