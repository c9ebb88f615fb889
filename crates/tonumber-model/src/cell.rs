//! Cell values as read from and written to a sheet.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single typed cell value.
///
/// `Empty` is both "no cell" and the result written for missing data. The
/// xlsx medium also produces booleans, date-times (stored as Excel serial
/// numbers), error literals, and formulas; those are carried through
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Real(f64),
    Bool(bool),
    DateTime(f64),
    Error(String),
    /// Formula text without the leading `=`, plus its last computed value
    /// rendered as text (empty when the file carried none).
    Formula { formula: String, cached: String },
}

/// Discriminant of a [`CellValue`], used by reports and statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Empty,
    Text,
    Integer,
    Real,
    Boolean,
    DateTime,
    Error,
    Formula,
}

impl CellKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CellKind::Empty => "empty",
            CellKind::Text => "text",
            CellKind::Integer => "integer",
            CellKind::Real => "real",
            CellKind::Boolean => "boolean",
            CellKind::DateTime => "datetime",
            CellKind::Error => "error",
            CellKind::Formula => "formula",
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CellValue {
    pub fn kind(&self) -> CellKind {
        match self {
            CellValue::Empty => CellKind::Empty,
            CellValue::Text(_) => CellKind::Text,
            CellValue::Int(_) => CellKind::Integer,
            CellValue::Real(_) => CellKind::Real,
            CellValue::Bool(_) => CellKind::Boolean,
            CellValue::DateTime(_) => CellKind::DateTime,
            CellValue::Error(_) => CellKind::Error,
            CellValue::Formula { .. } => CellKind::Formula,
        }
    }

    /// Returns true for an absent cell or an empty string.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            CellValue::Int(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(text) => f.write_str(text),
            CellValue::Int(value) => write!(f, "{value}"),
            CellValue::Real(value) => write!(f, "{value}"),
            CellValue::Bool(true) => f.write_str("TRUE"),
            CellValue::Bool(false) => f.write_str("FALSE"),
            CellValue::DateTime(serial) => write!(f, "{serial}"),
            CellValue::Error(literal) => f.write_str(literal),
            CellValue::Formula { formula, .. } => write!(f, "={formula}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Real(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(CellValue::Empty.kind(), CellKind::Empty);
        assert_eq!(CellValue::from("x").kind(), CellKind::Text);
        assert_eq!(CellValue::from(3_i64).kind(), CellKind::Integer);
        assert_eq!(CellValue::from(3.5).kind(), CellKind::Real);
        assert_eq!(CellValue::from(true).kind(), CellKind::Boolean);
        assert_eq!(CellValue::DateTime(45000.0).kind(), CellKind::DateTime);
        assert_eq!(CellValue::Error("#N/A".into()).kind(), CellKind::Error);
        let formula = CellValue::Formula {
            formula: "SUM(D2:D9)".into(),
            cached: "12".into(),
        };
        assert_eq!(formula.kind(), CellKind::Formula);
    }

    #[test]
    fn blank_covers_empty_string() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::from("").is_blank());
        assert!(!CellValue::from(" ").is_blank());
        assert!(!CellValue::Int(0).is_blank());
    }

    #[test]
    fn display_renders_values() {
        assert_eq!(CellValue::Int(-12).to_string(), "-12");
        assert_eq!(CellValue::Real(7.9).to_string(), "7.9");
        assert_eq!(CellValue::Bool(false).to_string(), "FALSE");
        assert_eq!(CellValue::Empty.to_string(), "");
        let formula = CellValue::Formula {
            formula: "1+2".into(),
            cached: "3".into(),
        };
        assert_eq!(formula.to_string(), "=1+2");
    }
}
