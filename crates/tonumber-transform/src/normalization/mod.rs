//! Cell value normalization.

pub mod missing;
pub mod numeric;

pub use missing::{MISSING_MARKERS, is_missing_marker, is_missing_value};
pub use numeric::{Normalized, normalize, parse_truncated, strip_separators, truncate_to_i64};
