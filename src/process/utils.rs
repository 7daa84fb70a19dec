use crate::error::{ReshapeError, Result};

/// Strip whitespace, a leading byte-order mark and surrounding quotes from a header name.
pub fn clean_header(raw: &str) -> String {
    raw.trim()
        .trim_start_matches('\u{feff}')
        .trim()
        .trim_matches('"')
        .to_string()
}

/// Empty means "no observation" and becomes `None`. Anything else must be a
/// finite number; `row` is only used for the error.
pub fn parse_value(raw: &str, row: usize) -> Result<Option<f64>> {
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(ReshapeError::ValueParse {
            row,
            value: raw.to_string(),
        }),
    }
}
