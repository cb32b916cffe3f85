//! List-valued CSV cells.
//!
//! Each cell holds the printed form of a float sequence, `[785.0, 785.5]`,
//! which a Python `ast.literal_eval` reads back as a list. The reader also
//! accepts the whitespace-separated form `[785.  785.5]` that older exports
//! produced from numpy arrays.

use crate::error::{RamanError, Result};

/// Render a float sequence as a list literal.
///
/// Values must be finite; `NaN`/`inf` have no literal form.
pub fn format_list(values: &[f64]) -> String {
    // Debug prints the shortest representation that round-trips exactly.
    format!("{values:?}")
}

/// Parse a list literal back into floats.
pub fn parse_list(cell: &str) -> Result<Vec<f64>> {
    let inner = cell
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| RamanError::ListLiteral(format!("{} is not bracketed", preview(cell))))?;

    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }
    if inner.contains(',') {
        // `[1.0, 2.0]`; a trailing comma is allowed, an empty element is not
        let inner = inner.trim_end();
        let inner = inner.strip_suffix(',').unwrap_or(inner);
        inner.split(',').map(|tok| parse_number(tok.trim())).collect()
    } else {
        inner.split_whitespace().map(parse_number).collect()
    }
}

fn parse_number(tok: &str) -> Result<f64> {
    if tok.is_empty() {
        return Err(RamanError::ListLiteral("empty list element".into()));
    }
    match tok.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(RamanError::ListLiteral(format!("'{tok}' is not a finite number"))),
    }
}

fn preview(cell: &str) -> String {
    let head: String = cell.chars().take(24).collect();
    if head.len() < cell.len() {
        format!("'{head}…'")
    } else {
        format!("'{head}'")
    }
}
