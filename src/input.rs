//! Boundary parsing for comma-separated revenue lists.
//!
//! Upstream forms hand revenue as free text ("100, 200, 300"). Parsing lives
//! here, outside the numeric core, which assumes validated inputs. Malformed
//! entries fail fast so the caller can report them before any test runs.

use crate::error::UpliftError;

/// Parses a comma-separated revenue list into validated values.
///
/// Items are trimmed and empty items skipped (trailing commas are fine).
/// Entries that are non-numeric, non-finite, or negative are rejected.
pub fn parse_revenue_list(raw: &str) -> Result<Vec<f64>, UpliftError> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            let value: f64 = item
                .parse()
                .map_err(|_| UpliftError::InvalidRevenue(item.to_string()))?;
            if !value.is_finite() || value < 0.0 {
                return Err(UpliftError::InvalidRevenue(item.to_string()));
            }
            Ok(value)
        })
        .collect()
}
