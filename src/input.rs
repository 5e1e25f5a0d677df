//! Turns raw text from a form field or environment variable into the
//! numbers the calculator takes. Unparsable text is rejected here so the
//! core never sees NaN.

use crate::error::{CalcError, Result};
use crate::models::TradeInputs;

/// Parse a number, allowing thousands separators and a trailing `%`.
/// Empty text is `None`.
pub fn parse_number(field: &str, raw: &str) -> Result<Option<f64>> {
    let cleaned: String = raw
        .trim()
        .trim_end_matches('%')
        .chars()
        .filter(|c| *c != ',' && *c != '_' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Ok(None);
    }
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(CalcError::InvalidNumber {
            field: field.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Like [`parse_number`] but negative values are rejected as well.
pub fn parse_non_negative(field: &str, raw: &str) -> Result<Option<f64>> {
    match parse_number(field, raw)? {
        Some(v) if v < 0.0 => Err(CalcError::InvalidNumber {
            field: field.to_string(),
            value: raw.to_string(),
        }),
        other => Ok(other),
    }
}

/// Leverage is a whole number clamped to 1..=125. A leading `x` or trailing
/// `x` ("20x") is accepted.
pub fn parse_leverage(raw: &str) -> Result<Option<u32>> {
    let trimmed = raw.trim().trim_matches(|c: char| c == 'x' || c == 'X');
    let Some(value) = parse_non_negative("leverage", trimmed)? else {
        return Ok(None);
    };
    let whole = value.round().min(u32::MAX as f64) as u32;
    Ok(Some(TradeInputs::clamp_leverage(whole.max(1))))
}
