//! Rating coercion
//!
//! Stored ratings arrive as numbers, numeric strings, or garbage. Everything
//! is folded into a finite score in `0..=5`, with `0` standing for "unknown".

use serde_json::Value;

/// Highest star rating a review can carry
pub const MAX_RATING: f64 = 5.0;

/// Threshold at or above which a rating counts as positive
pub const POSITIVE_THRESHOLD: f64 = 4.0;

/// Threshold at or below which a rating counts as negative
pub const NEGATIVE_THRESHOLD: f64 = 2.0;

/// Convert a loose stored value into a rating.
///
/// Numbers pass through, strings are parsed after trimming (empty is `0`),
/// booleans become `1`/`0`, anything else is `0`. Non-finite or out of range
/// results are then replaced by `0`.
pub fn coerce_rating(value: &Value) -> f64 {
    let raw = match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Value::Bool(true) => 1.0,
        Value::Bool(false) | Value::Null => 0.0,
        Value::Array(_) | Value::Object(_) => f64::NAN,
    };

    sanitize_rating(raw)
}

/// Replace non-finite or out-of-range ratings by `0`
pub fn sanitize_rating(raw: f64) -> f64 {
    if raw.is_finite() && (0.0..=MAX_RATING).contains(&raw) {
        raw
    } else {
        tracing::debug!("Coercing invalid rating {} to 0", raw);
        0.0
    }
}

/// Number of filled stars for a rating: rounded, clamped to `0..=5`
pub fn star_count(rating: f64) -> u8 {
    let safe = if rating.is_finite() { rating } else { 0.0 };
    safe.round().clamp(0.0, MAX_RATING) as u8
}

/// Short rating label such as `4.5/5`, or an em dash when the rating is unknown
pub fn rating_label(rating: f64) -> String {
    if rating.is_finite() && rating > 0.0 {
        format!("{:.1}/5", rating)
    } else {
        "\u{2014}".to_string()
    }
}
