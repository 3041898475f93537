use serde_json::Value;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Canonical key for a free-text place name:
/// - Unicode canonical decomposition (NFD)
/// - combining marks dropped, so `"Bengalūru"` and `"Bengaluru"` meet
/// - surrounding whitespace trimmed
/// - lower-cased
///
/// Applying it twice yields the same key.
pub fn normalize_city(name: &str) -> String {
    name.nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .collect::<String>()
        .trim()
        .to_lowercase()
}

/// Reads a JSON scalar as text. Numbers and booleans are rendered, anything
/// else (null, arrays, objects) is treated as missing.
pub fn value_as_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Like [`value_as_text`] but blank strings count as missing.
pub fn value_as_non_blank(value: Option<&Value>) -> Option<String> {
    value_as_text(value).filter(|s| !s.trim().is_empty())
}

/// Reads a count that may arrive as a number or a numeric string.
/// Negative and unparseable values collapse to zero.
pub fn value_as_count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    }
}
