//! Tolerant accessors over loosely-shaped upstream JSON.
//!
//! Upstream logs mix pre-serialized JSON strings with structured values and
//! use PascalCase and camelCase keys interchangeably. Every helper here
//! substitutes an empty/absent value instead of failing.

use serde_json::Value as Json;

/// Best-effort parse of a value that may already be structured, a JSON
/// string, or absent.
///
/// - `None`, `null` and falsy scalars yield `None`.
/// - Non-string values pass through unchanged.
/// - Strings are trimmed and parsed strictly; empty or invalid text yields `None`.
pub fn coerce(value: Option<&Json>) -> Option<Json> {
    let v = value?;
    if !truthy(v) {
        return None;
    }
    match v {
        Json::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            serde_json::from_str(trimmed).ok()
        }
        other => Some(other.clone()),
    }
}

/// Return the value of the first key in `names` that is present and not
/// `null`. Non-objects never match.
pub fn field<'a>(obj: &'a Json, names: &[&str]) -> Option<&'a Json> {
    let map = obj.as_object()?;
    names
        .iter()
        .filter_map(|k| map.get(*k))
        .find(|v| !v.is_null())
}

/// Borrow `value` as a slice when it is an array; anything else is empty.
pub fn seq_or_empty(value: Option<&Json>) -> &[Json] {
    match value {
        Some(Json::Array(items)) => items.as_slice(),
        _ => &[],
    }
}

/// Loose truthiness: `null`, `false`, `0`, `NaN` and `""` are falsy.
pub fn truthy(value: &Json) -> bool {
    match value {
        Json::Null => false,
        Json::Bool(b) => *b,
        Json::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Json::String(s) => !s.is_empty(),
        Json::Array(_) | Json::Object(_) => true,
    }
}

/// True only for a literal boolean `true`.
pub fn is_true(value: Option<&Json>) -> bool {
    matches!(value, Some(Json::Bool(true)))
}

/// Numeric reading of a number or a numeric string.
pub fn number(value: Option<&Json>) -> Option<f64> {
    match value? {
        Json::Number(n) => n.as_f64(),
        Json::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Non-empty string value, if any.
pub fn non_empty_str(value: Option<&Json>) -> Option<&str> {
    match value? {
        Json::String(s) if !s.is_empty() => Some(s.as_str()),
        _ => None,
    }
}

/// Render a scalar for human labels: strings verbatim, numbers without a
/// trailing `.0`, other values as compact JSON.
pub fn display_scalar(value: &Json) -> String {
    match value {
        Json::String(s) => s.clone(),
        Json::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_passes_structured_and_parses_strings() {
        let obj = json!({"a": 1});
        assert_eq!(coerce(Some(&obj)), Some(json!({"a": 1})));
        let s = json!("  [1, 2] ");
        assert_eq!(coerce(Some(&s)), Some(json!([1, 2])));
    }

    #[test]
    fn test_coerce_swallows_bad_input() {
        assert_eq!(coerce(None), None);
        assert_eq!(coerce(Some(&Json::Null)), None);
        assert_eq!(coerce(Some(&json!("   "))), None);
        assert_eq!(coerce(Some(&json!("{not json"))), None);
        assert_eq!(coerce(Some(&json!(""))), None);
    }

    #[test]
    fn test_field_prefers_first_non_null_name() {
        let v = json!({"Message": null, "message": "low dpi", "Level": 2});
        assert_eq!(field(&v, &["Message", "message"]), Some(&json!("low dpi")));
        assert_eq!(field(&v, &["Level", "level"]), Some(&json!(2)));
        assert_eq!(field(&json!("str"), &["Message"]), None);
    }

    #[test]
    fn test_seq_or_empty_and_truthy() {
        let arr = json!([1, 2]);
        assert_eq!(seq_or_empty(Some(&arr)).len(), 2);
        assert!(seq_or_empty(Some(&json!({"x": 1}))).is_empty());
        assert!(seq_or_empty(None).is_empty());
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("")));
        assert!(truthy(&json!({})));
    }

    #[test]
    fn test_display_scalar_numbers() {
        assert_eq!(display_scalar(&json!(210)), "210");
        assert_eq!(display_scalar(&json!(210.0)), "210");
        assert_eq!(display_scalar(&json!(3.5)), "3.5");
        assert_eq!(display_scalar(&json!("A4")), "A4");
    }
}
