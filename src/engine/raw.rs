//! Defaulting accessors over the semi-typed service record.
//!
//! The external schema is not contractually guaranteed, so every field read
//! in the engine goes through these helpers: missing or type-mismatched
//! values degrade to the caller's default instead of failing.

use serde_json::Value;

const EMPTY: &[Value] = &[];

/// Numeric coercion used for every modifier value and stat: integer first,
/// then float, then a numeric string, then 0.
pub fn num(v: &Value) -> f64 {
    if let Some(i) = v.as_i64() {
        return i as f64;
    }
    if let Some(f) = v.as_f64() {
        return f;
    }
    if let Some(s) = v.as_str() {
        return s.trim().parse::<f64>().unwrap_or(0.0);
    }
    0.0
}

pub fn int_field(obj: &Value, key: &str, default: i64) -> i64 {
    match obj.get(key) {
        Some(v) if !v.is_null() => num(v) as i64,
        _ => default,
    }
}

/// Present only when the field holds an actual integer. Used for fields
/// that are trusted verbatim when set (proficiency bonus, HP overrides)
/// and derived otherwise.
pub fn int_opt(obj: &Value, key: &str) -> Option<i64> {
    obj.get(key).and_then(Value::as_i64)
}

pub fn str_field(obj: &Value, key: &str, default: &str) -> String {
    match obj.get(key).and_then(Value::as_str) {
        Some(s) => s.to_string(),
        None => default.to_string(),
    }
}

/// Non-empty string or nothing.
pub fn str_opt(obj: &Value, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub fn bool_field(obj: &Value, key: &str) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// The named array, or an empty slice when the key is missing or holds
/// anything that is not an array.
pub fn array<'a>(obj: &'a Value, key: &str) -> &'a [Value] {
    obj.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(EMPTY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn num_coerces_int_float_string_and_garbage() {
        assert_eq!(num(&json!(3)), 3.0);
        assert_eq!(num(&json!(2.5)), 2.5);
        assert_eq!(num(&json!("4")), 4.0);
        assert_eq!(num(&json!(" 1.5 ")), 1.5);
        assert_eq!(num(&json!("sneaky")), 0.0);
        assert_eq!(num(&json!(null)), 0.0);
        assert_eq!(num(&json!({})), 0.0);
    }

    #[test]
    fn int_opt_rejects_null_and_non_integers() {
        let obj = json!({"a": 5, "b": null, "c": "5", "d": 2.5});
        assert_eq!(int_opt(&obj, "a"), Some(5));
        assert_eq!(int_opt(&obj, "b"), None);
        assert_eq!(int_opt(&obj, "c"), None);
        assert_eq!(int_opt(&obj, "d"), None);
        assert_eq!(int_opt(&obj, "missing"), None);
    }

    #[test]
    fn array_tolerates_missing_and_mistyped() {
        let obj = json!({"xs": [1, 2], "not": "a list"});
        assert_eq!(array(&obj, "xs").len(), 2);
        assert!(array(&obj, "not").is_empty());
        assert!(array(&obj, "missing").is_empty());
        assert!(array(&json!(null), "xs").is_empty());
    }
}
