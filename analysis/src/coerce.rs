//! Lenient readers for upstream JSON scalars.
//!
//! The upstream API is not consistent about scalar types, ids and counters may
//! arrive as numbers or numeric strings and flags as booleans, numbers or
//! strings. Anything that can't be read is treated as absent.

use serde_json::Value;

pub fn to_long(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.parse::<i64>().ok(),
        _ => None,
    }
}

pub fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(_) => to_long(value).map(|n| n != 0),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

pub fn to_text(value: &Value) -> Option<&str> {
    value.as_str()
}

/// `to_long` on an optional object member.
pub fn long_field(value: &Value, key: &str) -> Option<i64> {
    value.get(key).and_then(to_long)
}

pub fn bool_field(value: &Value, key: &str) -> Option<bool> {
    value.get(key).and_then(to_bool)
}

pub fn text_field<'v>(value: &'v Value, key: &str) -> Option<&'v str> {
    value.get(key).and_then(to_text)
}
