//! Alias lookup and value coercion shared by the schema normalizers.
//!
//! Each canonical field has an ordered alias list. The first alias whose
//! value is present wins; `null` and blank strings count as absent.

use serde_json::{Map, Value};

pub(crate) type Object = Map<String, Value>;

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

/// Value of the first present alias.
pub(crate) fn lookup<'a>(obj: &'a Object, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|alias| obj.get(*alias))
        .find(|value| is_present(value))
}

/// Render any JSON value as display text.
///
/// Lists join with ", ", objects render as `key: value` pairs joined with
/// "; ".
pub(crate) fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(display_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| (k, display_text(v)))
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join("; "),
    }
}

/// Text field with a default.
pub(crate) fn text(obj: &Object, aliases: &[&str], default: &str) -> String {
    lookup(obj, aliases)
        .map(display_text)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Optional text field.
pub(crate) fn opt_text(obj: &Object, aliases: &[&str]) -> Option<String> {
    lookup(obj, aliases)
        .map(display_text)
        .filter(|s| !s.is_empty())
}

/// List-of-text field. A lone string becomes a one-element list.
pub(crate) fn list(obj: &Object, aliases: &[&str]) -> Vec<String> {
    match lookup(obj, aliases) {
        None => Vec::new(),
        Some(value) => to_list(value),
    }
}

pub(crate) fn to_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(display_text)
            .filter(|s| !s.is_empty())
            .collect(),
        other => {
            let single = display_text(other);
            if single.is_empty() {
                Vec::new()
            } else {
                vec![single]
            }
        }
    }
}

/// Numeric field. Accepts numbers and strings with a leading number
/// ("8", "8.5", "8/10").
pub(crate) fn number(obj: &Object, aliases: &[&str]) -> Option<f64> {
    match lookup(obj, aliases)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_number(s),
        _ => None,
    }
}

fn leading_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    let end = trimmed
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

/// Keys of `obj` not covered by any of the alias lists, in original order.
pub(crate) fn remaining(obj: &Object, consumed: &[&[&str]]) -> Object {
    obj.iter()
        .filter(|(key, _)| !consumed.iter().any(|aliases| aliases.contains(&key.as_str())))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Unwrap `{"<wrapper>": {...}}` when one of `wrappers` holds an object.
pub(crate) fn unwrap_named<'a>(obj: &'a Object, wrappers: &[&str]) -> Option<&'a Object> {
    wrappers
        .iter()
        .filter_map(|w| obj.get(*w))
        .find_map(Value::as_object)
}

/// Unwrap an object whose only entry is another object.
pub(crate) fn unwrap_single(obj: &Object) -> Option<&Object> {
    if obj.len() != 1 {
        return None;
    }
    obj.values().next().and_then(Value::as_object)
}
