//! Lenient readers over untrusted JSON values.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

static NUMERIC_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-+]?\d[\d,]*(?:\.\d+)?").expect("numeric token pattern is valid")
});

/// First value present under any of `keys`, skipping explicit nulls.
pub(super) fn first<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| !value.is_null())
}

/// Renders any scalar or container as display text. Lists are joined with ", ".
pub(super) fn text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| text(Some(item)))
            .filter(|item| !item.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Some(Value::Object(object)) => Value::Object(object.clone()).to_string(),
    }
}

/// Reads a list of strings; a singular value becomes a one-element list.
pub(super) fn text_list(value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| text(Some(item)))
            .filter(|item| !item.trim().is_empty())
            .collect(),
        Some(other) => {
            let single = text(Some(other));
            if single.trim().is_empty() {
                Vec::new()
            } else {
                vec![single]
            }
        }
    }
}

/// Like [`text_list`], dropping repeated entries while keeping first-seen order.
pub(super) fn unique_text_list(value: Option<&Value>) -> Vec<String> {
    let mut seen = Vec::new();
    for item in text_list(value) {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen
}

/// Outcome of reading a numeric field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Numeric {
    Absent,
    Value(f64),
    /// Present but not a finite positive number.
    Unusable,
}

impl Numeric {
    pub(super) fn value(self) -> Option<f64> {
        match self {
            Numeric::Value(value) => Some(value),
            Numeric::Absent | Numeric::Unusable => None,
        }
    }
}

/// Reads a positive number from a JSON number or the first numeric token of a
/// string such as `"10 m"` or `"<=1,000 km"`.
pub(super) fn positive_number(value: Option<&Value>) -> Numeric {
    let parsed = match value {
        None | Some(Value::Null) => return Numeric::Absent,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => return Numeric::Absent,
        Some(Value::String(s)) => NUMERIC_TOKEN
            .find(s)
            .and_then(|token| token.as_str().replace(',', "").parse::<f64>().ok()),
        Some(_) => None,
    };

    match parsed {
        Some(number) if number.is_finite() && number > 0.0 => Numeric::Value(number),
        _ => Numeric::Unusable,
    }
}

pub(super) fn boolean(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => matches!(
            s.trim().to_lowercase().as_str(),
            "true" | "yes" | "y" | "1" | "はい"
        ),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    }
}

/// Reads a string-valued mapping. A bare string is stored under `fallback_key`.
pub(super) fn text_map(value: Option<&Value>, fallback_key: &str) -> BTreeMap<String, String> {
    match value {
        Some(Value::Object(object)) => object
            .iter()
            .map(|(key, value)| (key.clone(), text(Some(value))))
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => {
            BTreeMap::from([(fallback_key.to_string(), s.clone())])
        }
        _ => BTreeMap::new(),
    }
}

/// Items of a list-valued field. A single object or scalar counts as one item.
pub(super) fn items(value: Option<&Value>) -> Vec<&Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().filter(|item| !item.is_null()).collect(),
        Some(other) => vec![other],
    }
}
