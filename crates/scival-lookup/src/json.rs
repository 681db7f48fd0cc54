//! Null-safe traversal and integer coercion over API documents.
//!
//! The lookup endpoint returns loosely typed JSON: numeric fields sometimes
//! arrive as strings and any key may be missing. These helpers never fail;
//! a missing path is `None` and an uncoercible value is handed back as is.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Result of [`coerce_int`]: an integer, or the original value untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Coerced {
    /// The value represented an integer.
    Int(i64),
    /// The value passed through unchanged.
    Raw(Value),
}

impl Coerced {
    /// The integer, if coercion succeeded.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Raw(_) => None,
        }
    }

    /// True when the underlying value is JSON `null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Raw(Value::Null))
    }
}

impl PartialEq<i64> for Coerced {
    fn eq(&self, other: &i64) -> bool {
        self.as_i64() == Some(*other)
    }
}

impl From<i64> for Coerced {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl fmt::Display for Coerced {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Raw(Value::String(s)) => f.write_str(s),
            Self::Raw(other) => write!(f, "{other}"),
        }
    }
}

/// Walk `path` through nested objects (and arrays, for numeric segments).
///
/// Returns `None` if any segment is missing, a segment hits a scalar, or the
/// final value is `null`.
#[must_use]
pub fn chained_get<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for key in path {
        current = match current {
            Value::Object(map) => map.get(*key)?,
            Value::Array(items) => items.get(key.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    (!current.is_null()).then_some(current)
}

/// [`chained_get`] narrowed to a string.
#[must_use]
pub fn chained_str<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    chained_get(value, path)?.as_str()
}

/// The `link.@href` of an API record.
#[must_use]
pub fn link_href(value: &Value) -> Option<&str> {
    chained_str(value, &["link", "@href"])
}

/// Convert `value` to an integer when it safely represents one.
///
/// Integers pass straight through, finite floats truncate toward zero,
/// booleans become 0/1 and strings are parsed after trimming whitespace.
/// Everything else, `null` included, comes back unchanged as [`Coerced::Raw`].
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn coerce_int(value: &Value) -> Coerced {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Coerced::Int(i);
            }
            match n.as_f64().map(f64::trunc) {
                Some(f) if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    Coerced::Int(f as i64)
                }
                _ => Coerced::Raw(value.clone()),
            }
        }
        Value::Bool(b) => Coerced::Int(i64::from(*b)),
        Value::String(s) => {
            s.trim().parse::<i64>().map_or_else(|_| Coerced::Raw(value.clone()), Coerced::Int)
        }
        Value::Null | Value::Array(_) | Value::Object(_) => Coerced::Raw(value.clone()),
    }
}
