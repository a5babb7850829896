//! Runtime property values.
//!
//! A component receives an arbitrary bag of properties. [`PropValue`] models a
//! single entry of that bag: scalars, booleans, nested maps (responsive values
//! and pseudo-selector blocks), and the two "missing" markers `Null` and
//! `Undefined`, which the resolver stringifies rather than rejects.
//!
//! [`PropMap`] keeps insertion order. The processor walks caller properties in
//! the order they were supplied, so later entries overwrite earlier ones in the
//! resolved style.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// Insertion-ordered property bag.
pub type PropMap = IndexMap<String, PropValue>;

/// Numeric value, stored in one of three variants to preserve precision.
///
/// `Display` prints the number the way a style sheet expects to read it:
/// integers without a fractional part, `-0` as `0`, non-finite values as
/// `Infinity`, `-Infinity` and `NaN`, and magnitudes from `1e21` up or below
/// `1e-6` in exponent form (`1e+21`, `1.5e-7`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Returns `true` for zero and NaN, the two falsy numbers.
    pub fn is_falsy(self) -> bool {
        let n = self.to_f64();
        n == 0.0 || n.is_nan()
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::I64(n) => write!(f, "{}", n),
            Number::U64(n) => write!(f, "{}", n),
            Number::F64(n) if n.is_nan() => f.write_str("NaN"),
            Number::F64(n) if n.is_infinite() => {
                f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Number::F64(n) if n == 0.0 => f.write_str("0"),
            Number::F64(n) if n.abs() >= 1e21 || n.abs() < 1e-6 => {
                let exponent = format!("{:e}", n);
                match exponent.split_once('e') {
                    Some((mantissa, exp)) if !exp.starts_with('-') => {
                        write!(f, "{}e+{}", mantissa, exp)
                    }
                    _ => f.write_str(&exponent),
                }
            }
            Number::F64(n) => write!(f, "{}", n),
        }
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::I64(n as i64)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::I64(n)
    }
}

impl From<u32> for Number {
    fn from(n: u32) -> Self {
        Number::U64(n as u64)
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Number::U64(n)
    }
}

impl From<f32> for Number {
    fn from(n: f32) -> Self {
        Number::F64(n as f64)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::F64(n)
    }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::I64(i)
        } else if let Some(u) = n.as_u64() {
            Number::U64(u)
        } else {
            Number::F64(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

/// A single caller-supplied property value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PropValue {
    /// Explicit null.
    Null,
    /// Explicitly missing value.
    #[default]
    Undefined,
    /// Boolean flag (`true` switches a fixed shorthand on).
    Bool(bool),
    /// Numeric value; rendered with a `px` suffix in style position.
    Number(Number),
    /// String value; color tokens are resolved in style position.
    String(String),
    /// Nested map: a responsive value or a pseudo-selector block.
    Map(PropMap),
}

impl PropValue {
    /// Returns `true` if this is a `Map` value.
    pub fn is_map(&self) -> bool {
        matches!(self, PropValue::Map(_))
    }

    /// Returns `true` if this value is a string or a number.
    pub fn is_scalar(&self) -> bool {
        matches!(self, PropValue::String(_) | PropValue::Number(_))
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the map, if present.
    pub fn as_map(&self) -> Option<&PropMap> {
        match self {
            PropValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns `true` for values that count as "not given": null, undefined,
    /// `false`, zero, NaN and the empty string.
    pub fn is_falsy(&self) -> bool {
        match self {
            PropValue::Null | PropValue::Undefined => true,
            PropValue::Bool(b) => !b,
            PropValue::Number(n) => n.is_falsy(),
            PropValue::String(s) => s.is_empty(),
            PropValue::Map(_) => false,
        }
    }

    /// Returns the value as a lookup key, used to select a variant option.
    ///
    /// Strings, numbers and booleans have a key form; maps and the missing
    /// markers do not.
    pub fn as_key(&self) -> Option<Cow<'_, str>> {
        match self {
            PropValue::String(s) => Some(Cow::Borrowed(s)),
            PropValue::Number(n) => Some(Cow::Owned(n.to_string())),
            PropValue::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            _ => None,
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Null => f.write_str("null"),
            PropValue::Undefined => f.write_str("undefined"),
            PropValue::Bool(b) => write!(f, "{}", b),
            PropValue::Number(n) => write!(f, "{}", n),
            PropValue::String(s) => f.write_str(s),
            PropValue::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::String(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::String(s)
    }
}

impl From<Number> for PropValue {
    fn from(n: Number) -> Self {
        PropValue::Number(n)
    }
}

impl From<i32> for PropValue {
    fn from(n: i32) -> Self {
        PropValue::Number(n.into())
    }
}

impl From<i64> for PropValue {
    fn from(n: i64) -> Self {
        PropValue::Number(n.into())
    }
}

impl From<u32> for PropValue {
    fn from(n: u32) -> Self {
        PropValue::Number(n.into())
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n.into())
    }
}

impl From<PropMap> for PropValue {
    fn from(map: PropMap) -> Self {
        PropValue::Map(map)
    }
}

impl From<serde_json::Value> for PropValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => PropValue::Null,
            serde_json::Value::Bool(b) => PropValue::Bool(b),
            serde_json::Value::Number(n) => PropValue::Number(Number::from(&n)),
            serde_json::Value::String(s) => PropValue::String(s),
            // Arrays are kept as comma-joined text.
            serde_json::Value::Array(items) => PropValue::String(
                items
                    .into_iter()
                    .map(|item| PropValue::from(item).to_string())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            serde_json::Value::Object(map) => PropValue::Map(
                map.into_iter()
                    .map(|(key, value)| (key, PropValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for PropValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PropValue::Null | PropValue::Undefined => serializer.serialize_unit(),
            PropValue::Bool(b) => serializer.serialize_bool(*b),
            PropValue::Number(Number::I64(n)) => serializer.serialize_i64(*n),
            PropValue::Number(Number::U64(n)) => serializer.serialize_u64(*n),
            PropValue::Number(Number::F64(n)) => serializer.serialize_f64(*n),
            PropValue::String(s) => serializer.serialize_str(s),
            PropValue::Map(map) => map.serialize(serializer),
        }
    }
}

/// Converts a JSON object into a property bag.
///
/// Non-object values produce an empty bag.
pub fn props_from_json(value: serde_json::Value) -> PropMap {
    match PropValue::from(value) {
        PropValue::Map(map) => map,
        _ => PropMap::new(),
    }
}
