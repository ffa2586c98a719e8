//! Value enum for dynamic field values

use std::cmp::Ordering;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::Record;

/// A dynamic value read from an item field.
///
/// Sort accessors and id accessors produce `Value`s. Only a closed set of kinds
/// takes part in ordering, see [`Value::is_comparable`].
///
/// # Type Mapping
///
/// | JSON | Rust Variant |
/// |------|--------------|
/// | null | `Null` |
/// | true / false | `Bool` |
/// | integer fitting i64 | `Int` |
/// | larger integer | `BigInt` |
/// | other number | `Float` |
/// | string | `String` |
/// | array | `List` |
/// | object | `Record` |
///
/// `Decimal`, `Guid` and `DateTime` are never produced from JSON; they only
/// appear when set explicitly.
///
/// # Example
///
/// ```
/// use listkit::model::Value;
///
/// let name = Value::from("Contoso");
/// let revenue = Value::from(1_000_000i64);
/// let empty = Value::Null;
///
/// assert!(name.is_comparable());
/// assert!(revenue.is_comparable());
/// assert!(!empty.is_comparable());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// Integer outside the i64 range.
    BigInt(i128),
    /// 64-bit floating point.
    Float(f64),
    /// Arbitrary precision decimal.
    Decimal(Decimal),
    /// String value.
    String(String),
    /// GUID/UUID value.
    Guid(Uuid),
    /// Date and time.
    DateTime(DateTime<Utc>),
    /// Nested record.
    Record(Box<Record>),
    /// List of values.
    List(Vec<Value>),
}

enum Numeric {
    Exact(i128),
    Decimal(Decimal),
    Float(f64),
}

impl Numeric {
    fn as_f64(&self) -> f64 {
        match self {
            Numeric::Exact(n) => *n as f64,
            Numeric::Decimal(d) => d.to_f64().unwrap_or(f64::NAN),
            Numeric::Float(f) => *f,
        }
    }

    fn compare(&self, other: &Numeric) -> Option<Ordering> {
        match (self, other) {
            (Numeric::Exact(a), Numeric::Exact(b)) => Some(a.cmp(b)),
            (Numeric::Decimal(a), Numeric::Decimal(b)) => Some(a.cmp(b)),
            (Numeric::Exact(a), Numeric::Decimal(b)) => Decimal::try_from_i128_with_scale(*a, 0)
                .ok()
                .map(|a| a.cmp(b)),
            (Numeric::Decimal(a), Numeric::Exact(b)) => Decimal::try_from_i128_with_scale(*b, 0)
                .ok()
                .map(|b| a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::BigInt(_) => "bigint",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::Guid(_) => "guid",
            Value::DateTime(_) => "datetime",
            Value::Record(_) => "record",
            Value::List(_) => "list",
        }
    }

    /// Returns `true` if this value takes part in ordering.
    ///
    /// Null, records, lists and NaN floats are not comparable; sorting places
    /// them according to the column's [`NullOrder`](crate::sorting::NullOrder).
    pub fn is_comparable(&self) -> bool {
        match self {
            Value::Float(f) => !f.is_nan(),
            Value::Bool(_)
            | Value::Int(_)
            | Value::BigInt(_)
            | Value::Decimal(_)
            | Value::String(_)
            | Value::Guid(_)
            | Value::DateTime(_) => true,
            Value::Null | Value::Record(_) | Value::List(_) => false,
        }
    }

    fn numeric(&self) -> Option<Numeric> {
        match self {
            Value::Int(n) => Some(Numeric::Exact(i128::from(*n))),
            Value::BigInt(n) => Some(Numeric::Exact(*n)),
            Value::Decimal(d) => Some(Numeric::Decimal(*d)),
            Value::Float(f) => Some(Numeric::Float(*f)),
            _ => None,
        }
    }

    /// Natural ordering between two comparable values.
    ///
    /// Numeric kinds compare with each other by value. Other kinds only compare
    /// with themselves. Returns `None` when either side is not comparable or the
    /// kinds differ.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        if !self.is_comparable() || !other.is_comparable() {
            return None;
        }
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Guid(a), Value::Guid(b)) => Some(a.cmp(b)),
            (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
            (a, b) => a.numeric()?.compare(&b.numeric()?),
        }
    }

    /// Returns the nested value at `name` when this value is a record.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Record(record) => record.get(name),
            _ => None,
        }
    }
}

// =============================================================================
// JSON conversions
// =============================================================================

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::BigInt(i128::from(u))
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(map) => {
                let mut record = Record::new();
                for (key, value) in map {
                    record.insert(key, Value::from(value));
                }
                Value::Record(Box::new(record))
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(n) => serde_json::Value::from(n),
            Value::BigInt(n) => match i64::try_from(n) {
                Ok(n) => serde_json::Value::from(n),
                Err(_) => match u64::try_from(n) {
                    Ok(n) => serde_json::Value::from(n),
                    Err(_) => serde_json::Value::String(n.to_string()),
                },
            },
            // Non-finite floats become null, matching JSON.stringify.
            Value::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Decimal(d) => serde_json::Value::String(d.to_string()),
            Value::String(s) => serde_json::Value::String(s),
            Value::Guid(g) => serde_json::Value::String(g.to_string()),
            Value::DateTime(dt) => serde_json::Value::String(dt.to_rfc3339()),
            Value::Record(record) => serde_json::Value::Object(
                record
                    .into_fields()
                    .into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i128> for Value {
    fn from(v: i128) -> Self {
        Value::BigInt(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(n) => Value::Int(n),
            Err(_) => Value::BigInt(i128::from(v)),
        }
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::from(v as u64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Guid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Record(Box::new(v))
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}
