//! Row identifiers read from dynamic items.

use std::fmt;

use uuid::Uuid;

use crate::model::Value;

/// Default field holding an item's id.
pub const DEFAULT_ID_FIELD: &str = "id";

/// Identifier of a dynamic item.
///
/// Produced from the id field of a [`Record`](crate::model::Record) or JSON item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RowId {
    /// Integer id.
    Int(i64),
    /// String id.
    Str(String),
    /// GUID id.
    Guid(Uuid),
}

impl RowId {
    /// Converts a field value into an id.
    ///
    /// Integral numbers, strings and GUIDs are ids. Anything else, including
    /// null and fractional numbers, is not.
    pub fn from_value(value: &Value) -> Option<RowId> {
        match value {
            Value::Int(n) => Some(RowId::Int(*n)),
            Value::BigInt(n) => i64::try_from(*n).ok().map(RowId::Int),
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Some(RowId::Int(*f as i64))
            }
            Value::String(s) => Some(RowId::Str(s.clone())),
            Value::Guid(g) => Some(RowId::Guid(*g)),
            _ => None,
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Int(n) => write!(f, "{}", n),
            RowId::Str(s) => f.write_str(s),
            RowId::Guid(g) => write!(f, "{}", g),
        }
    }
}

impl From<i64> for RowId {
    fn from(v: i64) -> Self {
        RowId::Int(v)
    }
}

impl From<i32> for RowId {
    fn from(v: i32) -> Self {
        RowId::Int(i64::from(v))
    }
}

impl From<&str> for RowId {
    fn from(v: &str) -> Self {
        RowId::Str(v.to_string())
    }
}

impl From<String> for RowId {
    fn from(v: String) -> Self {
        RowId::Str(v)
    }
}

impl From<Uuid> for RowId {
    fn from(v: Uuid) -> Self {
        RowId::Guid(v)
    }
}
