//! Dynamic item record

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use super::Value;

/// A dynamic list item.
///
/// Records hold field values as a `HashMap<String, Value>`, allowing property
/// and dotted-path accessors to reach any field. Records (de)serialize as plain
/// JSON objects.
///
/// # Example
///
/// ```
/// use listkit::model::{Record, Value};
///
/// let record = Record::new()
///     .set("id", 7)
///     .set("name", "Contoso");
///
/// assert_eq!(record.get("name"), Some(&Value::from("Contoso")));
/// assert_eq!(record.get("id"), Some(&Value::Int(7)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Consumes the record and returns its fields.
    pub fn into_fields(self) -> HashMap<String, Value> {
        self.fields
    }

    /// Follows a dotted path through nested records.
    ///
    /// Returns `None` as soon as a segment is missing or a non-record value
    /// is reached before the last segment.
    pub fn get_path<S: AsRef<str>>(&self, path: &[S]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.get(first.as_ref())?;
        for segment in rest {
            current = current.field(segment.as_ref())?;
        }
        Some(current)
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }
}
