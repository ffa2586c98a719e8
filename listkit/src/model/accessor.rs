//! Field accessors for sort keys and item ids.

use std::fmt;
use std::sync::Arc;

use super::Record;
use super::Value;

/// Shared function reading a [`Value`] out of an item.
pub type Getter<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;

/// Items whose fields can be read by name.
///
/// Implemented for [`Record`] and `serde_json::Value`. Typed items implement
/// [`field`](FieldAccess::field) to take part in property and path accessors.
pub trait FieldAccess {
    /// Returns the value of a top-level field.
    fn field(&self, name: &str) -> Option<Value>;

    /// Follows a path of field names through nested records.
    fn path<S: AsRef<str>>(&self, path: &[S]) -> Option<Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.field(first.as_ref())?;
        for segment in rest {
            current = current.field(segment.as_ref())?.clone();
        }
        Some(current)
    }
}

impl FieldAccess for Record {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }

    fn path<S: AsRef<str>>(&self, path: &[S]) -> Option<Value> {
        self.get_path(path).cloned()
    }
}

impl FieldAccess for serde_json::Value {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned().map(Value::from)
    }

    fn path<S: AsRef<str>>(&self, path: &[S]) -> Option<Value> {
        let mut current = self;
        for segment in path {
            current = current.get(segment.as_ref())?;
        }
        if path.is_empty() {
            return None;
        }
        Some(Value::from(current.clone()))
    }
}

impl<T: FieldAccess> FieldAccess for Arc<T> {
    fn field(&self, name: &str) -> Option<Value> {
        T::field(self, name)
    }

    fn path<S: AsRef<str>>(&self, path: &[S]) -> Option<Value> {
        T::path(self, path)
    }
}

/// How a value is read from an item.
///
/// Strings convert with [`Accessor::parse`]: a dotted string becomes a
/// [`Path`](Accessor::Path), anything else a [`Property`](Accessor::Property).
///
/// # Example
///
/// ```
/// use listkit::model::{Accessor, Record, Value};
///
/// let owner: Accessor<Record> = "owner.name".into();
/// let read = owner.resolve();
///
/// let item = Record::new().set("owner", Record::new().set("name", "ada"));
/// assert_eq!(read(&item), Value::from("ada"));
/// ```
pub enum Accessor<T> {
    /// A single top-level field.
    Property(String),
    /// A sequence of field names through nested records.
    Path(Vec<String>),
    /// An arbitrary function.
    Function(Getter<T>),
}

impl<T> Accessor<T> {
    /// Reads a single top-level field.
    pub fn property(name: impl Into<String>) -> Self {
        Accessor::Property(name.into())
    }

    /// Reads a nested field.
    pub fn path<S: Into<String>>(segments: impl IntoIterator<Item = S>) -> Self {
        Accessor::Path(segments.into_iter().map(Into::into).collect())
    }

    /// Reads a value with a function.
    pub fn function(f: impl Fn(&T) -> Value + Send + Sync + 'static) -> Self {
        Accessor::Function(Arc::new(f))
    }

    /// Parses a property name or dotted path.
    pub fn parse(spec: &str) -> Self {
        if spec.contains('.') {
            Accessor::Path(spec.split('.').map(str::to_string).collect())
        } else {
            Accessor::Property(spec.to_string())
        }
    }
}

impl<T: FieldAccess + 'static> Accessor<T> {
    /// Resolves the accessor into a getter.
    ///
    /// Missing fields and broken paths read as [`Value::Null`].
    pub fn resolve(&self) -> Getter<T> {
        match self {
            Accessor::Property(name) => {
                let name = name.clone();
                Arc::new(move |item: &T| item.field(&name).unwrap_or_default())
            }
            Accessor::Path(segments) => {
                let segments = segments.clone();
                Arc::new(move |item: &T| item.path(&segments).unwrap_or_default())
            }
            Accessor::Function(f) => Arc::clone(f),
        }
    }
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Property(name) => Accessor::Property(name.clone()),
            Accessor::Path(segments) => Accessor::Path(segments.clone()),
            Accessor::Function(f) => Accessor::Function(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Property(name) => f.debug_tuple("Property").field(name).finish(),
            Accessor::Path(segments) => f.debug_tuple("Path").field(segments).finish(),
            Accessor::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl<T> From<&str> for Accessor<T> {
    fn from(spec: &str) -> Self {
        Accessor::parse(spec)
    }
}

impl<T> From<String> for Accessor<T> {
    fn from(spec: String) -> Self {
        Accessor::parse(&spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_property_and_path() {
        assert!(matches!(Accessor::<Record>::parse("name"), Accessor::Property(n) if n == "name"));
        assert!(matches!(
            Accessor::<Record>::parse("a.b.c"),
            Accessor::Path(p) if p == ["a", "b", "c"]
        ));
    }

    #[test]
    fn test_missing_field_reads_null() {
        let read = Accessor::<Record>::property("absent").resolve();
        assert_eq!(read(&Record::new()), Value::Null);
    }

    #[test]
    fn test_json_path_access() {
        let item = serde_json::json!({ "meta": { "rank": 3 } });
        let read = Accessor::<serde_json::Value>::parse("meta.rank").resolve();
        assert_eq!(read(&item), Value::Int(3));
        assert_eq!(Accessor::<serde_json::Value>::parse("meta.none").resolve()(&item), Value::Null);
    }

    #[test]
    fn test_function_accessor() {
        let read = Accessor::function(|item: &Record| Value::from(item.fields().len())).resolve();
        assert_eq!(read(&Record::new().set("a", 1).set("b", 2)), Value::Int(2));
    }
}
