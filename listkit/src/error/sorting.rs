//! Sorting configuration errors

/// A null ordering name that is not one of `small`, `large`, `first` or `last`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown null ordering '{0}', expected small, large, first or last")]
pub struct ParseNullOrderError(pub String);
