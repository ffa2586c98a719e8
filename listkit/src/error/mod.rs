//! Error types

mod sorting;
mod storage;

pub use sorting::*;
pub use storage::*;
