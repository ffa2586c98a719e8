//! Item data model: dynamic values, records and field accessors.

mod accessor;
mod record;
mod value;

pub use accessor::*;
pub use record::*;
pub use value::*;
