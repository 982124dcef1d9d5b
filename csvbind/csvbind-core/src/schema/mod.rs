//! Statically declared record shapes.

mod format;
mod types;

pub use format::format_record_shape;
pub use types::{FieldDef, FieldDefs, FieldKind, RecordShape};
