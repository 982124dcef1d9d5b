//! Tokenizer-independent core types and decoding engine for `csvbind`.
//!
//! This crate provides the typed [`Value`] model, statically declared record
//! shapes ([`RecordShape`] / [`FieldDef`]), the value coercers, the timestamp
//! format resolver and the binding/populate engine used by the `csvbind`
//! decoder.
//!
//! Key components:
//! - [`coerce`] — trimmed cell text → [`Value`]
//! - [`timestamp`] — format validation, parsing and the fallback layout scan
//! - [`resolve_bindings`] — [`RecordShape`] → [`Bindings`]
//! - [`populate`] — one row of cells → one [`Record`]

mod binding;
mod coerce;
mod error;
mod header;
mod populate;
mod record;
mod schema;
pub mod timestamp;
mod value;

pub use binding::{Annotation, Bindings, FieldBinding, parse_annotation, resolve_bindings};
pub use coerce::{TimestampFormats, coerce, parse_bool};
pub use error::{
    AssignError, BindingError, BoxError, CoerceError, DecodeError, FormatError, InvalidBool,
    ValueTypeError,
};
pub use header::HeaderIndex;
pub use populate::populate;
pub use record::{FieldValue, Record};
pub use schema::{FieldDef, FieldDefs, FieldKind, RecordShape, format_record_shape};
pub use value::Value;
