//! Decode rows of delimited text into statically declared, typed records.
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use csvbind::Decoder;
//!
//! csvbind::record! {
//!     #[derive(Debug, Default)]
//!     pub struct Row {
//!         pub name: String => "string_field",
//!         pub count: i64 => "int_field",
//!         pub day: NaiveDate => "date_field",
//!         pub note: Option<String> => "optional_field",
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut decoder = Decoder::open("data.csv")?;
//! while let Some(row) = decoder.read_next::<Row>()? {
//!     println!("{row:?}");
//! }
//! decoder.close()?;
//! # Ok(())
//! # }
//! ```

mod error;
mod format;
mod policy;
mod reader;
mod source;

pub use csvbind_core as core;
pub use csvbind_core::{
    Bindings, DecodeError, FieldValue, FormatError, HeaderIndex, Record, Value, record,
};
pub use error::{ConstructionError, ReadError};
pub use format::FormatHandle;
pub use policy::DuplicateHeaders;
pub use reader::{Decoder, DecoderBuilder, Records};
pub use source::{CsvOptions, CsvRowSource, IterRows, RowSource, RowSourceError};
