//! Record decoder over a row source.

use std::{
    any::TypeId,
    collections::{HashMap, hash_map::Entry},
    fmt,
    fs::File,
    io::Read,
    marker::PhantomData,
    path::Path,
    sync::Arc,
};

use csvbind_core::{
    BindingError, Bindings, FormatError, HeaderIndex, Record, populate, resolve_bindings,
    timestamp::DEFAULT_FORMAT,
};

use tracing::{debug, trace, warn};

use crate::{
    error::{ConstructionError, ReadError},
    format::FormatHandle,
    policy::DuplicateHeaders,
    source::{CsvOptions, CsvRowSource, RowSource},
};

/// Reads typed records from a row source whose first row is the header.
pub struct Decoder {
    source: Option<Box<dyn RowSource>>,
    header: HeaderIndex,
    format: FormatHandle,
    bindings: HashMap<TypeId, Arc<Bindings>>,
    rows_read: u64,
}

impl fmt::Debug for Decoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("headers", &self.header.names())
            .field("default_timestamp_format", &self.format)
            .field("rows_read", &self.rows_read)
            .field("closed", &self.source.is_none())
            .finish()
    }
}

/// Builder for configuring [`Decoder`].
#[derive(Debug, Clone)]
pub struct DecoderBuilder {
    csv: CsvOptions,
    default_format: String,
    duplicate_headers: DuplicateHeaders,
}

impl Default for DecoderBuilder {
    fn default() -> Self {
        Self {
            csv: CsvOptions::default(),
            default_format: DEFAULT_FORMAT.to_string(),
            duplicate_headers: DuplicateHeaders::default(),
        }
    }
}

impl DecoderBuilder {
    /// Field delimiter for CSV input (default `,`).
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.csv.delimiter = delimiter;
        self
    }

    /// Quote character for CSV input (default `"`).
    pub fn with_quote(mut self, quote: u8) -> Self {
        self.csv.quote = quote;
        self
    }

    /// Lines starting with `comment` are skipped (default: none).
    pub fn with_comment(mut self, comment: Option<u8>) -> Self {
        self.csv.comment = comment;
        self
    }

    /// Initial default timestamp format. Validated when the decoder is built.
    pub fn with_default_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.default_format = format.into();
        self
    }

    pub fn with_duplicate_headers(mut self, policy: DuplicateHeaders) -> Self {
        self.duplicate_headers = policy;
        self
    }

    /// Open the CSV file at `path`.
    pub fn open(self, path: impl AsRef<Path>) -> Result<Decoder, ConstructionError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConstructionError::Open {
            path: path.display().to_string(),
            source,
        })?;
        self.from_reader(file)
    }

    /// Read CSV from any reader.
    pub fn from_reader<R>(self, reader: R) -> Result<Decoder, ConstructionError>
    where
        R: Read + Send + 'static,
    {
        let source = CsvRowSource::with_options(reader, self.csv);
        self.from_source(source)
    }

    pub fn from_source<S>(self, source: S) -> Result<Decoder, ConstructionError>
    where
        S: RowSource + 'static,
    {
        let mut source: Box<dyn RowSource> = Box::new(source);
        let format = FormatHandle::new(self.default_format)?;

        let names = source
            .next_row()
            .map_err(ConstructionError::Header)?
            .ok_or(ConstructionError::EmptyInput)?;
        if names.is_empty() {
            return Err(ConstructionError::EmptyHeader);
        }

        let header = HeaderIndex::new(names);
        if let Some(name) = header.duplicates().first() {
            match self.duplicate_headers {
                DuplicateHeaders::Reject => {
                    return Err(ConstructionError::DuplicateHeader { name: name.clone() });
                }
                DuplicateHeaders::LastWins => warn!(
                    duplicates = ?header.duplicates(),
                    "duplicate header columns, last occurrence wins"
                ),
            }
        }
        debug!(columns = header.len(), "header index built");

        Ok(Decoder {
            source: Some(source),
            header,
            format,
            bindings: HashMap::new(),
            rows_read: 0,
        })
    }
}

impl Decoder {
    /// Create a builder for [`Decoder`].
    pub fn builder() -> DecoderBuilder {
        DecoderBuilder::default()
    }

    /// Open the CSV file at `path` with default settings.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ConstructionError> {
        Self::builder().open(path)
    }

    pub fn from_reader<R>(reader: R) -> Result<Self, ConstructionError>
    where
        R: Read + Send + 'static,
    {
        Self::builder().from_reader(reader)
    }

    pub fn from_source<S>(source: S) -> Result<Self, ConstructionError>
    where
        S: RowSource + 'static,
    {
        Self::builder().from_source(source)
    }

    /// Header names in file order.
    pub fn headers(&self) -> &[String] {
        self.header.names()
    }

    pub fn header_index(&self) -> &HeaderIndex {
        &self.header
    }

    pub fn default_timestamp_format(&self) -> Arc<String> {
        self.format.get()
    }

    /// Replace the default timestamp format used by subsequent reads.
    ///
    /// The candidate is validated first; on error the current format is kept.
    pub fn set_default_timestamp_format(&self, format: &str) -> Result<(), FormatError> {
        self.format.set(format)
    }

    /// Handle to the default timestamp format, usable from other threads.
    pub fn format_handle(&self) -> FormatHandle {
        self.format.clone()
    }

    /// Number of data rows consumed so far, including rows that failed to
    /// decode or could not be read.
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }

    pub fn is_closed(&self) -> bool {
        self.source.is_none()
    }

    /// Resolved bindings for `R`, computed once per record type.
    pub fn bindings<R: Record>(&mut self) -> Result<Arc<Bindings>, BindingError> {
        match self.bindings.entry(TypeId::of::<R>()) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let bindings = Arc::new(resolve_bindings(&R::shape())?);
                Ok(Arc::clone(entry.insert(bindings)))
            }
        }
    }

    /// Read the next row into a fresh `R`. Returns `Ok(None)` at end of input.
    pub fn read_next<R: Record>(&mut self) -> Result<Option<R>, ReadError> {
        let mut record = R::default();
        Ok(self.read_into(&mut record)?.then_some(record))
    }

    /// Read the next row into `record`. Returns `Ok(false)` at end of input.
    ///
    /// On a decode error, fields assigned before the failing one keep their
    /// new values.
    pub fn read_into<R: Record>(&mut self, record: &mut R) -> Result<bool, ReadError> {
        if self.source.is_none() {
            return Err(ReadError::Closed);
        }
        let bindings = self.bindings::<R>()?;
        let Some(source) = self.source.as_mut() else {
            return Err(ReadError::Closed);
        };

        let row_number = self.rows_read + 1;
        let row = match source.next_row() {
            Ok(Some(row)) => row,
            Ok(None) => {
                trace!(rows_read = self.rows_read, "end of input");
                return Ok(false);
            }
            Err(source) => {
                // The failed row still occupies a row number.
                self.rows_read = row_number;
                return Err(ReadError::Source {
                    row: row_number,
                    source,
                });
            }
        };
        self.rows_read = row_number;

        let format = self.format.get();
        populate(record, &row, &bindings, &self.header, &format).map_err(|source| {
            ReadError::Decode {
                row: row_number,
                source,
            }
        })?;
        Ok(true)
    }

    /// Iterate over the remaining rows as `R`.
    ///
    /// A row that fails to decode is yielded as an error and iteration
    /// continues with the next row. Iteration stops at end of input, after
    /// a row source failure, or when the decoder is closed.
    pub fn records<R: Record>(&mut self) -> Records<'_, R> {
        Records {
            decoder: self,
            done: false,
            _record: PhantomData,
        }
    }

    /// Release the row source. Closing an already closed decoder is a no-op.
    pub fn close(&mut self) -> Result<(), ReadError> {
        let Some(mut source) = self.source.take() else {
            return Ok(());
        };
        source.close().map_err(ReadError::Close)?;
        debug!(rows_read = self.rows_read, "decoder closed");
        Ok(())
    }
}

/// Iterator returned by [`Decoder::records`].
pub struct Records<'a, R> {
    decoder: &'a mut Decoder,
    done: bool,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> Iterator for Records<'_, R> {
    type Item = Result<R, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.decoder.read_next::<R>() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) | Err(ReadError::Closed) => {
                self.done = true;
                None
            }
            Err(err @ ReadError::Decode { .. }) => Some(Err(err)),
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
