//! Row sources: the tokenizer boundary of the decoder.

use std::io::Read;

use csvbind_core::BoxError;

/// Failure reported by a [`RowSource`].
pub type RowSourceError = BoxError;

/// An ordered, forward-only sequence of rows of cell text.
///
/// The first row yielded is the header. Implementations are never restarted.
pub trait RowSource: Send {
    /// Next row, or `None` at end of input.
    fn next_row(&mut self) -> Result<Option<Vec<String>>, RowSourceError>;

    /// Release underlying resources. Called at most once by the decoder.
    fn close(&mut self) -> Result<(), RowSourceError> {
        Ok(())
    }
}

impl<S: RowSource + ?Sized> RowSource for Box<S> {
    fn next_row(&mut self) -> Result<Option<Vec<String>>, RowSourceError> {
        (**self).next_row()
    }

    fn close(&mut self) -> Result<(), RowSourceError> {
        (**self).close()
    }
}

/// Tokenizer settings for [`CsvRowSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    pub delimiter: u8,
    pub quote: u8,
    pub comment: Option<u8>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            comment: None,
        }
    }
}

/// [`RowSource`] backed by the `csv` crate.
///
/// Rows may have differing lengths; short rows are reported per field by the
/// populator rather than rejected by the tokenizer.
pub struct CsvRowSource<R> {
    reader: csv::Reader<R>,
    record: csv::StringRecord,
}

impl<R: Read> CsvRowSource<R> {
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, CsvOptions::default())
    }

    pub fn with_options(reader: R, options: CsvOptions) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(options.delimiter)
            .quote(options.quote)
            .comment(options.comment)
            .from_reader(reader);
        Self {
            reader,
            record: csv::StringRecord::new(),
        }
    }
}

impl<R: Read + Send> RowSource for CsvRowSource<R> {
    fn next_row(&mut self) -> Result<Option<Vec<String>>, RowSourceError> {
        if !self.reader.read_record(&mut self.record)? {
            return Ok(None);
        }
        Ok(Some(self.record.iter().map(str::to_string).collect()))
    }
}

/// In-memory [`RowSource`] over any iterator of rows.
#[derive(Debug, Clone)]
pub struct IterRows<I> {
    rows: I,
}

impl<I> IterRows<I> {
    pub fn new(rows: I) -> Self {
        Self { rows }
    }
}

impl<I, Row, Cell> RowSource for IterRows<I>
where
    I: Iterator<Item = Row> + Send,
    Row: IntoIterator<Item = Cell>,
    Cell: Into<String>,
{
    fn next_row(&mut self) -> Result<Option<Vec<String>>, RowSourceError> {
        Ok(self
            .rows
            .next()
            .map(|row| row.into_iter().map(Into::into).collect()))
    }
}
