//! Error types for coercion, binding and row population.

use crate::schema::FieldKind;

/// Boxed cause used where the underlying error type varies.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error returned when a [`Value`](crate::Value) accessor is called on a
/// value of another kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("value type mismatch: expected {expected}, found {actual}")]
pub struct ValueTypeError {
    pub expected: FieldKind,
    pub actual: FieldKind,
}

impl ValueTypeError {
    pub fn new(expected: FieldKind, actual: FieldKind) -> Self {
        Self { expected, actual }
    }
}

/// Raised when text is not in the accepted boolean vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid boolean value: {0}")]
pub struct InvalidBool(pub String);

/// Error returned by [`Record::assign`](crate::Record::assign).
#[derive(Debug, thiserror::Error)]
pub enum AssignError {
    /// The field does not accept values of this kind.
    #[error(transparent)]
    Type(#[from] ValueTypeError),

    /// The value parsed but does not fit the field's width.
    #[error("value {value} does not fit in {target}")]
    OutOfRange { value: String, target: &'static str },

    /// The shape declares fewer fields than the requested index.
    #[error("record has no field at index {index}")]
    UnknownField { index: usize },
}

/// Failure of a single value coercer. Carries the raw text and the kind
/// that was attempted.
#[derive(Debug, thiserror::Error)]
pub enum CoerceError {
    #[error("error converting value '{raw}' to {kind}: {source}")]
    Invalid {
        kind: FieldKind,
        raw: String,
        #[source]
        source: BoxError,
    },

    /// No pattern (effective format or fallback layout) parsed the text.
    #[error("error converting value '{raw}' to timestamp with format '{format}': {source}")]
    Timestamp {
        raw: String,
        format: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl CoerceError {
    pub fn kind(&self) -> FieldKind {
        match self {
            CoerceError::Invalid { kind, .. } => *kind,
            CoerceError::Timestamp { .. } => FieldKind::Timestamp,
        }
    }

    pub fn raw(&self) -> &str {
        match self {
            CoerceError::Invalid { raw, .. } | CoerceError::Timestamp { raw, .. } => raw,
        }
    }
}

/// Rejected timestamp format string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("timestamp format cannot be empty")]
    Empty,

    #[error("timestamp format '{format}' contains an unsupported specifier")]
    UnsupportedSpecifier { format: String },

    #[error("timestamp format '{format}' must contain at least year, month and day components")]
    MissingComponents { format: String },

    #[error("timestamp format '{format}' cannot parse its own output '{rendered}': {reason}")]
    Unparseable {
        format: String,
        rendered: String,
        reason: String,
    },

    #[error("timestamp format '{format}' is inconsistent: rendered '{rendered}', re-rendered '{reparsed}'")]
    Inconsistent {
        format: String,
        rendered: String,
        reparsed: String,
    },
}

/// A record shape whose field annotation cannot be bound.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid binding for field '{field}' of {shape}: {source}")]
pub struct BindingError {
    pub shape: String,
    pub field: String,
    #[source]
    pub source: FormatError,
}

/// Per-field failure while populating a record from one row.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The row has no cell at the bound column's position.
    #[error("field {field}: column '{column}' (index {index}) is out of range for a row of {len} fields")]
    OutOfBounds {
        field: String,
        column: String,
        index: usize,
        len: usize,
    },

    #[error("field {field}: {source}")]
    Coerce {
        field: String,
        #[source]
        source: CoerceError,
    },

    /// The coerced value was refused by the record.
    #[error("field {field}: error with value '{raw}' of type {kind}: {source}")]
    Unsupported {
        field: String,
        raw: String,
        kind: FieldKind,
        #[source]
        source: AssignError,
    },
}

impl DecodeError {
    /// Identifier of the offending record field.
    pub fn field(&self) -> &str {
        match self {
            DecodeError::OutOfBounds { field, .. }
            | DecodeError::Coerce { field, .. }
            | DecodeError::Unsupported { field, .. } => field,
        }
    }

    /// Raw (trimmed) cell text, when a cell was read.
    pub fn raw(&self) -> Option<&str> {
        match self {
            DecodeError::OutOfBounds { .. } => None,
            DecodeError::Coerce { source, .. } => Some(source.raw()),
            DecodeError::Unsupported { raw, .. } => Some(raw),
        }
    }

    /// Target kind that was attempted, when coercion was reached.
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            DecodeError::OutOfBounds { .. } => None,
            DecodeError::Coerce { source, .. } => Some(source.kind()),
            DecodeError::Unsupported { kind, .. } => Some(*kind),
        }
    }
}
