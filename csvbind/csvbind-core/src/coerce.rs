//! Pure conversions from trimmed cell text to [`Value`].

use crate::{
    error::{CoerceError, InvalidBool},
    schema::FieldKind,
    timestamp::parse_timestamp,
    value::Value,
};

/// Timestamp formats in effect for one coercion.
#[derive(Debug, Clone, Copy)]
pub struct TimestampFormats<'a> {
    /// The field's override if present, else the decoder default.
    pub effective: &'a str,
    /// The decoder default, used to normalize fallback-parsed instants.
    pub default: &'a str,
}

impl<'a> TimestampFormats<'a> {
    pub fn new(effective: &'a str, default: &'a str) -> Self {
        Self { effective, default }
    }

    pub fn uniform(format: &'a str) -> Self {
        Self::new(format, format)
    }
}

/// Convert `raw` into a value of `kind`. The caller trims the text and
/// skips empty cells.
pub fn coerce(
    kind: FieldKind,
    raw: &str,
    formats: TimestampFormats<'_>,
) -> Result<Value, CoerceError> {
    match kind {
        FieldKind::Text => Ok(Value::text(raw)),
        FieldKind::Integer => raw
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|e| invalid(kind, raw, e)),
        FieldKind::Float => raw
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|e| invalid(kind, raw, e)),
        FieldKind::Bool => parse_bool(raw)
            .map(Value::Bool)
            .map_err(|e| invalid(kind, raw, e)),
        FieldKind::Timestamp => {
            parse_timestamp(raw, formats.effective, formats.default).map(Value::Timestamp)
        }
    }
}

/// Case-insensitive boolean parse over `true/1/yes/y` and `false/0/no/n`.
pub fn parse_bool(raw: &str) -> Result<bool, InvalidBool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        _ => Err(InvalidBool(raw.to_string())),
    }
}

fn invalid(
    kind: FieldKind,
    raw: &str,
    source: impl std::error::Error + Send + Sync + 'static,
) -> CoerceError {
    CoerceError::Invalid {
        kind,
        raw: raw.to_string(),
        source: Box::new(source),
    }
}
