//! Typed intermediate representation produced by the value coercers.

use chrono::{DateTime, Utc};

use crate::{error::ValueTypeError, schema::FieldKind};

/// Value produced by [`coerce`](crate::coerce).
///
/// Optionality is a property of the receiving field, not of the value: an
/// empty cell never produces a `Value` at all.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Value::Text(_) => FieldKind::Text,
            Value::Integer(_) => FieldKind::Integer,
            Value::Float(_) => FieldKind::Float,
            Value::Bool(_) => FieldKind::Bool,
            Value::Timestamp(_) => FieldKind::Timestamp,
        }
    }

    pub fn try_text(self) -> Result<String, ValueTypeError> {
        match self {
            Value::Text(v) => Ok(v),
            other => Err(other.type_mismatch(FieldKind::Text)),
        }
    }

    pub fn try_i64(&self) -> Result<i64, ValueTypeError> {
        match self {
            Value::Integer(v) => Ok(*v),
            _ => Err(self.type_mismatch(FieldKind::Integer)),
        }
    }

    pub fn try_f64(&self) -> Result<f64, ValueTypeError> {
        match self {
            Value::Float(v) => Ok(*v),
            _ => Err(self.type_mismatch(FieldKind::Float)),
        }
    }

    pub fn try_bool(&self) -> Result<bool, ValueTypeError> {
        match self {
            Value::Bool(v) => Ok(*v),
            _ => Err(self.type_mismatch(FieldKind::Bool)),
        }
    }

    pub fn try_timestamp(&self) -> Result<DateTime<Utc>, ValueTypeError> {
        match self {
            Value::Timestamp(v) => Ok(*v),
            _ => Err(self.type_mismatch(FieldKind::Timestamp)),
        }
    }

    pub fn type_mismatch(&self, expected: FieldKind) -> ValueTypeError {
        ValueTypeError::new(expected, self.kind())
    }
}
