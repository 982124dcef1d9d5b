use std::{
    fmt::{Display, Formatter, Result},
    ops::Deref,
};

use crate::record::FieldValue;

/// Base kind of a record field, after unwrapping one level of `Option`.
///
/// Variant names mirror [`Value`](crate::Value) for consistency (values ↔ kinds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Integer,
    Float,
    Bool,
    Timestamp,
}

impl FieldKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Text => "string",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Bool => "bool",
            FieldKind::Timestamp => "timestamp",
        }
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.type_name())
    }
}

/// One declared member of a record type.
///
/// `annotation` uses the `name` / `name,timestampFormat` / `-` syntax; a
/// missing annotation binds the field to a column named like `ident`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub ident: String,
    pub annotation: Option<String>,
    pub kind: FieldKind,
    pub optional: bool,
}

impl FieldDef {
    pub fn new(ident: impl Into<String>, kind: FieldKind, optional: bool) -> Self {
        Self {
            ident: ident.into(),
            annotation: None,
            kind,
            optional,
        }
    }

    /// Field definition derived from the Rust type of the field.
    pub fn of<T: FieldValue>(ident: impl Into<String>) -> Self {
        Self::new(ident, T::KIND, T::OPTIONAL)
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }
}

/// Ordered collection of [`FieldDef`]; the position of a field is the index
/// passed to [`Record::assign`](crate::Record::assign).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldDefs(pub Vec<FieldDef>);

impl FieldDefs {
    pub fn new(fields: Vec<FieldDef>) -> Self {
        Self(fields)
    }

    pub fn as_slice(&self) -> &[FieldDef] {
        &self.0
    }
}

impl From<Vec<FieldDef>> for FieldDefs {
    fn from(value: Vec<FieldDef>) -> Self {
        Self(value)
    }
}

impl Deref for FieldDefs {
    type Target = [FieldDef];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

/// The declared structure of a record type.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordShape {
    pub name: String,
    pub fields: FieldDefs,
}

impl RecordShape {
    pub fn new(name: impl Into<String>, fields: impl Into<FieldDefs>) -> Self {
        Self {
            name: name.into(),
            fields: fields.into(),
        }
    }
}

impl Display for RecordShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = super::format_record_shape(self)?;
        f.write_str(&text)
    }
}
