//! Field annotation parsing and binding resolution.

use std::fmt::{self, Display, Formatter};

use tracing::{debug, warn};

use crate::{
    error::BindingError,
    schema::{FieldKind, RecordShape},
    timestamp::validate_format,
};

/// Parsed `name` / `name,timestampFormat` annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotation<'a> {
    pub name: &'a str,
    pub format: Option<&'a str>,
}

impl Annotation<'_> {
    pub fn is_ignored(&self) -> bool {
        self.name == "-"
    }
}

/// Split an annotation on its first comma. Empty components count as absent.
pub fn parse_annotation(raw: &str) -> Annotation<'_> {
    match raw.split_once(',') {
        Some((name, format)) => Annotation {
            name,
            format: (!format.is_empty()).then_some(format),
        },
        None => Annotation {
            name: raw,
            format: None,
        },
    }
}

/// Resolved association between a record field and a source column.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldBinding {
    /// Position of the field in the record shape.
    pub index: usize,
    pub field: String,
    pub column: String,
    pub kind: FieldKind,
    pub optional: bool,
    /// Per-field format override; `None` follows the decoder default live.
    pub timestamp_format: Option<String>,
    pub skip: bool,
}

/// Ordered bindings for one record shape. Immutable once resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Bindings {
    shape: String,
    bindings: Vec<FieldBinding>,
}

impl Bindings {
    pub fn shape_name(&self) -> &str {
        &self.shape
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldBinding> {
        self.bindings.iter()
    }

    /// Bindings that participate in decoding.
    pub fn active(&self) -> impl Iterator<Item = &FieldBinding> {
        self.bindings.iter().filter(|b| !b.skip)
    }

    pub fn get(&self, field: &str) -> Option<&FieldBinding> {
        self.bindings.iter().find(|b| b.field == field)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Display for Bindings {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.shape)?;
        for binding in &self.bindings {
            if binding.skip {
                writeln!(f, "    {}: ignored", binding.field)?;
                continue;
            }
            write!(f, "    {} -> {} ({}", binding.field, binding.column, binding.kind)?;
            if binding.optional {
                f.write_str(", optional")?;
            }
            if let Some(format) = &binding.timestamp_format {
                write!(f, ", format {format:?}")?;
            }
            writeln!(f, ")")?;
        }
        Ok(())
    }
}

/// Resolve the bindings of `shape`.
///
/// Per-field timestamp formats are validated the same way as the decoder
/// default; the first invalid one fails the whole shape.
pub fn resolve_bindings(shape: &RecordShape) -> Result<Bindings, BindingError> {
    let mut bindings = Vec::with_capacity(shape.fields.len());

    for (index, field) in shape.fields.iter().enumerate() {
        let annotation = field.annotation.as_deref().map(parse_annotation);

        if annotation.is_some_and(|a| a.is_ignored()) {
            bindings.push(FieldBinding {
                index,
                field: field.ident.clone(),
                column: String::new(),
                kind: field.kind,
                optional: field.optional,
                timestamp_format: None,
                skip: true,
            });
            continue;
        }

        let column = annotation
            .map(|a| a.name)
            .filter(|name| !name.is_empty())
            .unwrap_or(field.ident.as_str())
            .to_string();

        let format = annotation.and_then(|a| a.format);
        let timestamp_format = match (field.kind, format) {
            (FieldKind::Timestamp, Some(format)) => {
                validate_format(format).map_err(|source| BindingError {
                    shape: shape.name.clone(),
                    field: field.ident.clone(),
                    source,
                })?;
                Some(format.to_string())
            }
            (kind, Some(format)) => {
                warn!(
                    shape = %shape.name,
                    field = %field.ident,
                    %kind,
                    format,
                    "timestamp format annotation ignored on non-timestamp field"
                );
                None
            }
            (_, None) => None,
        };

        bindings.push(FieldBinding {
            index,
            field: field.ident.clone(),
            column,
            kind: field.kind,
            optional: field.optional,
            timestamp_format,
            skip: false,
        });
    }

    debug!(shape = %shape.name, fields = bindings.len(), "resolved record bindings");

    Ok(Bindings {
        shape: shape.name.clone(),
        bindings,
    })
}
