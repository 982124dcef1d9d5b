use std::fmt::{Error, Result, Write as _};

use super::{FieldDef, RecordShape};

/// Format a record shape in a readable style: one line per field with its
/// kind, optionality and annotation.
pub fn format_record_shape(shape: &RecordShape) -> std::result::Result<String, Error> {
    let mut out = String::new();
    writeln!(out, "{}:", shape.name)?;

    for field in shape.fields.iter() {
        format_field(field, 4, &mut out)?;
    }

    Ok(out)
}

fn format_field(field: &FieldDef, indent: usize, out: &mut String) -> Result {
    let pad = " ".repeat(indent);
    write!(
        out,
        "{pad}{}: {{ kind: {}, optional: {}",
        field.ident, field.kind, field.optional
    )?;
    if let Some(annotation) = &field.annotation {
        write!(out, ", annotation: {annotation:?}")?;
    }
    writeln!(out, " }}")
}
