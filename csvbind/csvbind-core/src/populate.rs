//! Row population: one row of cells into one record.

use crate::{
    binding::{Bindings, FieldBinding},
    coerce::{TimestampFormats, coerce},
    error::{AssignError, CoerceError, DecodeError},
    header::HeaderIndex,
    record::Record,
};

/// Populate `record` from `row`.
///
/// Fields whose column is missing from `header`, or whose trimmed cell is
/// empty, are left untouched. The first failing field aborts the row; fields
/// assigned before it keep their new values.
pub fn populate<R, S>(
    record: &mut R,
    row: &[S],
    bindings: &Bindings,
    header: &HeaderIndex,
    default_format: &str,
) -> Result<(), DecodeError>
where
    R: Record,
    S: AsRef<str>,
{
    for binding in bindings.active() {
        let Some(index) = header.position(&binding.column) else {
            continue;
        };

        let cell = row.get(index).ok_or_else(|| DecodeError::OutOfBounds {
            field: binding.field.clone(),
            column: binding.column.clone(),
            index,
            len: row.len(),
        })?;

        let raw = cell.as_ref().trim();
        if raw.is_empty() {
            continue;
        }

        let effective = binding.timestamp_format.as_deref().unwrap_or(default_format);
        let value = coerce(
            binding.kind,
            raw,
            TimestampFormats::new(effective, default_format),
        )
        .map_err(|source| DecodeError::Coerce {
            field: binding.field.clone(),
            source,
        })?;

        record
            .assign(binding.index, value)
            .map_err(|source| assign_failure(binding, raw, source))?;
    }

    Ok(())
}

fn assign_failure(binding: &FieldBinding, raw: &str, source: AssignError) -> DecodeError {
    match source {
        AssignError::OutOfRange { .. } => DecodeError::Coerce {
            field: binding.field.clone(),
            source: CoerceError::Invalid {
                kind: binding.kind,
                raw: raw.to_string(),
                source: Box::new(source),
            },
        },
        source => DecodeError::Unsupported {
            field: binding.field.clone(),
            raw: raw.to_string(),
            kind: binding.kind,
            source,
        },
    }
}
