//! Record traits and the `record!` declaration macro.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::{
    error::AssignError,
    schema::{FieldKind, RecordShape},
    value::Value,
};

/// A record type that rows can be decoded into.
///
/// The shape is a static field table; `assign` writes a coerced value into
/// the field at the given position of that table. Implementations are
/// usually generated with [`record!`](crate::record), but can be written by
/// hand for types that need custom conversions.
pub trait Record: Default + 'static {
    fn shape() -> RecordShape;

    fn assign(&mut self, index: usize, value: Value) -> Result<(), AssignError>;
}

/// A Rust type usable as a record field.
///
/// `KIND` is the base kind after unwrapping one level of `Option`.
pub trait FieldValue: Sized {
    const KIND: FieldKind;
    const OPTIONAL: bool = false;

    fn from_value(value: Value) -> Result<Self, AssignError>;
}

macro_rules! impl_field_value {
    ($ty:ty, $kind:ident, |$value:ident| $convert:expr) => {
        impl FieldValue for $ty {
            const KIND: FieldKind = FieldKind::$kind;

            fn from_value($value: Value) -> Result<Self, AssignError> {
                $convert
            }
        }

        impl FieldValue for Option<$ty> {
            const KIND: FieldKind = FieldKind::$kind;
            const OPTIONAL: bool = true;

            fn from_value(value: Value) -> Result<Self, AssignError> {
                <$ty as FieldValue>::from_value(value).map(Some)
            }
        }
    };
}

macro_rules! impl_integer_field_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl_field_value!($ty, Integer, |value| {
                let v = value.try_i64()?;
                <$ty>::try_from(v).map_err(|_| AssignError::OutOfRange {
                    value: v.to_string(),
                    target: stringify!($ty),
                })
            });
        )*
    };
}

impl_integer_field_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl_field_value!(String, Text, |value| Ok(value.try_text()?));
impl_field_value!(bool, Bool, |value| Ok(value.try_bool()?));
impl_field_value!(f64, Float, |value| Ok(value.try_f64()?));
impl_field_value!(f32, Float, |value| {
    let v = value.try_f64()?;
    let narrowed = v as f32;
    if v.is_finite() && narrowed.is_infinite() {
        return Err(AssignError::OutOfRange {
            value: v.to_string(),
            target: "f32",
        });
    }
    Ok(narrowed)
});
impl_field_value!(DateTime<Utc>, Timestamp, |value| Ok(value.try_timestamp()?));
impl_field_value!(NaiveDateTime, Timestamp, |value| Ok(value
    .try_timestamp()?
    .naive_utc()));
impl_field_value!(NaiveDate, Timestamp, |value| Ok(value
    .try_timestamp()?
    .date_naive()));

/// Declare a struct and implement [`Record`] for it.
///
/// Each field may carry an annotation after `=>`: `"column"`,
/// `"column,timestampFormat"` or `"-"` (ignored). Without one the column
/// name is the field identifier. The struct must implement `Default`.
///
/// ```
/// use chrono::NaiveDate;
///
/// csvbind_core::record! {
///     #[derive(Debug, Default)]
///     pub struct Trade {
///         pub symbol: String => "ticker",
///         pub price: f64,
///         pub settled: Option<NaiveDate> => "settle_date,%d/%m/%Y",
///         pub note: String => "-",
///     }
/// }
///
/// let shape = <Trade as csvbind_core::Record>::shape();
/// assert_eq!(shape.fields.len(), 4);
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $(=> $annotation:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::Record for $name {
            fn shape() -> $crate::RecordShape {
                $crate::RecordShape::new(
                    stringify!($name),
                    vec![
                        $(
                            $crate::FieldDef::of::<$ty>(stringify!($field))
                                $(.with_annotation($annotation))?,
                        )*
                    ],
                )
            }

            #[allow(unused_assignments)]
            fn assign(
                &mut self,
                index: usize,
                value: $crate::Value,
            ) -> ::std::result::Result<(), $crate::AssignError> {
                let mut position = 0usize;
                $(
                    if index == position {
                        self.$field = <$ty as $crate::FieldValue>::from_value(value)?;
                        return Ok(());
                    }
                    position += 1;
                )*
                Err($crate::AssignError::UnknownField { index })
            }
        }
    };
}
