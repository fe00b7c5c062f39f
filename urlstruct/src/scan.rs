//! Conversion of raw query strings into typed field values.
//!
//! [`ScanValue`] turns one raw string into one value. The container routines
//! (`scan_scalar`, `scan_optional`, `scan_list`) decide how a field consumes
//! the full list of raw values supplied for its key. Every routine parses
//! before assigning, so a failed conversion leaves the field untouched.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;

use crate::errors::ConversionError;

/// Format accepted for `NaiveDate` fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Format accepted for `NaiveDateTime` fields.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A type that can be parsed from a single raw query value.
///
/// Implement this for custom field types and mark the field with
/// `#[urlstruct(scan)]`.
pub trait ScanValue: Sized {
    /// Type name reported in conversion errors.
    const TYPE_NAME: &'static str;

    fn scan_value(raw: &str) -> Result<Self, ConversionError>;
}

macro_rules! impl_scan_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ScanValue for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn scan_value(raw: &str) -> Result<Self, ConversionError> {
                    raw.parse::<$ty>()
                        .map_err(|err| ConversionError::new(raw, Self::TYPE_NAME, err.to_string()))
                }
            }
        )*
    };
}

impl_scan_from_str!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char,
);

impl ScanValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn scan_value(raw: &str) -> Result<Self, ConversionError> {
        match raw {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err(ConversionError::new(raw, Self::TYPE_NAME, "expected a boolean token")),
        }
    }
}

impl ScanValue for String {
    const TYPE_NAME: &'static str = "String";

    fn scan_value(raw: &str) -> Result<Self, ConversionError> {
        Ok(raw.to_string())
    }
}

impl ScanValue for DateTime<Utc> {
    const TYPE_NAME: &'static str = "DateTime<Utc>";

    fn scan_value(raw: &str) -> Result<Self, ConversionError> {
        DateTime::parse_from_rfc3339(raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|err| ConversionError::new(raw, Self::TYPE_NAME, err.to_string()))
    }
}

impl ScanValue for DateTime<FixedOffset> {
    const TYPE_NAME: &'static str = "DateTime<FixedOffset>";

    fn scan_value(raw: &str) -> Result<Self, ConversionError> {
        DateTime::parse_from_rfc3339(raw).map_err(|err| ConversionError::new(raw, Self::TYPE_NAME, err.to_string()))
    }
}

impl ScanValue for NaiveDate {
    const TYPE_NAME: &'static str = "NaiveDate";

    fn scan_value(raw: &str) -> Result<Self, ConversionError> {
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|err| ConversionError::new(raw, Self::TYPE_NAME, err.to_string()))
    }
}

impl ScanValue for NaiveDateTime {
    const TYPE_NAME: &'static str = "NaiveDateTime";

    fn scan_value(raw: &str) -> Result<Self, ConversionError> {
        NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT)
            .map_err(|err| ConversionError::new(raw, Self::TYPE_NAME, err.to_string()))
    }
}

impl ScanValue for Uuid {
    const TYPE_NAME: &'static str = "Uuid";

    fn scan_value(raw: &str) -> Result<Self, ConversionError> {
        Uuid::parse_str(raw).map_err(|err| ConversionError::new(raw, Self::TYPE_NAME, err.to_string()))
    }
}

/// Sets a single-valued field from the first raw value.
pub fn scan_scalar<V: ScanValue>(slot: &mut V, values: &[String]) -> Result<(), ConversionError> {
    if let Some(raw) = values.first() {
        *slot = V::scan_value(raw)?;
    }
    Ok(())
}

/// Sets an optional field to `Some` of the first raw value.
pub fn scan_optional<V: ScanValue>(slot: &mut Option<V>, values: &[String]) -> Result<(), ConversionError> {
    if let Some(raw) = values.first() {
        *slot = Some(V::scan_value(raw)?);
    }
    Ok(())
}

/// Replaces a sequence field with every raw value, converted in order.
pub fn scan_list<V: ScanValue>(slot: &mut Vec<V>, values: &[String]) -> Result<(), ConversionError> {
    if values.is_empty() {
        return Ok(());
    }
    let parsed = values
        .iter()
        .map(|raw| V::scan_value(raw))
        .collect::<Result<Vec<_>, _>>()?;
    *slot = parsed;
    Ok(())
}
