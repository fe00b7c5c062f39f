use std::borrow::Cow;

use thiserror::Error;

/// A single raw query value could not be converted into the field's type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert {value:?} to {target}: {reason}")]
pub struct ConversionError {
    /// The offending raw value, exactly as supplied.
    pub value: String,
    /// Name of the Rust type the value was converted into.
    pub target: &'static str,
    pub reason: Cow<'static, str>,
}

impl ConversionError {
    pub fn new(value: impl Into<String>, target: &'static str, reason: impl Into<Cow<'static, str>>) -> Self {
        Self {
            value: value.into(),
            target,
            reason: reason.into(),
        }
    }
}

/// Decoding one query parameter into its field failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("urlstruct: field {column:?} (key {key:?}): {source}")]
pub struct DecodeError {
    /// Lookup key as supplied by the caller, before normalization.
    pub key: String,
    /// Column of the field the key resolved to.
    pub column: String,
    #[source]
    pub source: ConversionError,
}

impl DecodeError {
    pub fn new(key: impl Into<String>, column: impl Into<String>, source: ConversionError) -> Self {
        Self {
            key: key.into(),
            column: column.into(),
            source,
        }
    }
}

/// Failures collected while decoding a whole set of query values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("urlstruct: {} parameter(s) failed to decode: {errors:?}", errors.len())]
pub struct UnmarshalError {
    pub errors: Vec<DecodeError>,
}

impl UnmarshalError {
    pub fn new<I>(errors: I) -> Self
    where
        I: IntoIterator<Item = DecodeError>,
    {
        Self {
            errors: errors.into_iter().collect(),
        }
    }

    /// Returns the first failure, which is the only one under fail-fast decoding.
    pub fn first(&self) -> Option<&DecodeError> {
        self.errors.first()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl From<DecodeError> for UnmarshalError {
    fn from(err: DecodeError) -> Self {
        Self::new([err])
    }
}

/// Convenience alias for batch decoding results.
pub type UnmarshalResult<T> = Result<T, UnmarshalError>;
