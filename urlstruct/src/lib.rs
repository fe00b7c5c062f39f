//! urlstruct: decode URL query parameters into typed filter structs.
//!
//! `#[derive(Urlstruct)]` describes a record's fields once; the resulting
//! field table is cached per type and drives decoding of every request.
//!
//! ```text
//! #[derive(Default, Urlstruct)]
//! #[urlstruct(table = "b")]
//! struct BookFilter {
//!     #[urlstruct(flatten)]
//!     pager: Pager,
//!     author_id: i64,
//!     #[urlstruct(name = "created_at", op = "gte")]
//!     created_after: Option<DateTime<Utc>>,
//! }
//!
//! let values = Values::parse("author_id=123&page=2&limit=100");
//! let mut filter = BookFilter::default();
//! urlstruct::unmarshal(&values, &mut filter)?;
//! ```

extern crate self as urlstruct;

pub mod column;
pub mod decoder;
pub mod errors;
pub mod examples;
pub mod pager;
pub mod registry;
pub mod scan;
pub mod struct_info;
pub mod types;
pub mod values;

use std::sync::Arc;

pub use column::{OPERATOR_DELIMITER, normalize_key, split_column_operator, underscore};
pub use decoder::{Decoder, DecoderConfig, ErrorPolicy, unmarshal};
pub use errors::*;
pub use pager::Pager;
pub use scan::ScanValue;
pub use struct_info::{Field, StructInfo};
pub use types::{Container, Embedded, FieldSpec, Shape, Tag, Urlstruct};
pub use urlstruct_macros::Urlstruct;
pub use values::Values;

/// Returns the cached field table for `T`.
pub fn describe<T: Urlstruct>() -> Arc<StructInfo<T>> {
    T::struct_info()
}
