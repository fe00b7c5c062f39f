use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod parsed;

use parsed::ParsedRecord;

/// Derives `urlstruct::Urlstruct` for a struct with named fields.
///
/// Container attribute:
/// - `#[urlstruct(table = "b")]` sets the table name.
///
/// Field attributes:
/// - `name = "col"` or `name = "col__op"` overrides the column (and operator);
/// - `op = "gte"` sets the operator;
/// - `nodecode` keeps the field in the table but never decodes into it;
/// - `skip` leaves the field out of the table;
/// - `flatten` inlines the fields of an embedded `Urlstruct` record
///   (`E`, `Box<E>`, `Option<E>` or `Option<Box<E>>`);
/// - `scan` decodes a custom type through its `ScanValue` impl.
///
/// Fields of types with no conversion are left out of the table. A field
/// named `table_name` only carries the table name in its `name` option.
///
/// # Example
///
/// ```text
/// #[derive(Default, Urlstruct)]
/// #[urlstruct(table = "b")]
/// struct BookFilter {
///     #[urlstruct(flatten)]
///     pager: Pager,
///     author_id: i64,
///     #[urlstruct(name = "author_id", op = "in")]
///     author_ids: Vec<i64>,
/// }
/// ```
#[proc_macro_derive(Urlstruct, attributes(urlstruct))]
pub fn derive_urlstruct(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match ParsedRecord::from_input(&input) {
        Ok(parsed) => parsed.emit().into(),
        Err(err) => err.to_compile_error().into(),
    }
}
