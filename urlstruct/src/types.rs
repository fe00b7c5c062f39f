use std::borrow::BorrowMut;
use std::sync::Arc;

use crate::errors::ConversionError;
use crate::scan::{self, ScanValue};
use crate::struct_info::{Field, StructInfo};

/// Conversion routine bound to one field of `T`.
pub(crate) type ScanFn<T> = Arc<dyn Fn(&mut T, &[String]) -> Result<(), ConversionError> + Send + Sync>;

/// Records that can be decoded from query values.
///
/// This trait is normally implemented by `#[derive(Urlstruct)]`, which emits
/// the record's [`Shape`]. The field table built from the shape is cached per
/// type; see [`Urlstruct::struct_info`].
pub trait Urlstruct: Sized + 'static {
    /// Describes the declared fields of the record, in declaration order.
    fn shape() -> Shape<Self>;

    /// Returns the cached field table, building it on first use.
    fn struct_info() -> Arc<StructInfo<Self>> {
        crate::registry::struct_info::<Self>()
    }
}

/// Per-field annotations parsed from `#[urlstruct(...)]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tag {
    /// Explicit column name, optionally with an `__op` suffix.
    pub name: Option<&'static str>,
    /// Explicit operator; overrides any suffix in `name`.
    pub op: Option<&'static str>,
    /// Keep the field in the table but never decode into it.
    pub no_decode: bool,
    /// Leave the field out of the table entirely.
    pub skip: bool,
}

impl Tag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    pub fn op(mut self, op: &'static str) -> Self {
        self.op = Some(op);
        self
    }

    pub fn no_decode(mut self) -> Self {
        self.no_decode = true;
        self
    }

    pub fn skip(mut self) -> Self {
        self.skip = true;
        self
    }
}

/// How a field consumes the raw values supplied for its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// Plain value, set from the first raw value.
    Scalar,
    /// `Option<V>`, set to `Some` of the first raw value.
    Optional,
    /// `Vec<V>`, replaced by all raw values in order.
    List,
}

/// One declared, non-embedded field of a record shape.
pub struct FieldSpec<T> {
    pub(crate) name: &'static str,
    pub(crate) index: usize,
    pub(crate) tag: Tag,
    pub(crate) type_name: &'static str,
    pub(crate) container: Container,
    pub(crate) scan: Option<ScanFn<T>>,
}

impl<T: 'static> FieldSpec<T> {
    /// A single-valued field of type `V`.
    pub fn scalar<V: ScanValue + 'static>(
        name: &'static str,
        index: usize,
        tag: Tag,
        access: fn(&mut T) -> &mut V,
    ) -> Self {
        Self::with_scan(
            name,
            index,
            tag,
            V::TYPE_NAME,
            Container::Scalar,
            Arc::new(move |record: &mut T, values: &[String]| scan::scan_scalar(access(record), values)),
        )
    }

    /// An `Option<V>` field.
    pub fn optional<V: ScanValue + 'static>(
        name: &'static str,
        index: usize,
        tag: Tag,
        access: fn(&mut T) -> &mut Option<V>,
    ) -> Self {
        Self::with_scan(
            name,
            index,
            tag,
            V::TYPE_NAME,
            Container::Optional,
            Arc::new(move |record: &mut T, values: &[String]| scan::scan_optional(access(record), values)),
        )
    }

    /// A `Vec<V>` field.
    pub fn list<V: ScanValue + 'static>(
        name: &'static str,
        index: usize,
        tag: Tag,
        access: fn(&mut T) -> &mut Vec<V>,
    ) -> Self {
        Self::with_scan(
            name,
            index,
            tag,
            V::TYPE_NAME,
            Container::List,
            Arc::new(move |record: &mut T, values: &[String]| scan::scan_list(access(record), values)),
        )
    }

    /// A field whose type has no conversion routine.
    ///
    /// Such fields never appear in the field table; the marker field
    /// `table_name` is declared this way.
    pub fn opaque(name: &'static str, index: usize, tag: Tag, type_name: &'static str) -> Self {
        Self {
            name,
            index,
            tag,
            type_name,
            container: Container::Scalar,
            scan: None,
        }
    }

    fn with_scan(
        name: &'static str,
        index: usize,
        tag: Tag,
        type_name: &'static str,
        container: Container,
        scan: ScanFn<T>,
    ) -> Self {
        Self {
            name,
            index,
            tag,
            type_name,
            container,
            scan: Some(scan),
        }
    }
}

/// A `#[urlstruct(flatten)]` field whose own fields are inlined into the parent.
pub struct Embedded<T> {
    pub(crate) name: &'static str,
    pub(crate) tag: Tag,
    pub(crate) expand: Box<dyn FnOnce() -> Vec<Field<T>>>,
}

impl<T: 'static> Embedded<T> {
    /// Embeds record `E` reachable through `access` at declared position `index`.
    ///
    /// `E`'s field table is taken from the registry and lifted into `T`: each
    /// field's index path gets `index` prepended and its conversion routine
    /// runs on the record returned by `access`.
    pub fn new<E: Urlstruct>(name: &'static str, index: usize, tag: Tag, access: fn(&mut T) -> &mut E) -> Self {
        Self {
            name,
            tag,
            expand: Box::new(move || {
                let inner = E::struct_info();
                inner.fields().iter().map(|field| field.lift(index, access)).collect()
            }),
        }
    }

    /// Embeds record `E` held as `Option<E>` or `Option<Box<E>>`.
    ///
    /// The slot stays `None` until a value for one of `E`'s columns decodes
    /// successfully.
    pub fn optional<E, S>(name: &'static str, index: usize, tag: Tag, access: fn(&mut T) -> &mut Option<S>) -> Self
    where
        E: Urlstruct,
        S: Default + BorrowMut<E> + 'static,
    {
        Self {
            name,
            tag,
            expand: Box::new(move || {
                let inner = E::struct_info();
                inner
                    .fields()
                    .iter()
                    .map(|field| field.lift_optional(index, access))
                    .collect()
            }),
        }
    }
}

pub(crate) enum ShapeField<T> {
    Field(FieldSpec<T>),
    Embedded(Embedded<T>),
}

/// The declared structure of a record type, as emitted by the derive.
pub struct Shape<T> {
    pub(crate) type_name: &'static str,
    pub(crate) table_name: Option<&'static str>,
    pub(crate) fields: Vec<ShapeField<T>>,
}

impl<T: 'static> Shape<T> {
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            table_name: None,
            fields: Vec::new(),
        }
    }

    /// Sets the table name from the container attribute `table = "..."`.
    pub fn table_name(mut self, name: &'static str) -> Self {
        self.table_name = Some(name);
        self
    }

    pub fn field(mut self, spec: FieldSpec<T>) -> Self {
        self.fields.push(ShapeField::Field(spec));
        self
    }

    pub fn embedded(mut self, embedded: Embedded<T>) -> Self {
        self.fields.push(ShapeField::Embedded(embedded));
        self
    }
}
