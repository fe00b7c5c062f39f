use std::borrow::BorrowMut;
use std::fmt;
use std::sync::Arc;

use crate::column::{OPERATOR_DELIMITER, TABLE_NAME_FIELD, normalize_key, split_column_operator, underscore, unquote};
use crate::errors::{ConversionError, DecodeError};
use crate::types::{Container, FieldSpec, ScanFn, Shape, ShapeField};

/// Flattened field table of one record type.
///
/// Built once per type from its [`Shape`] and shared through the registry.
pub struct StructInfo<T> {
    type_name: &'static str,
    table_name: String,
    fields: Vec<Field<T>>,
}

impl<T: 'static> StructInfo<T> {
    /// Walks `shape` in declaration order, inlining embedded records.
    ///
    /// Only this record's own `table` attribute or `table_name` marker sets
    /// the table name; those of embedded records are ignored.
    pub fn new(shape: Shape<T>) -> Self {
        let mut info = Self {
            type_name: shape.type_name,
            table_name: shape.table_name.map(|name| unquote(name).to_string()).unwrap_or_default(),
            fields: Vec::with_capacity(shape.fields.len()),
        };

        for item in shape.fields {
            match item {
                ShapeField::Embedded(embedded) => {
                    if embedded.tag.skip {
                        log::trace!("urlstruct: {}.{} embedding skipped", info.type_name, embedded.name);
                        continue;
                    }
                    info.fields.extend((embedded.expand)());
                }
                ShapeField::Field(spec) if spec.name == TABLE_NAME_FIELD => {
                    if info.table_name.is_empty()
                        && let Some(name) = spec.tag.name
                    {
                        info.table_name = unquote(name).to_string();
                    }
                }
                ShapeField::Field(spec) => {
                    let declared = spec.name;
                    match Field::from_spec(spec) {
                        Some(field) => info.fields.push(field),
                        None => log::trace!("urlstruct: {}.{} has no decodable column", info.type_name, declared),
                    }
                }
            }
        }

        log::debug!(
            "urlstruct: built field table for {} (table {:?}, {} fields)",
            info.type_name,
            info.table_name,
            info.fields.len()
        );
        info
    }

    /// Decodes `values` for lookup key `name` into `record`.
    ///
    /// Unknown keys and keys of `nodecode` fields are ignored. An empty
    /// `values` slice leaves the field untouched.
    pub fn decode(&self, record: &mut T, name: &str, values: &[String]) -> Result<(), DecodeError> {
        let Some(field) = self.field(normalize_key(name)) else {
            log::trace!("urlstruct: {} has no field for key {:?}", self.type_name, name);
            return Ok(());
        };
        if field.no_decode {
            return Ok(());
        }
        field.decode(record, values).map_err(|source| {
            log::debug!("urlstruct: {}.{} rejected {:?}: {}", self.type_name, field.column, name, source);
            DecodeError::new(name, field.column.clone(), source)
        })
    }

    /// Finds the field matching `name`, split into column and operator.
    pub fn field(&self, name: &str) -> Option<&Field<T>> {
        let (column, op) = split_column_operator(name, OPERATOR_DELIMITER);
        self.fields.iter().find(|field| field.column == column && field.op == op)
    }

    pub fn fields(&self) -> &[Field<T>] {
        &self.fields
    }

    /// Table name, empty when the record declares none.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl<T> fmt::Debug for StructInfo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructInfo")
            .field("type_name", &self.type_name)
            .field("table_name", &self.table_name)
            .field("fields", &self.fields)
            .finish()
    }
}

/// One decodable column of a record, possibly nested in embedded records.
pub struct Field<T> {
    column: String,
    op: String,
    index: Vec<usize>,
    type_name: &'static str,
    container: Container,
    no_decode: bool,
    scan: ScanFn<T>,
}

impl<T: 'static> Field<T> {
    fn from_spec(spec: FieldSpec<T>) -> Option<Self> {
        if spec.tag.skip {
            return None;
        }
        let scan = spec.scan?;

        let name = match spec.tag.name {
            Some(name) => name.to_string(),
            None => underscore(spec.name.trim_start_matches("r#")),
        };
        let (column, op) = split_column_operator(&name, OPERATOR_DELIMITER);
        let op = match spec.tag.op {
            Some(explicit) => explicit,
            None => op,
        };

        Some(Self {
            column: column.to_string(),
            op: op.to_string(),
            index: vec![spec.index],
            type_name: spec.type_name,
            container: spec.container,
            no_decode: spec.tag.no_decode,
            scan,
        })
    }

    /// Runs the conversion routine against `record`; no-op for empty `values`.
    pub fn decode(&self, record: &mut T, values: &[String]) -> Result<(), ConversionError> {
        if values.is_empty() {
            return Ok(());
        }
        (self.scan)(record, values)
    }

    /// Re-roots this field under an outer record that embeds `T` at `base`.
    pub(crate) fn lift<O: 'static>(&self, base: usize, access: fn(&mut O) -> &mut T) -> Field<O> {
        let inner = Arc::clone(&self.scan);
        self.rebase(
            base,
            Arc::new(move |record: &mut O, values: &[String]| inner(access(record), values)),
        )
    }

    /// Like [`Field::lift`] for an embedding held as `Option<S>`.
    ///
    /// An empty slot is decoded into a fresh `S::default()` that is stored
    /// only when the conversion succeeds.
    pub(crate) fn lift_optional<O, S>(&self, base: usize, access: fn(&mut O) -> &mut Option<S>) -> Field<O>
    where
        O: 'static,
        S: Default + BorrowMut<T> + 'static,
    {
        let inner = Arc::clone(&self.scan);
        self.rebase(
            base,
            Arc::new(move |record: &mut O, values: &[String]| {
                let slot = access(record);
                if let Some(existing) = slot.as_mut() {
                    return inner(<S as BorrowMut<T>>::borrow_mut(existing), values);
                }
                let mut fresh = S::default();
                inner(<S as BorrowMut<T>>::borrow_mut(&mut fresh), values)?;
                *slot = Some(fresh);
                Ok(())
            }),
        )
    }

    fn rebase<O>(&self, base: usize, scan: ScanFn<O>) -> Field<O> {
        let mut index = Vec::with_capacity(self.index.len() + 1);
        index.push(base);
        index.extend_from_slice(&self.index);

        Field {
            column: self.column.clone(),
            op: self.op.clone(),
            index,
            type_name: self.type_name,
            container: self.container,
            no_decode: self.no_decode,
            scan,
        }
    }
}

impl<T> Field<T> {
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Operator suffix; empty when the field has none.
    pub fn op(&self) -> &str {
        &self.op
    }

    /// Declared field positions from the outermost record down to this field.
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn container(&self) -> Container {
        self.container
    }

    pub fn no_decode(&self) -> bool {
        self.no_decode
    }
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        Self {
            column: self.column.clone(),
            op: self.op.clone(),
            index: self.index.clone(),
            type_name: self.type_name,
            container: self.container,
            no_decode: self.no_decode,
            scan: Arc::clone(&self.scan),
        }
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("column", &self.column)
            .field("op", &self.op)
            .field("index", &self.index)
            .field("type_name", &self.type_name)
            .field("container", &self.container)
            .field("no_decode", &self.no_decode)
            .finish_non_exhaustive()
    }
}
