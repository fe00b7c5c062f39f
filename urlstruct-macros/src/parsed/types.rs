use syn::{GenericArgument, PathArguments, Type, TypePath};

/// How a field's declared type is decoded.
pub(crate) enum ValueKind {
    Scalar(Type),
    Optional(Type),
    List(Type),
    /// No conversion routine; the field stays out of the table.
    Unsupported,
}

/// How an embedded record is reached from its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EmbedAccess {
    Direct,
    Boxed,
    Optional,
    OptionalBoxed,
}

/// Classifies a declared field type. `force_scan` accepts any element type
/// (the user provides a `ScanValue` impl).
pub(crate) fn classify_type(ty: &Type, force_scan: bool) -> ValueKind {
    let accepts = |inner: &Type| force_scan || is_scannable(inner);

    if let Some(inner) = unwrap_generic(ty, "Option") {
        return if accepts(inner) {
            ValueKind::Optional(inner.clone())
        } else {
            ValueKind::Unsupported
        };
    }

    if let Some(inner) = unwrap_generic(ty, "Vec") {
        return if accepts(inner) {
            ValueKind::List(inner.clone())
        } else {
            ValueKind::Unsupported
        };
    }

    if accepts(ty) {
        ValueKind::Scalar(ty.clone())
    } else {
        ValueKind::Unsupported
    }
}

/// Strips `Option` and `Box` around an embedded record type.
pub(crate) fn classify_embed(ty: &Type) -> (EmbedAccess, Type) {
    if let Some(inner) = unwrap_generic(ty, "Option") {
        if let Some(record) = unwrap_generic(inner, "Box") {
            return (EmbedAccess::OptionalBoxed, record.clone());
        }
        return (EmbedAccess::Optional, inner.clone());
    }
    if let Some(record) = unwrap_generic(ty, "Box") {
        return (EmbedAccess::Boxed, record.clone());
    }
    (EmbedAccess::Direct, ty.clone())
}

fn is_scannable(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    let Some(ident) = last_ident_str(path) else {
        return false;
    };

    match ident.as_str() {
        // Only the offsets with a conversion; `DateTime<Local>` and friends stay out.
        "DateTime" => unwrap_generic(ty, "DateTime")
            .and_then(|offset| match offset {
                Type::Path(offset) => last_ident_str(offset),
                _ => None,
            })
            .is_some_and(|offset| matches!(offset.as_str(), "Utc" | "FixedOffset")),
        other => matches!(
            other,
            "bool"
                | "i8"
                | "i16"
                | "i32"
                | "i64"
                | "i128"
                | "isize"
                | "u8"
                | "u16"
                | "u32"
                | "u64"
                | "u128"
                | "usize"
                | "f32"
                | "f64"
                | "char"
                | "String"
                | "NaiveDate"
                | "NaiveDateTime"
                | "Uuid"
        ),
    }
}

fn unwrap_generic<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    match ty {
        Type::Path(path) if last_ident_str(path).as_deref() == Some(wrapper) => {
            match &path.path.segments.last()?.arguments {
                PathArguments::AngleBracketed(args) => args.args.first().and_then(|arg| match arg {
                    GenericArgument::Type(inner) => Some(inner),
                    _ => None,
                }),
                _ => None,
            }
        }
        _ => None,
    }
}

fn last_ident_str(path: &TypePath) -> Option<String> {
    path.path.segments.last().map(|seg| seg.ident.to_string())
}
