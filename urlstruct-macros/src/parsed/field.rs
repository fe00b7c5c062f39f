use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{ToTokens, format_ident, quote};
use syn::spanned::Spanned;
use syn::{Attribute, Error, Field, Ident, LitStr, Result, Type};

use super::types::{EmbedAccess, ValueKind, classify_embed, classify_type};

pub(crate) struct ParsedField {
    ident: Ident,
    /// Declared name without any raw-identifier prefix.
    name: String,
    index: usize,
    ty: Type,
    tag: TagSpec,
    flatten: bool,
    scan: bool,
}

/// Options from a field's `#[urlstruct(...)]` attributes.
#[derive(Default)]
struct TagSpec {
    name: Option<LitStr>,
    op: Option<LitStr>,
    no_decode: bool,
    skip: bool,
}

impl ParsedField {
    pub(crate) fn from_field(field: &Field, index: usize) -> Result<Self> {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| Error::new(field.span(), "Urlstruct requires named fields"))?;
        let name = ident.to_string().trim_start_matches("r#").to_string();

        let mut tag = TagSpec::default();
        let mut flatten = false;
        let mut scan = false;
        for attr in &field.attrs {
            if attr.path().is_ident("urlstruct") {
                Self::parse_field_attr(attr, &mut tag, &mut flatten, &mut scan)?;
            }
        }

        if flatten && (tag.name.is_some() || tag.op.is_some() || tag.no_decode || scan) {
            return Err(Error::new(
                field.span(),
                "#[urlstruct(flatten)] cannot be combined with name, op, nodecode or scan",
            ));
        }
        if flatten && !matches!(field.ty, Type::Path(_)) {
            return Err(Error::new(
                field.ty.span(),
                "#[urlstruct(flatten)] requires a record type, Box<T>, Option<T> or Option<Box<T>>",
            ));
        }

        Ok(Self {
            ident,
            name,
            index,
            ty: field.ty.clone(),
            tag,
            flatten,
            scan,
        })
    }

    fn parse_field_attr(attr: &Attribute, tag: &mut TagSpec, flatten: &mut bool, scan: &mut bool) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                if value.value().is_empty() {
                    return Err(meta.error("name must not be empty"));
                }
                tag.name = Some(value);
            } else if meta.path.is_ident("op") {
                let value: LitStr = meta.value()?.parse()?;
                tag.op = Some(value);
            } else if meta.path.is_ident("nodecode") {
                tag.no_decode = true;
            } else if meta.path.is_ident("skip") {
                tag.skip = true;
            } else if meta.path.is_ident("flatten") {
                *flatten = true;
            } else if meta.path.is_ident("scan") {
                *scan = true;
            } else {
                return Err(meta.error(
                    "unknown urlstruct field option; expected name, op, nodecode, skip, flatten or scan",
                ));
            }
            Ok(())
        })
    }

    fn tag_tokens(&self) -> TokenStream2 {
        let mut tokens = quote! { ::urlstruct::Tag::new() };
        if let Some(name) = &self.tag.name {
            tokens = quote! { #tokens.name(#name) };
        }
        if let Some(op) = &self.tag.op {
            tokens = quote! { #tokens.op(#op) };
        }
        if self.tag.no_decode {
            tokens = quote! { #tokens.no_decode() };
        }
        if self.tag.skip {
            tokens = quote! { #tokens.skip() };
        }
        tokens
    }

    fn accessor_ident(&self) -> Ident {
        format_ident!("__urlstruct_{}", self.name)
    }

    /// Emits the accessor fn item and the builder call adding this field to
    /// the shape of `record`. Skipped embeddings emit nothing.
    pub(crate) fn emit(&self, record: &Ident) -> Option<(TokenStream2, TokenStream2)> {
        if self.flatten {
            return self.emit_embedded(record);
        }

        let ident = &self.ident;
        let ty = &self.ty;
        let accessor = self.accessor_ident();
        let name = LitStr::new(&self.name, Span::call_site());
        let index = self.index;
        let tag = self.tag_tokens();

        let constructor = match classify_type(ty, self.scan) {
            _ if self.tag.skip => None,
            ValueKind::Scalar(inner) => Some((quote! { scalar }, inner)),
            ValueKind::Optional(inner) => Some((quote! { optional }, inner)),
            ValueKind::List(inner) => Some((quote! { list }, inner)),
            ValueKind::Unsupported => None,
        };

        let Some((constructor, inner)) = constructor else {
            let type_name = LitStr::new(&ty.to_token_stream().to_string(), Span::call_site());
            let call = quote! {
                .field(::urlstruct::FieldSpec::<#record>::opaque(#name, #index, #tag, #type_name))
            };
            return Some((TokenStream2::new(), call));
        };

        let item = quote! {
            #[allow(non_snake_case)]
            fn #accessor(record: &mut #record) -> &mut #ty {
                &mut record.#ident
            }
        };
        let call = quote! {
            .field(::urlstruct::FieldSpec::<#record>::#constructor::<#inner>(#name, #index, #tag, #accessor))
        };
        Some((item, call))
    }

    fn emit_embedded(&self, record: &Ident) -> Option<(TokenStream2, TokenStream2)> {
        if self.tag.skip {
            return None;
        }

        let ident = &self.ident;
        let accessor = self.accessor_ident();
        let name = LitStr::new(&self.name, Span::call_site());
        let index = self.index;
        let tag = self.tag_tokens();
        let (access, embedded) = classify_embed(&self.ty);

        // Optional slots are handed over whole; the runtime fills them only
        // after a successful decode.
        let (target, body, constructor) = match access {
            EmbedAccess::Direct => (embedded.clone(), quote! { &mut record.#ident }, quote! { new::<#embedded> }),
            EmbedAccess::Boxed => (embedded.clone(), quote! { &mut *record.#ident }, quote! { new::<#embedded> }),
            EmbedAccess::Optional => (
                self.ty.clone(),
                quote! { &mut record.#ident },
                quote! { optional::<#embedded, #embedded> },
            ),
            EmbedAccess::OptionalBoxed => (
                self.ty.clone(),
                quote! { &mut record.#ident },
                quote! { optional::<#embedded, ::std::boxed::Box<#embedded>> },
            ),
        };

        let item = quote! {
            #[allow(non_snake_case)]
            fn #accessor(record: &mut #record) -> &mut #target {
                #body
            }
        };
        let call = quote! {
            .embedded(::urlstruct::Embedded::<#record>::#constructor(#name, #index, #tag, #accessor))
        };
        Some((item, call))
    }
}
