use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Error, Fields, Ident, LitStr, Result};

use super::field::ParsedField;

pub(crate) struct ParsedRecord {
    name: Ident,
    table: Option<LitStr>,
    fields: Vec<ParsedField>,
}

impl ParsedRecord {
    pub(crate) fn from_input(input: &DeriveInput) -> Result<Self> {
        if !input.generics.params.is_empty() {
            return Err(Error::new_spanned(
                &input.generics,
                "Urlstruct cannot be derived for generic structs",
            ));
        }

        let mut table = None;
        for attr in &input.attrs {
            if attr.path().is_ident("urlstruct") {
                Self::parse_container_attr(attr, &mut table)?;
            }
        }

        let fields = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named
                    .named
                    .iter()
                    .enumerate()
                    .map(|(index, field)| ParsedField::from_field(field, index))
                    .collect::<Result<Vec<_>>>()?,
                Fields::Unit => Vec::new(),
                Fields::Unnamed(_) => {
                    return Err(Error::new(input.ident.span(), "Urlstruct requires named fields"));
                }
            },
            _ => return Err(Error::new(input.ident.span(), "Urlstruct can only be derived for structs")),
        };

        Ok(Self {
            name: input.ident.clone(),
            table,
            fields,
        })
    }

    fn parse_container_attr(attr: &Attribute, table: &mut Option<LitStr>) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") {
                let value: LitStr = meta.value()?.parse()?;
                *table = Some(value);
                Ok(())
            } else {
                Err(meta.error("unknown urlstruct container option; expected table"))
            }
        })
    }

    pub(crate) fn emit(&self) -> TokenStream2 {
        let name = &self.name;
        let type_name = LitStr::new(&name.to_string(), Span::call_site());
        let table = self.table.as_ref().map(|table| quote! { .table_name(#table) });

        let (items, calls): (Vec<_>, Vec<_>) = self.fields.iter().filter_map(|field| field.emit(name)).unzip();

        quote! {
            #[automatically_derived]
            impl ::urlstruct::Urlstruct for #name {
                fn shape() -> ::urlstruct::Shape<Self> {
                    #(#items)*

                    ::urlstruct::Shape::<#name>::new(#type_name)
                        #table
                        #(#calls)*
                }
            }
        }
    }
}
