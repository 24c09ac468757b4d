//! Entity derive macro implementation
//!
//! ## Module Structure
//!
//! - `attrs`: Struct and field attribute parsing

mod attrs;

use attrs::{get_entity_attrs, get_field_attrs};

use crate::common::syn_types::{infer_sql_type, sql_type_variant};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Error, Fields, Result};

/// Name of the implicit identity attribute; never redeclared.
const ENTITY_ID: &str = "entity_id";

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let entity_name = get_entity_attrs(&input)?
        .name
        .unwrap_or_else(|| name.unraw().to_string());

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unit => return Ok(generate(&input, &entity_name, &[])),
            Fields::Unnamed(_) => {
                return Err(Error::new_spanned(
                    &input,
                    "Entity can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(Error::new_spanned(
                &input,
                "Entity can only be derived for structs",
            ));
        }
    };

    let mut field_defs = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(ident) = &field.ident else {
            continue;
        };
        let field_name = ident.unraw().to_string();
        let attrs = get_field_attrs(field)?;
        if attrs.skip || field_name == ENTITY_ID {
            continue;
        }
        if field_name.contains("__") || field_name.starts_with('_') || field_name.ends_with('_') {
            return Err(Error::new_spanned(
                ident,
                "entity attribute names cannot contain `__` or start/end with `_`",
            ));
        }

        let field_type = if let Some(relation) = &attrs.relation {
            let target = relation.value();
            quote!(::dotorm::FieldType::Entity(::std::string::String::from(#target)))
        } else {
            let variant = match &attrs.sql_type {
                Some(lit) => sql_type_variant(&lit.value()).ok_or_else(|| {
                    Error::new(lit.span(), format!("unknown sql_type '{}'", lit.value()))
                })?,
                None => infer_sql_type(&field.ty).ok_or_else(|| {
                    Error::new_spanned(
                        &field.ty,
                        "cannot infer a column type; add #[orm(sql_type = \"...\")] \
                         or #[orm(relation = \"...\")]",
                    )
                })?,
            };
            let variant = format_ident!("{}", variant);
            quote!(::dotorm::FieldType::Scalar(::dotorm::SqlType::#variant))
        };

        field_defs.push(quote! {
            def.push_field(::dotorm::FieldDef::new(#field_name, #field_type));
        });
    }

    Ok(generate(&input, &entity_name, &field_defs))
}

fn generate(input: &DeriveInput, entity_name: &str, field_defs: &[TokenStream]) -> TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        impl #impl_generics ::dotorm::Entity for #name #ty_generics #where_clause {
            const NAME: &'static str = #entity_name;

            fn entity_def() -> ::dotorm::EntityDef {
                #[allow(unused_mut)]
                let mut def = ::dotorm::EntityDef::new(#entity_name);
                #(#field_defs)*
                def
            }
        }
    }
}
