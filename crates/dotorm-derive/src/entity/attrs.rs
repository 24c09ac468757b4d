//! Attribute parsing for the Entity derive macro.
//!
//! Handles struct-level and field-level `#[orm(...)]` attributes.

use crate::common::is_valid_sql_ident;
use syn::{DeriveInput, Error, LitStr, Result};

/// Struct-level attributes.
#[derive(Default)]
pub(super) struct EntityAttrs {
    /// `#[orm(name = "...")]`
    pub name: Option<String>,
}

/// Field-level attributes.
#[derive(Default)]
pub(super) struct FieldAttrs {
    /// `#[orm(relation = "...")]`
    pub relation: Option<LitStr>,
    /// `#[orm(sql_type = "...")]`
    pub sql_type: Option<LitStr>,
    /// `#[orm(skip)]`
    pub skip: bool,
}

pub(super) fn get_entity_attrs(input: &DeriveInput) -> Result<EntityAttrs> {
    let mut attrs = EntityAttrs::default();
    for attr in &input.attrs {
        if !attr.path().is_ident("orm") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                let name = lit.value();
                if !is_valid_sql_ident(&name) {
                    return Err(Error::new(
                        lit.span(),
                        format!("invalid entity name '{name}' (expected [A-Za-z_][A-Za-z0-9_]*)"),
                    ));
                }
                attrs.name = Some(name);
                Ok(())
            } else {
                Err(meta.error("unsupported entity attribute; expected `name`"))
            }
        })?;
    }
    Ok(attrs)
}

pub(super) fn get_field_attrs(field: &syn::Field) -> Result<FieldAttrs> {
    let mut attrs = FieldAttrs::default();
    for attr in &field.attrs {
        if !attr.path().is_ident("orm") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("relation") {
                let lit: LitStr = meta.value()?.parse()?;
                if !is_valid_sql_ident(&lit.value()) {
                    return Err(Error::new(lit.span(), "invalid relation target entity name"));
                }
                attrs.relation = Some(lit);
                Ok(())
            } else if meta.path.is_ident("sql_type") {
                attrs.sql_type = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("skip") {
                attrs.skip = true;
                Ok(())
            } else {
                Err(meta.error(
                    "unsupported field attribute; expected `relation`, `sql_type` or `skip`",
                ))
            }
        })?;
    }

    if let (Some(relation), Some(_)) = (&attrs.relation, &attrs.sql_type) {
        return Err(Error::new(
            relation.span(),
            "`relation` and `sql_type` cannot be combined; a relation is always an integer id",
        ));
    }
    Ok(attrs)
}
