//! Derive macros for dotorm
//!
//! Provides `#[derive(Entity)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod common;
mod entity;

/// Derive the `Entity` field-descriptor table for a struct.
///
/// # Example
///
/// ```ignore
/// use dotorm::Entity;
///
/// #[derive(Entity)]
/// struct Person {
///     entity_id: i64,
///     name: String,
///     age: Option<i32>,
///     #[orm(relation = "Pet")]
///     pet: i64,
/// }
/// ```
///
/// # Attributes
///
/// - `#[orm(name = "Name")]` - Entity name (defaults to the struct name)
/// - `#[orm(relation = "Other")]` - Field is a foreign key to entity `Other`
/// - `#[orm(sql_type = "text")]` - Declare the column type explicitly
/// - `#[orm(skip)]` - Leave the field out of the entity
///
/// A field named `entity_id` is the implicit identity and is not redeclared.
#[proc_macro_derive(Entity, attributes(orm))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    entity::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
