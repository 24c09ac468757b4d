//! Type helper utilities for syn type analysis.

/// Extract the inner type T from Option<T>, or return None if not an Option type.
///
/// Recognizes `Option<T>`, `std::option::Option<T>`, and `core::option::Option<T>`.
pub fn option_inner(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    let seg = type_path.path.segments.last()?;
    if seg.ident != "Option" {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &seg.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    let syn::GenericArgument::Type(inner) = args.args.first()? else {
        return None;
    };
    Some(inner)
}

/// Infer the `dotorm::SqlType` variant name for a Rust field type.
///
/// `Option<T>` is looked through. Returns `None` for types with no obvious
/// column type; those need `#[orm(sql_type = "...")]` or `#[orm(relation = "...")]`.
pub fn infer_sql_type(ty: &syn::Type) -> Option<&'static str> {
    if let Some(inner) = option_inner(ty) {
        return infer_sql_type(inner);
    }
    match ty {
        syn::Type::Reference(r) => infer_sql_type(&r.elem),
        syn::Type::Path(type_path) => {
            let path = &type_path.path;
            let seg = path.segments.last()?;
            let variant = match seg.ident.to_string().as_str() {
                "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" | "u64" | "isize"
                | "usize" => "Integer",
                "f32" | "f64" => "Float",
                "String" | "str" => "Text",
                "bool" => "Boolean",
                "NaiveDate" => "Date",
                "NaiveDateTime" | "DateTime" => "DateTime",
                "Uuid" => "Uuid",
                "JsonValue" => "Json",
                "Value"
                    if path.segments.len() == 2
                        && path.segments.first().is_some_and(|s| s.ident == "serde_json") =>
                {
                    "Json"
                }
                _ => return None,
            };
            Some(variant)
        }
        _ => None,
    }
}

/// Map a `#[orm(sql_type = "...")]` name onto a `dotorm::SqlType` variant name.
///
/// Accepts the same names and aliases as `SqlType::from_str`.
pub fn sql_type_variant(name: &str) -> Option<&'static str> {
    let variant = match name.trim().to_ascii_lowercase().as_str() {
        "text" | "string" | "varchar" => "Text",
        "integer" | "int" | "bigint" => "Integer",
        "float" | "real" | "double" => "Float",
        "boolean" | "bool" => "Boolean",
        "date" => "Date",
        "datetime" | "timestamp" => "DateTime",
        "uuid" => "Uuid",
        "json" | "jsonb" => "Json",
        _ => return None,
    };
    Some(variant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_option_inner() {
        let ty: syn::Type = parse_quote!(Option<String>);
        assert!(option_inner(&ty).is_some());

        let ty: syn::Type = parse_quote!(std::option::Option<i32>);
        assert!(option_inner(&ty).is_some());

        let ty: syn::Type = parse_quote!(String);
        assert!(option_inner(&ty).is_none());
    }

    #[test]
    fn test_infer_primitives() {
        let ty: syn::Type = parse_quote!(i64);
        assert_eq!(infer_sql_type(&ty), Some("Integer"));
        let ty: syn::Type = parse_quote!(Option<f32>);
        assert_eq!(infer_sql_type(&ty), Some("Float"));
        let ty: syn::Type = parse_quote!(&'static str);
        assert_eq!(infer_sql_type(&ty), Some("Text"));
        let ty: syn::Type = parse_quote!(bool);
        assert_eq!(infer_sql_type(&ty), Some("Boolean"));
    }

    #[test]
    fn test_infer_library_types() {
        let ty: syn::Type = parse_quote!(chrono::NaiveDate);
        assert_eq!(infer_sql_type(&ty), Some("Date"));
        let ty: syn::Type = parse_quote!(DateTime<Utc>);
        assert_eq!(infer_sql_type(&ty), Some("DateTime"));
        let ty: syn::Type = parse_quote!(uuid::Uuid);
        assert_eq!(infer_sql_type(&ty), Some("Uuid"));
        let ty: syn::Type = parse_quote!(serde_json::Value);
        assert_eq!(infer_sql_type(&ty), Some("Json"));
    }

    #[test]
    fn test_infer_unknown() {
        let ty: syn::Type = parse_quote!(Value);
        assert_eq!(infer_sql_type(&ty), None);
        let ty: syn::Type = parse_quote!(Vec<u8>);
        assert_eq!(infer_sql_type(&ty), None);
    }

    #[test]
    fn test_sql_type_variant_aliases() {
        assert_eq!(sql_type_variant("VARCHAR"), Some("Text"));
        assert_eq!(sql_type_variant("timestamp"), Some("DateTime"));
        assert_eq!(sql_type_variant("money"), None);
    }
}
