//! Identifier rules for entity and attribute names.
//!
//! Names end up verbatim in generated SQL and in keyword-argument paths, so
//! they must be plain unquoted identifiers: `[A-Za-z_][A-Za-z0-9_]*`.
//! Attribute names additionally may not contain `__`, which is the path
//! separator for keyword arguments.

use crate::error::{OrmError, OrmResult};

/// Validate an entity name.
pub(crate) fn check_entity_name(name: &str) -> OrmResult<()> {
    check_plain(name, "entity")
}

/// Validate an attribute name.
pub(crate) fn check_attribute_name(entity: &str, name: &str) -> OrmResult<()> {
    check_plain(name, "attribute")?;
    if name.contains("__") {
        return Err(OrmError::schema(format!(
            "attribute '{entity}.{name}' cannot contain '__'"
        )));
    }
    if name == "where" {
        return Err(OrmError::schema(format!(
            "attribute '{entity}.where' collides with the where__ marker"
        )));
    }
    if name.starts_with('_') || name.ends_with('_') {
        return Err(OrmError::schema(format!(
            "attribute '{entity}.{name}' cannot start or end with '_'"
        )));
    }
    Ok(())
}

fn check_plain(name: &str, what: &str) -> OrmResult<()> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(OrmError::schema(format!("{what} name cannot be empty")));
    };
    if !(first == '_' || first.is_ascii_alphabetic()) {
        return Err(OrmError::schema(format!(
            "invalid {what} name start character in '{name}': '{first}'"
        )));
    }
    if let Some(c) = chars.find(|c| !(*c == '_' || c.is_ascii_alphanumeric())) {
        return Err(OrmError::schema(format!(
            "invalid character in {what} name '{name}': '{c}'"
        )));
    }
    Ok(())
}
