//! Common utilities shared across macro modules.

pub mod syn_types;

/// `[A-Za-z_][A-Za-z0-9_]*`
pub(crate) fn is_valid_sql_ident(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_sql_ident() {
        assert!(is_valid_sql_ident("Person"));
        assert!(is_valid_sql_ident("_pet2"));
        assert!(!is_valid_sql_ident(""));
        assert!(!is_valid_sql_ident("2pet"));
        assert!(!is_valid_sql_ident("pet-name"));
    }
}
