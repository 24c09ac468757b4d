//! Attribute paths and the keyword-argument micro-syntax.
//!
//! Callers name columns with paths rooted at the statement's entity:
//!
//! - `pet.name` in SELECT column lists (`.` separated)
//! - `pet__name__ne` in keyword arguments (`__` separated, with an optional
//!   comparison suffix)
//! - `where__entity_id` in UPDATE keyword arguments, marking a predicate
//!
//! [`KeyPath::parse`] reads that syntax once; everything downstream works on
//! the parsed segments, operator and marker.

use std::fmt;

/// Marker prefix distinguishing UPDATE predicates from assignments.
pub const WHERE_MARKER: &str = "where__";

/// Comparison operator selected by a key suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Comparison {
    #[default]
    Eq,
    Lt,
    Le,
    Gt,
    Ge,
    Ne,
}

impl Comparison {
    const SUFFIXED: [Comparison; 5] = [
        Comparison::Lt,
        Comparison::Le,
        Comparison::Gt,
        Comparison::Ge,
        Comparison::Ne,
    ];

    /// SQL operator text.
    pub fn as_sql(self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Lt => "<",
            Comparison::Le => "<=",
            Comparison::Gt => ">",
            Comparison::Ge => ">=",
            Comparison::Ne => "!=",
        }
    }

    /// Key suffix including the leading `__`; `None` for equality.
    pub fn suffix(self) -> Option<&'static str> {
        match self {
            Comparison::Eq => None,
            Comparison::Lt => Some("__lt"),
            Comparison::Le => Some("__le"),
            Comparison::Gt => Some("__gt"),
            Comparison::Ge => Some("__ge"),
            Comparison::Ne => Some("__ne"),
        }
    }

    /// Split a trailing comparison suffix off `key`.
    pub fn strip(key: &str) -> (&str, Comparison) {
        for op in Self::SUFFIXED {
            if let Some(suffix) = op.suffix() {
                if let Some(base) = key.strip_suffix(suffix) {
                    return (base, op);
                }
            }
        }
        (key, Comparison::Eq)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Separator between path segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Separator {
    /// Single space: INSERT keys, which never traverse.
    Space,
    /// `.`: SELECT column references.
    Dot,
    /// `__`: keyword arguments.
    DoubleUnderscore,
}

impl Separator {
    pub fn as_str(self) -> &'static str {
        match self {
            Separator::Space => " ",
            Separator::Dot => ".",
            Separator::DoubleUnderscore => "__",
        }
    }
}

/// A parsed attribute path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
    raw: String,
    segments: Vec<String>,
    op: Comparison,
    is_where: bool,
}

impl KeyPath {
    /// Parse `raw`, stripping a comparison suffix and then a `where__` marker
    /// before splitting on `separator`.
    pub fn parse(raw: &str, separator: Separator) -> Self {
        let (base, op) = Comparison::strip(raw);
        let (base, is_where) = match base.strip_prefix(WHERE_MARKER) {
            Some(rest) => (rest, true),
            None => (base, false),
        };
        let segments = base
            .split(separator.as_str())
            .map(str::to_string)
            .collect();
        Self {
            raw: raw.to_string(),
            segments,
            op,
            is_where,
        }
    }

    /// The key exactly as the caller wrote it; also the placeholder name.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn op(&self) -> Comparison {
        self.op
    }

    pub fn is_where(&self) -> bool {
        self.is_where
    }

    /// True when the key is a single attribute name with no suffix or marker.
    pub fn is_plain(&self) -> bool {
        self.segments.len() == 1 && self.op == Comparison::Eq && !self.is_where
    }

    /// Segments joined with `.`.
    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_key() {
        let key = KeyPath::parse("name", Separator::DoubleUnderscore);
        assert_eq!(key.segments(), ["name"]);
        assert_eq!(key.op(), Comparison::Eq);
        assert!(!key.is_where());
        assert!(key.is_plain());
    }

    #[test]
    fn suffix_and_traversal() {
        let key = KeyPath::parse("pet__age__ge", Separator::DoubleUnderscore);
        assert_eq!(key.segments(), ["pet", "age"]);
        assert_eq!(key.op(), Comparison::Ge);
        assert_eq!(key.raw(), "pet__age__ge");
        assert_eq!(key.dotted(), "pet.age");
    }

    #[test]
    fn where_marker_with_suffix() {
        let key = KeyPath::parse("where__entity_id__ne", Separator::DoubleUnderscore);
        assert_eq!(key.segments(), ["entity_id"]);
        assert_eq!(key.op(), Comparison::Ne);
        assert!(key.is_where());
        assert!(!key.is_plain());
    }

    #[test]
    fn suffix_requires_separator() {
        // "salt" ends in "lt" but not "__lt"
        let key = KeyPath::parse("salt", Separator::DoubleUnderscore);
        assert_eq!(key.segments(), ["salt"]);
        assert_eq!(key.op(), Comparison::Eq);
    }

    #[test]
    fn dotted_columns() {
        let key = KeyPath::parse("pet.owner.name", Separator::Dot);
        assert_eq!(key.segments(), ["pet", "owner", "name"]);
    }

    #[test]
    fn space_separator_keeps_underscored_key_whole() {
        let key = KeyPath::parse("pet__name", Separator::Space);
        assert_eq!(key.segments(), ["pet__name"]);
    }

    #[test]
    fn operators_render() {
        assert_eq!(Comparison::Lt.as_sql(), "<");
        assert_eq!(Comparison::Le.as_sql(), "<=");
        assert_eq!(Comparison::Gt.to_string(), ">");
        assert_eq!(Comparison::Ne.as_sql(), "!=");
        assert_eq!(Comparison::Eq.suffix(), None);
    }
}
