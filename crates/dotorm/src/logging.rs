//! Statement-level debug events.
//!
//! With the `tracing` feature every built statement is emitted on target
//! `dotorm.sql`, and every rejected one with the validation reason. Without
//! the feature these are no-ops.

use crate::error::OrmError;
use std::fmt;

/// Kind of statement being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Insert,
    Select,
    Update,
    Delete,
}

impl StatementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::Insert => "INSERT",
            StatementKind::Select => "SELECT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "tracing")]
pub(crate) fn statement_built(kind: StatementKind, entity: &str, sql: &str) {
    tracing::debug!(target: "dotorm.sql", kind = kind.as_str(), entity, sql, "statement built");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn statement_built(_kind: StatementKind, _entity: &str, _sql: &str) {}

#[cfg(feature = "tracing")]
pub(crate) fn statement_rejected(kind: StatementKind, entity: &str, err: &OrmError) {
    tracing::debug!(target: "dotorm.sql", kind = kind.as_str(), entity, error = %err, "statement rejected");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn statement_rejected(_kind: StatementKind, _entity: &str, _err: &OrmError) {}
