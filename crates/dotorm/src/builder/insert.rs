//! INSERT into a single table.

use super::Model;
use crate::error::{OrmError, OrmResult};
use crate::kwargs::Kwargs;
use crate::logging::StatementKind;
use crate::path::Separator;

impl<'r> Model<'r> {
    /// Build `INSERT INTO <entity>(<keys>) VALUES(%(<key>)s, ...)`.
    ///
    /// Keys must be attribute names of this entity; no traversal, comparison
    /// suffix or `where__` marker. A relation attribute takes an integer id.
    pub fn insert(&self, values: &Kwargs) -> OrmResult<String> {
        self.finish(StatementKind::Insert, self.build_insert(values))
    }

    fn build_insert(&self, values: &Kwargs) -> OrmResult<String> {
        if values.is_empty() {
            return Err(OrmError::validation(format!(
                "INSERT into {} requires at least one value",
                self.name()
            )));
        }
        let resolved = self.check_kwargs(Separator::Space, values)?;
        if let Some(bad) = resolved.iter().find(|p| !p.key.is_plain()) {
            return Err(OrmError::validation(format!(
                "INSERT key '{}' must be a plain attribute name",
                bad.key.raw()
            )));
        }

        let columns: Vec<&str> = values.keys().collect();
        let placeholders: Vec<String> = columns.iter().map(|k| format!("%({k})s")).collect();
        Ok(format!(
            "INSERT INTO {}({}) VALUES({})",
            self.name(),
            columns.join(", "),
            placeholders.join(", ")
        ))
    }
}
