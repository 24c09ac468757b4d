//! SELECT with inferred joins.

use super::{Model, where_clause};
use crate::error::{OrmError, OrmResult};
use crate::kwargs::Kwargs;
use crate::logging::StatementKind;
use crate::path::Separator;
use crate::translate::qualified_column;

impl<'r> Model<'r> {
    /// Build `SELECT <columns> FROM <entity><joins>[ WHERE <predicates>]`.
    ///
    /// `columns` are dotted paths (`name`, `pet.vet.city`); each is qualified
    /// with the table owning its last attribute. `filter` keys are
    /// `__`-separated paths with an optional comparison suffix. Every entity
    /// a column or filter passes through is joined once.
    pub fn select<C: AsRef<str>>(&self, columns: &[C], filter: &Kwargs) -> OrmResult<String> {
        self.finish(StatementKind::Select, self.build_select(columns, filter))
    }

    fn build_select<C: AsRef<str>>(&self, columns: &[C], filter: &Kwargs) -> OrmResult<String> {
        if columns.is_empty() {
            return Err(OrmError::validation(format!(
                "SELECT on {} requires at least one column",
                self.name()
            )));
        }
        let predicates = self.check_kwargs(Separator::DoubleUnderscore, filter)?;
        let columns = self.check_columns(columns)?;

        let mut joins = self.joins();
        for path in columns.iter().chain(&predicates) {
            joins.add_path(&path.steps);
        }

        let select_list: Vec<String> = columns.iter().map(|c| qualified_column(&c.steps)).collect();
        let predicates: Vec<_> = predicates.iter().collect();
        Ok(format!(
            "SELECT {} FROM {}{}",
            select_list.join(", "),
            joins.into_from(),
            where_clause(&predicates)
        ))
    }
}
