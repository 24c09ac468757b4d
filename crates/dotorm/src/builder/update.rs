//! UPDATE with `where__` predicates.

use super::{Model, where_clause};
use crate::error::{OrmError, OrmResult};
use crate::kwargs::Kwargs;
use crate::logging::StatementKind;
use crate::path::{Comparison, Separator};
use crate::translate::qualified_column;

impl<'r> Model<'r> {
    /// Build `UPDATE <entity><joins> SET <col> = %(<key>)s, ...[ WHERE ...]`.
    ///
    /// Keys starting with `where__` are predicates; the rest are assignments.
    /// Assignments may traverse relations (`pet__name`) but cannot carry a
    /// comparison suffix.
    pub fn update(&self, values: &Kwargs) -> OrmResult<String> {
        self.finish(StatementKind::Update, self.build_update(values))
    }

    fn build_update(&self, values: &Kwargs) -> OrmResult<String> {
        let resolved = self.check_kwargs(Separator::DoubleUnderscore, values)?;
        let (predicates, assignments): (Vec<_>, Vec<_>) =
            resolved.iter().partition(|p| p.key.is_where());

        if assignments.is_empty() {
            return Err(OrmError::validation(format!(
                "UPDATE on {} requires at least one assignment",
                self.name()
            )));
        }
        if let Some(bad) = assignments.iter().find(|p| p.key.op() != Comparison::Eq) {
            return Err(OrmError::validation(format!(
                "UPDATE assignment '{}' cannot use a comparison suffix",
                bad.key.raw()
            )));
        }

        let mut joins = self.joins();
        for path in assignments.iter().chain(&predicates) {
            joins.add_path(&path.steps);
        }

        let set_list: Vec<String> = assignments
            .iter()
            .map(|p| format!("{} = %({})s", qualified_column(&p.steps), p.key.raw()))
            .collect();
        Ok(format!(
            "UPDATE {} SET {}{}",
            joins.into_from(),
            set_list.join(", "),
            where_clause(&predicates)
        ))
    }
}
