//! DELETE filtered by keyword predicates.

use super::{Model, where_clause};
use crate::error::OrmResult;
use crate::kwargs::Kwargs;
use crate::logging::StatementKind;
use crate::path::Separator;

impl<'r> Model<'r> {
    /// Build `DELETE <entity>.* FROM <entity><joins>[ WHERE ...]`.
    ///
    /// Every key is a predicate, as in [`Model::select`]. Without keys the
    /// statement has no WHERE clause and targets every row.
    pub fn delete(&self, filter: &Kwargs) -> OrmResult<String> {
        self.finish(StatementKind::Delete, self.build_delete(filter))
    }

    fn build_delete(&self, filter: &Kwargs) -> OrmResult<String> {
        let predicates = self.check_kwargs(Separator::DoubleUnderscore, filter)?;

        let mut joins = self.joins();
        for path in &predicates {
            joins.add_path(&path.steps);
        }

        let predicates: Vec<_> = predicates.iter().collect();
        Ok(format!(
            "DELETE {name}.* FROM {from}{filter}",
            name = self.name(),
            from = joins.into_from(),
            filter = where_clause(&predicates)
        ))
    }
}
