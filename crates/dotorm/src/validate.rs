//! Argument validation shared by the statement builders.

use crate::builder::Model;
use crate::error::{OrmError, OrmResult};
use crate::kwargs::Kwargs;
use crate::path::{KeyPath, Separator};
use crate::resolve::{Resolved, Step};
use crate::types::{SqlTypeCheck, Value};

/// A keyword argument or column whose path has been resolved.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedPath<'r> {
    pub key: KeyPath,
    pub steps: Vec<Step<'r>>,
}

impl<'r> ResolvedPath<'r> {
    pub(crate) fn target(&self) -> Option<Resolved<'r>> {
        self.steps.last().map(|s| s.target)
    }
}

/// Whether `value` may be bound to an attribute declared as `declared`.
///
/// Accepted if the SQL-type predicate accepts it, if it is a native instance
/// of the declared type, or if the attribute is a relation and the value is
/// an integer foreign key or `NULL`.
pub fn type_check(check: &dyn SqlTypeCheck, declared: Resolved<'_>, value: &Value) -> bool {
    match declared {
        Resolved::Scalar(ty) => check.is_sql_type(ty, value) || value.native_type() == Some(ty),
        Resolved::Entity(_) => value.is_int() || value.is_null(),
    }
}

impl<'r> Model<'r> {
    /// Whether every keyword argument resolves and its value type-checks.
    pub fn validate_types(&self, separator: Separator, kwargs: &Kwargs) -> bool {
        self.check_kwargs(separator, kwargs).is_ok()
    }

    /// Whether every column path resolves.
    ///
    /// A path ending on a relation is accepted; it names the foreign key.
    pub fn validate_columns<C: AsRef<str>>(&self, columns: &[C]) -> bool {
        columns
            .iter()
            .all(|c| self.resolve(c.as_ref(), Separator::Dot).is_some())
    }

    /// Resolve and type-check keyword arguments, stopping at the first failure.
    pub(crate) fn check_kwargs(
        &self,
        separator: Separator,
        kwargs: &Kwargs,
    ) -> OrmResult<Vec<ResolvedPath<'r>>> {
        let check = self.registry().type_check();
        let mut resolved = Vec::with_capacity(kwargs.len());
        for (raw, value) in kwargs.iter() {
            let path = self.resolve_path(KeyPath::parse(raw, separator))?;
            let Some(declared) = path.target() else {
                return Err(OrmError::validation(format!("empty path: '{raw}'")));
            };
            if !type_check(check, declared, value) {
                return Err(OrmError::validation(format!(
                    "{}: value {value} ({}) does not fit {}",
                    self.qualify_key(raw),
                    value.kind(),
                    describe(declared),
                )));
            }
            resolved.push(path);
        }
        Ok(resolved)
    }

    /// Resolve column paths for a SELECT list.
    pub(crate) fn check_columns<C: AsRef<str>>(
        &self,
        columns: &[C],
    ) -> OrmResult<Vec<ResolvedPath<'r>>> {
        columns
            .iter()
            .map(|c| self.resolve_path(KeyPath::parse(c.as_ref(), Separator::Dot)))
            .collect()
    }

    fn resolve_path(&self, key: KeyPath) -> OrmResult<ResolvedPath<'r>> {
        match self.registry().walk(self.def(), key.segments()) {
            Some(steps) => Ok(ResolvedPath { key, steps }),
            None => Err(OrmError::validation(format!(
                "cannot resolve '{}' on {}",
                key.raw(),
                self.name()
            ))),
        }
    }

    fn qualify_key(&self, raw: &str) -> String {
        crate::translate::to_sql_column(self.name(), raw)
    }
}

fn describe(declared: Resolved<'_>) -> String {
    match declared {
        Resolved::Scalar(ty) => ty.to_string(),
        Resolved::Entity(def) => format!("a reference to {}", def.name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityDef;
    use crate::registry::Registry;
    use crate::types::SqlType;

    fn registry() -> Registry {
        Registry::new()
            .with(
                EntityDef::new("Person")
                    .field("name", SqlType::Text)
                    .field("score", SqlType::Float)
                    .relation("pet", "Pet"),
            )
            .unwrap()
            .with(EntityDef::new("Pet").field("name", SqlType::Text))
            .unwrap()
    }

    #[test]
    fn accepts_matching_and_widened_values() {
        let r = registry();
        let person = r.model("Person").unwrap();
        let kw = crate::kwargs! { "name" => "Ann", "score__gt" => 3, "pet__name" => "Rex" };
        assert!(person.validate_types(Separator::DoubleUnderscore, &kw));
    }

    #[test]
    fn accepts_integer_foreign_key() {
        let r = registry();
        let person = r.model("Person").unwrap();
        assert!(person.validate_types(Separator::DoubleUnderscore, &crate::kwargs! { "pet" => 4 }));
        assert!(!person.validate_types(Separator::DoubleUnderscore, &crate::kwargs! { "pet" => "Rex" }));
    }

    #[test]
    fn accepts_null_foreign_key() {
        let r = registry();
        let person = r.model("Person").unwrap();
        let kw = crate::kwargs! { "pet" => Value::Null };
        assert!(person.validate_types(Separator::DoubleUnderscore, &kw));
        assert_eq!(
            person.insert(&kw).unwrap(),
            "INSERT INTO Person(pet) VALUES(%(pet)s)"
        );
    }

    #[test]
    fn rejects_mismatch_with_reason() {
        let r = registry();
        let person = r.model("Person").unwrap();
        let err = person
            .check_kwargs(Separator::DoubleUnderscore, &crate::kwargs! { "name" => 7 })
            .unwrap_err();
        assert_eq!(
            err,
            OrmError::validation("Person.name: value 7 (integer) does not fit text")
        );
    }

    #[test]
    fn rejects_unknown_key() {
        let r = registry();
        let person = r.model("Person").unwrap();
        let err = person
            .check_kwargs(Separator::DoubleUnderscore, &crate::kwargs! { "height" => 7 })
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn strict_predicate_still_allows_native_instances() {
        let r = registry().with_type_check(|_: SqlType, _: &Value| false);
        let person = r.model("Person").unwrap();
        assert!(person.validate_types(Separator::DoubleUnderscore, &crate::kwargs! { "name" => "Ann" }));
        // no widening without the standard predicate
        assert!(!person.validate_types(Separator::DoubleUnderscore, &crate::kwargs! { "score" => 1 }));
    }

    #[test]
    fn columns_resolve_including_relations() {
        let r = registry();
        let person = r.model("Person").unwrap();
        assert!(person.validate_columns(&["name", "pet.name", "pet"]));
        assert!(!person.validate_columns(&["name", "pet.age"]));
    }
}
