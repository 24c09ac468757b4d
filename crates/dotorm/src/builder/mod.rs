//! Statement builders.
//!
//! A [`Model`] is a registered entity bound to its registry. Its builders
//! validate every argument against the entity's declared attributes before
//! producing any text, and return SQL with `%(name)s` placeholders whose
//! names are the keyword-argument keys verbatim:
//!
//! ```ignore
//! let person = registry.model("Person")?;
//!
//! person.insert(&kwargs! { "name" => "Ann", "age" => 31 })?;
//! // INSERT INTO Person(name, age) VALUES(%(name)s, %(age)s)
//!
//! person.select(&["name", "pet.name"], &kwargs! { "age__gt" => 30 })?;
//! // SELECT Person.name, Pet.name FROM Person
//! //   INNER JOIN Pet ON Pet.entity_id = Person.pet WHERE Person.age > %(age__gt)s
//!
//! person.update(&kwargs! { "name" => "Bob", "where__entity_id" => 1 })?;
//! // UPDATE Person SET Person.name = %(name)s WHERE Person.entity_id = %(where__entity_id)s
//!
//! person.delete(&kwargs! { "age__lt" => 18 })?;
//! // DELETE Person.* FROM Person WHERE Person.age < %(age__lt)s
//! ```

mod delete;
mod insert;
mod select;
mod update;

use crate::entity::EntityDef;
use crate::error::{OrmError, OrmResult};
use crate::logging::{self, StatementKind};
use crate::path::{KeyPath, Separator};
use crate::registry::Registry;
use crate::resolve::Resolved;
use crate::translate::{JoinSet, qualified_column};
use crate::validate::ResolvedPath;
use std::fmt;

/// Statement-building handle for one registered entity.
#[derive(Clone, Copy)]
pub struct Model<'r> {
    registry: &'r Registry,
    def: &'r EntityDef,
}

impl<'r> Model<'r> {
    pub(crate) fn new(registry: &'r Registry, def: &'r EntityDef) -> Self {
        Self { registry, def }
    }

    /// Entity name; also the table name in generated SQL.
    pub fn name(&self) -> &'r str {
        self.def.name()
    }

    pub fn def(&self) -> &'r EntityDef {
        self.def
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Resolve a path rooted at this entity.
    pub fn resolve(&self, path: &str, separator: Separator) -> Option<Resolved<'r>> {
        self.registry.resolve(self.def, path, separator)
    }

    /// Qualify a dotted column path with the table that owns its terminal
    /// attribute.
    ///
    /// Paths whose first segment is this entity's own name are returned
    /// unchanged.
    ///
    /// ```ignore
    /// assert_eq!(person.qualify("age")?, "Person.age");
    /// assert_eq!(person.qualify("pet.vet.city")?, "Vet.city");
    /// assert_eq!(person.qualify("Person.age")?, "Person.age");
    /// ```
    pub fn qualify(&self, path: &str) -> OrmResult<String> {
        if path.split('.').next() == Some(self.name()) && path.contains('.') {
            return Ok(path.to_string());
        }
        let key = KeyPath::parse(path, Separator::Dot);
        self.registry
            .walk(self.def, key.segments())
            .map(|steps| qualified_column(&steps))
            .ok_or_else(|| {
                OrmError::validation(format!("cannot resolve '{path}' on {}", self.name()))
            })
    }

    /// Log the outcome of a build.
    fn finish(&self, kind: StatementKind, result: OrmResult<String>) -> OrmResult<String> {
        match &result {
            Ok(sql) => logging::statement_built(kind, self.name(), sql),
            Err(err) => logging::statement_rejected(kind, self.name(), err),
        }
        result
    }

    fn joins(&self) -> JoinSet<'r> {
        JoinSet::new(self.def)
    }
}

impl fmt::Debug for Model<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Model").field(&self.name()).finish()
    }
}

/// ` WHERE a = %(a)s AND b > %(b__gt)s`, or empty with no predicates.
fn where_clause(predicates: &[&ResolvedPath<'_>]) -> String {
    if predicates.is_empty() {
        return String::new();
    }
    let conditions: Vec<String> = predicates
        .iter()
        .map(|p| {
            format!(
                "{} {} %({})s",
                qualified_column(&p.steps),
                p.key.op().as_sql(),
                p.key.raw()
            )
        })
        .collect();
    format!(" WHERE {}", conditions.join(" AND "))
}
