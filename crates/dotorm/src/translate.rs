//! Translating resolved paths into SQL column references and JOIN clauses.

use crate::entity::{ENTITY_ID, EntityDef};
use crate::path::{KeyPath, Separator};
use crate::resolve::{Resolved, Step};

/// Translate a keyword key into a column reference without resolving it.
///
/// Strips the comparison suffix and `where__` marker, turns `__` into `.`,
/// and prefixes `root.` unless the result is already dotted.
///
/// ```ignore
/// assert_eq!(to_sql_column("Person", "age__gt"), "Person.age");
/// assert_eq!(to_sql_column("Person", "pet__name"), "pet.name");
/// ```
pub fn to_sql_column(root: &str, key: &str) -> String {
    let column = KeyPath::parse(key, Separator::DoubleUnderscore).dotted();
    if column.contains('.') {
        column
    } else {
        format!("{root}.{column}")
    }
}

/// Column reference for a walked path: the terminal attribute, prefixed with
/// the entity that owns it.
///
/// A path ending on a relation names the foreign-key column itself.
pub(crate) fn qualified_column(steps: &[Step<'_>]) -> String {
    match steps.last() {
        Some(last) => format!("{}.{}", last.owner.name(), last.attribute),
        None => String::new(),
    }
}

/// Accumulates the INNER JOINs a statement needs.
///
/// Each entity is joined at most once no matter how many paths pass through
/// it. The root is never joined to itself.
pub(crate) struct JoinSet<'r> {
    root: &'r EntityDef,
    joined: Vec<&'r str>,
    clause: String,
}

impl<'r> JoinSet<'r> {
    pub(crate) fn new(root: &'r EntityDef) -> Self {
        Self {
            root,
            joined: Vec::new(),
            clause: String::new(),
        }
    }

    /// Add the joins needed to reach the end of `steps`.
    pub(crate) fn add_path(&mut self, steps: &[Step<'r>]) {
        let Some((_, through)) = steps.split_last() else {
            return;
        };
        for step in through {
            let Resolved::Entity(target) = step.target else {
                continue;
            };
            if target.name() == self.root.name() || self.joined.contains(&target.name()) {
                continue;
            }
            self.clause.push_str(&format!(
                " INNER JOIN {t} ON {t}.{ENTITY_ID} = {owner}.{attr}",
                t = target.name(),
                owner = step.owner.name(),
                attr = step.attribute,
            ));
            self.joined.push(target.name());
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.joined.len()
    }

    /// `root` followed by its JOIN clauses.
    pub(crate) fn into_from(self) -> String {
        format!("{}{}", self.root.name(), self.clause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::types::SqlType;

    #[test]
    fn to_sql_column_prefixes_local_keys() {
        assert_eq!(to_sql_column("Person", "age"), "Person.age");
        assert_eq!(to_sql_column("Person", "age__gt"), "Person.age");
        assert_eq!(to_sql_column("Person", "where__name__ne"), "Person.name");
    }

    #[test]
    fn to_sql_column_leaves_traversals_dotted() {
        assert_eq!(to_sql_column("Person", "pet__name"), "pet.name");
        assert_eq!(to_sql_column("Person", "where__pet__vet__city"), "pet.vet.city");
    }

    #[test]
    fn join_set_skips_root_and_duplicates() {
        let registry = Registry::new()
            .with(
                EntityDef::new("Node")
                    .field("label", SqlType::Text)
                    .relation("parent", "Node")
                    .relation("tag", "Tag"),
            )
            .unwrap()
            .with(EntityDef::new("Tag").field("name", SqlType::Text))
            .unwrap();
        let node = registry.entity("Node").unwrap();

        let mut joins = JoinSet::new(node);
        joins.add_path(&registry.walk(node, &["parent", "label"]).unwrap());
        assert_eq!(joins.len(), 0);
        joins.add_path(&registry.walk(node, &["tag", "name"]).unwrap());
        joins.add_path(&registry.walk(node, &["tag", "entity_id"]).unwrap());
        assert_eq!(joins.len(), 1);
        assert_eq!(
            joins.into_from(),
            "Node INNER JOIN Tag ON Tag.entity_id = Node.tag"
        );
    }

    #[test]
    fn terminal_relation_is_not_joined() {
        let registry = Registry::new()
            .with(EntityDef::new("Person").relation("pet", "Pet"))
            .unwrap()
            .with(EntityDef::new("Pet"))
            .unwrap();
        let person = registry.entity("Person").unwrap();
        let steps = registry.walk(person, &["pet"]).unwrap();

        let mut joins = JoinSet::new(person);
        joins.add_path(&steps);
        assert_eq!(joins.into_from(), "Person");
        assert_eq!(qualified_column(&steps), "Person.pet");
    }
}
