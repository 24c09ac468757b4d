//! Path resolution: walking attribute paths across related entities.

use crate::entity::{EntityDef, FieldType};
use crate::path::{KeyPath, Separator};
use crate::registry::Registry;
use crate::types::SqlType;

/// What a path (or one step of it) resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'r> {
    /// A primitive column; traversal ends here.
    Scalar(SqlType),
    /// A related entity; traversal may continue into it.
    Entity(&'r EntityDef),
}

impl<'r> Resolved<'r> {
    pub fn as_entity(&self) -> Option<&'r EntityDef> {
        match *self {
            Resolved::Entity(def) => Some(def),
            Resolved::Scalar(_) => None,
        }
    }
}

/// One attribute lookup on the way along a path.
#[derive(Debug, Clone, Copy)]
pub struct Step<'r> {
    /// Entity holding the attribute.
    pub owner: &'r EntityDef,
    /// Attribute name, as declared on `owner`.
    pub attribute: &'r str,
    /// The attribute's resolved type.
    pub target: Resolved<'r>,
}

impl Registry {
    /// Resolve one attribute of `owner`.
    ///
    /// A relation whose target entity is not registered does not resolve.
    pub fn resolve_attribute<'r>(
        &'r self,
        owner: &'r EntityDef,
        attribute: &str,
    ) -> Option<Resolved<'r>> {
        self.resolve_field_type(owner.attribute(attribute)?)
    }

    fn resolve_field_type<'r>(&'r self, ty: &FieldType) -> Option<Resolved<'r>> {
        match ty {
            FieldType::Scalar(ty) => Some(Resolved::Scalar(*ty)),
            FieldType::Entity(target) => self.get(target).map(Resolved::Entity),
        }
    }

    /// Walk `segments` starting at `root`, returning every step taken.
    ///
    /// Returns `None` if a segment is undefined or a non-terminal segment is a
    /// scalar.
    pub fn walk<'r, S: AsRef<str>>(
        &'r self,
        root: &'r EntityDef,
        segments: &[S],
    ) -> Option<Vec<Step<'r>>> {
        let mut steps = Vec::with_capacity(segments.len());
        let mut owner = Some(root);
        for segment in segments {
            let current = owner?;
            let (attribute, ty) = current.lookup(segment.as_ref())?;
            let target = self.resolve_field_type(ty)?;
            owner = target.as_entity();
            steps.push(Step {
                owner: current,
                attribute,
                target,
            });
        }
        Some(steps)
    }

    /// Resolve a parsed key against `root`.
    pub fn resolve_key<'r>(&'r self, root: &'r EntityDef, key: &KeyPath) -> Option<Resolved<'r>> {
        self.walk(root, key.segments())?.last().map(|s| s.target)
    }

    /// Resolve a raw path string against `root`.
    ///
    /// A trailing comparison suffix and a leading `where__` marker are ignored.
    /// `None` means the path is invalid; it is not an error by itself.
    pub fn resolve<'r>(
        &'r self,
        root: &'r EntityDef,
        path: &str,
        separator: Separator,
    ) -> Option<Resolved<'r>> {
        self.resolve_key(root, &KeyPath::parse(path, separator))
    }
}
