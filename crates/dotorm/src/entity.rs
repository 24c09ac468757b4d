//! Entity declarations.
//!
//! An [`EntityDef`] is the static field-descriptor table of one table: its
//! name and the declared attributes with their types. Every entity also
//! carries the implicit integer identity attribute [`ENTITY_ID`].

use crate::types::SqlType;

/// Name of the implicit identity attribute every entity has.
pub const ENTITY_ID: &str = "entity_id";

static ENTITY_ID_TYPE: FieldType = FieldType::Scalar(SqlType::Integer);

/// Declared type of an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// A primitive column.
    Scalar(SqlType),
    /// A foreign key to another entity's `entity_id`.
    Entity(String),
}

impl FieldType {
    /// Target entity name if this is a relation.
    pub fn as_entity(&self) -> Option<&str> {
        match self {
            FieldType::Entity(name) => Some(name),
            FieldType::Scalar(_) => None,
        }
    }

    pub fn is_relation(&self) -> bool {
        matches!(self, FieldType::Entity(_))
    }
}

impl From<SqlType> for FieldType {
    fn from(ty: SqlType) -> Self {
        FieldType::Scalar(ty)
    }
}

/// One declared attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub ty: FieldType,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: impl Into<FieldType>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// Field-descriptor table for one entity.
///
/// # Example
/// ```ignore
/// let person = EntityDef::new("Person")
///     .field("name", SqlType::Text)
///     .field("age", SqlType::Integer)
///     .relation("pet", "Pet");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDef {
    name: String,
    fields: Vec<FieldDef>,
}

impl EntityDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Declare a primitive attribute.
    pub fn field(mut self, name: impl Into<String>, ty: SqlType) -> Self {
        self.fields.push(FieldDef::new(name, ty));
        self
    }

    /// Declare a foreign-key attribute pointing at `target`.
    pub fn relation(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.fields
            .push(FieldDef::new(name, FieldType::Entity(target.into())));
        self
    }

    pub fn push_field(&mut self, field: FieldDef) {
        self.fields.push(field);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared attributes, without the implicit identity.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Look up an attribute's type, including the implicit identity.
    pub fn attribute(&self, name: &str) -> Option<&FieldType> {
        self.lookup(name).map(|(_, ty)| ty)
    }

    /// Look up an attribute, returning its declared name and type.
    pub fn lookup(&self, name: &str) -> Option<(&str, &FieldType)> {
        if name == ENTITY_ID {
            return Some((ENTITY_ID, &ENTITY_ID_TYPE));
        }
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| (f.name.as_str(), &f.ty))
    }

    /// Iterate over relation attributes as `(attribute, target entity)`.
    pub fn relations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter_map(|f| f.ty.as_entity().map(|target| (f.name.as_str(), target)))
    }
}

/// A Rust type that declares an entity.
///
/// Usually implemented with `#[derive(Entity)]`.
pub trait Entity {
    /// Entity (table) name.
    const NAME: &'static str;

    /// Build the field-descriptor table.
    fn entity_def() -> EntityDef;
}
