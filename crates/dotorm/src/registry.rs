//! The entity registry.
//!
//! A [`Registry`] maps entity names to their field-descriptor tables and holds
//! the SQL-type predicate used during validation. Build it once at startup;
//! afterwards it is only read, so a shared `&Registry` (or a `static`
//! `LazyLock<Registry>`) serves any number of threads.

use crate::builder::Model;
use crate::entity::{ENTITY_ID, Entity, EntityDef};
use crate::error::{OrmError, OrmResult};
use crate::ident::{check_attribute_name, check_entity_name};
use crate::types::{SqlTypeCheck, StandardTypes};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Registry of entity declarations.
#[derive(Clone)]
pub struct Registry {
    entities: HashMap<String, EntityDef>,
    /// Registration order, for stable listings.
    order: Vec<String>,
    type_check: Arc<dyn SqlTypeCheck>,
}

impl Registry {
    /// Create an empty registry using [`StandardTypes`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the SQL-type predicate.
    pub fn with_type_check(mut self, check: impl SqlTypeCheck + 'static) -> Self {
        self.type_check = Arc::new(check);
        self
    }

    /// Register an entity declaration.
    ///
    /// Relation targets may be registered later; call [`Registry::validate`]
    /// once everything is in.
    pub fn register(&mut self, def: EntityDef) -> OrmResult<()> {
        check_entity_name(def.name())?;
        if self.entities.contains_key(def.name()) {
            return Err(OrmError::schema(format!(
                "duplicate entity: {}",
                def.name()
            )));
        }

        let mut seen = HashSet::with_capacity(def.fields().len());
        for field in def.fields() {
            check_attribute_name(def.name(), &field.name)?;
            if field.name == ENTITY_ID {
                return Err(OrmError::schema(format!(
                    "'{}.{ENTITY_ID}' is implicit and cannot be redeclared",
                    def.name()
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(OrmError::schema(format!(
                    "duplicate attribute: {}.{}",
                    def.name(),
                    field.name
                )));
            }
            if let Some(target) = field.ty.as_entity() {
                check_entity_name(target)?;
            }
        }

        self.order.push(def.name().to_string());
        self.entities.insert(def.name().to_string(), def);
        Ok(())
    }

    /// Register the entity declared by a Rust type.
    pub fn register_entity<E: Entity>(&mut self) -> OrmResult<()> {
        self.register(E::entity_def())
    }

    /// Builder-style [`Registry::register`].
    pub fn with(mut self, def: EntityDef) -> OrmResult<Self> {
        self.register(def)?;
        Ok(self)
    }

    /// Builder-style [`Registry::register_entity`].
    pub fn with_entity<E: Entity>(mut self) -> OrmResult<Self> {
        self.register_entity::<E>()?;
        Ok(self)
    }

    /// Check that every relation points at a registered entity.
    pub fn validate(&self) -> OrmResult<()> {
        for def in self.entities() {
            for (attr, target) in def.relations() {
                if !self.entities.contains_key(target) {
                    return Err(OrmError::schema(format!(
                        "{}.{attr} refers to unknown entity {target}",
                        def.name()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Look up an entity declaration.
    pub fn get(&self, name: &str) -> Option<&EntityDef> {
        self.entities.get(name)
    }

    /// Look up an entity declaration, failing with [`OrmError::UnknownEntity`].
    pub fn entity(&self, name: &str) -> OrmResult<&EntityDef> {
        self.get(name)
            .ok_or_else(|| OrmError::UnknownEntity(name.to_string()))
    }

    /// Statement-building handle for a registered entity.
    pub fn model(&self, name: &str) -> OrmResult<Model<'_>> {
        Ok(Model::new(self, self.entity(name)?))
    }

    /// Statement-building handle for the entity declared by `E`.
    pub fn model_of<E: Entity>(&self) -> OrmResult<Model<'_>> {
        self.model(E::NAME)
    }

    /// Entities in registration order.
    pub fn entities(&self) -> impl Iterator<Item = &EntityDef> {
        self.order.iter().filter_map(|name| self.entities.get(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// The SQL-type predicate consulted during validation.
    pub fn type_check(&self) -> &dyn SqlTypeCheck {
        self.type_check.as_ref()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            entities: HashMap::new(),
            order: Vec::new(),
            type_check: Arc::new(StandardTypes),
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("entities", &self.order)
            .finish_non_exhaustive()
    }
}
