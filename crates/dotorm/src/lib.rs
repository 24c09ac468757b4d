//! # dotorm
//!
//! Translate attribute paths over related entities into SQL text.
//!
//! Entities are declared as field-descriptor tables and collected in a
//! [`Registry`]. Statement builders walk `.`/`__` separated paths across
//! relations, infer the INNER JOINs they need, apply comparison suffixes
//! (`__lt`, `__le`, `__gt`, `__ge`, `__ne`) and emit SQL with `%(name)s`
//! placeholders. Nothing is executed: the caller binds the same keyword
//! arguments it passed in.
//!
//! ## Features
//!
//! - **Validated**: every path must resolve and every value must fit its
//!   declared column type, or no SQL is produced
//! - **Join inference**: one INNER JOIN per traversed entity
//! - **Static schema**: entities via [`EntityDef`] or `#[derive(Entity)]`
//!
//! ## Example
//!
//! ```ignore
//! use dotorm::{EntityDef, Registry, SqlType, kwargs};
//!
//! let registry = Registry::new()
//!     .with(EntityDef::new("Person").field("name", SqlType::Text).relation("pet", "Pet"))?
//!     .with(EntityDef::new("Pet").field("name", SqlType::Text))?;
//!
//! let sql = registry
//!     .model("Person")?
//!     .select(&["name", "pet.name"], &kwargs! { "pet__name__ne" => "Rex" })?;
//! assert_eq!(
//!     sql,
//!     "SELECT Person.name, Pet.name FROM Person \
//!      INNER JOIN Pet ON Pet.entity_id = Person.pet WHERE Pet.name != %(pet__name__ne)s"
//! );
//! # Ok::<(), dotorm::OrmError>(())
//! ```

pub mod builder;
pub mod entity;
pub mod error;
mod ident;
pub mod kwargs;
pub mod logging;
pub mod path;
pub mod registry;
pub mod resolve;
pub mod translate;
pub mod types;
pub mod validate;

pub mod prelude;

pub use builder::Model;
pub use entity::{ENTITY_ID, Entity, EntityDef, FieldDef, FieldType};
pub use error::{OrmError, OrmResult};
pub use kwargs::Kwargs;
pub use logging::StatementKind;
pub use path::{Comparison, KeyPath, Separator, WHERE_MARKER};
pub use registry::Registry;
pub use resolve::{Resolved, Step};
pub use translate::to_sql_column;
pub use types::{SqlType, SqlTypeCheck, StandardTypes, Value};
pub use validate::type_check;

#[cfg(feature = "derive")]
pub use dotorm_derive::Entity;
