//! Convenient imports for typical `dotorm` usage.
//!
//! ```ignore
//! use dotorm::prelude::*;
//! ```

pub use crate::{
    Entity, EntityDef, Kwargs, Model, OrmError, OrmResult, Registry, SqlType, Value, kwargs,
};
