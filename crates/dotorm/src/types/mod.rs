//! Primitive SQL types and the values bound to them.
//!
//! [`SqlType`] is the closed set of column types an attribute may declare.
//! [`Value`] is what a caller passes as a keyword argument; it is checked
//! against the declared type before any SQL is produced.

mod check;

pub use check::{SqlTypeCheck, StandardTypes};

use crate::error::OrmError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A primitive column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    Text,
    Integer,
    Float,
    Boolean,
    Date,
    DateTime,
    Uuid,
    Json,
}

impl SqlType {
    /// Canonical lowercase name, as accepted by [`SqlType::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            SqlType::Text => "text",
            SqlType::Integer => "integer",
            SqlType::Float => "float",
            SqlType::Boolean => "boolean",
            SqlType::Date => "date",
            SqlType::DateTime => "datetime",
            SqlType::Uuid => "uuid",
            SqlType::Json => "json",
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SqlType {
    type Err = OrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ty = match s.trim().to_ascii_lowercase().as_str() {
            "text" | "string" | "varchar" => SqlType::Text,
            "integer" | "int" | "bigint" => SqlType::Integer,
            "float" | "real" | "double" => SqlType::Float,
            "boolean" | "bool" => SqlType::Boolean,
            "date" => SqlType::Date,
            "datetime" | "timestamp" => SqlType::DateTime,
            "uuid" => SqlType::Uuid,
            "json" | "jsonb" => SqlType::Json,
            other => return Err(OrmError::schema(format!("unknown sql type: {other}"))),
        };
        Ok(ty)
    }
}

/// A keyword-argument value.
///
/// Serializes untagged so a [`crate::Kwargs`] map can be handed straight to a
/// parameter-binding layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Uuid(Uuid),
    Json(serde_json::Value),
}

impl Value {
    /// The type this value is a native instance of. `Null` has none.
    pub fn native_type(&self) -> Option<SqlType> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(SqlType::Boolean),
            Value::Int(_) => Some(SqlType::Integer),
            Value::Float(_) => Some(SqlType::Float),
            Value::Text(_) => Some(SqlType::Text),
            Value::Date(_) => Some(SqlType::Date),
            Value::DateTime(_) => Some(SqlType::DateTime),
            Value::Uuid(_) => Some(SqlType::Uuid),
            Value::Json(_) => Some(SqlType::Json),
        }
    }

    /// Short name of the value's kind, for error messages.
    pub fn kind(&self) -> &'static str {
        self.native_type().map_or("null", SqlType::name)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    /// Convert a JSON literal into the closest value.
    ///
    /// Integral numbers become `Int`, other numbers `Float`. Strings holding an
    /// ISO date (`2024-01-31`) or datetime (`2024-01-31T10:00:00`) become
    /// `Date`/`DateTime`. Arrays and objects stay `Json`.
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map_or(Value::Json(serde_json::Value::Number(n)), Value::Float),
            },
            serde_json::Value::String(s) => Value::from_text(s),
            other => Value::Json(other),
        }
    }

    fn from_text(s: String) -> Self {
        if let Ok(date) = NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
            return Value::Date(date);
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S") {
            return Value::DateTime(dt);
        }
        Value::Text(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{s:?}"),
            Value::Date(d) => write!(f, "{d}"),
            Value::DateTime(dt) => write!(f, "{dt}"),
            Value::Uuid(u) => write!(f, "{u}"),
            Value::Json(j) => write!(f, "{j}"),
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_try_from_wide_int {
    ($($t:ty),*) => {
        $(
            impl TryFrom<$t> for Value {
                type Error = OrmError;

                fn try_from(v: $t) -> Result<Self, Self::Error> {
                    i64::try_from(v).map(Value::Int).map_err(|_| {
                        OrmError::validation(format!("integer {v} does not fit a 64-bit column"))
                    })
                }
            }
        )*
    };
}

// Only the in-range half of these converts; bind them with `Value::try_from`.
impl_try_from_wide_int!(u64, usize);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(v: DateTime<Tz>) -> Self {
        Value::DateTime(v.naive_utc())
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
