use super::{SqlType, Value};
use uuid::Uuid;

/// Decides whether a value is acceptable for a column of a given SQL type.
///
/// The registry consults this before falling back to the native-instance and
/// foreign-key checks. Closures of the right shape implement it too:
///
/// ```ignore
/// let registry = Registry::new().with_type_check(|ty: SqlType, v: &Value| {
///     ty == SqlType::Text || !v.is_null()
/// });
/// ```
pub trait SqlTypeCheck: Send + Sync {
    fn is_sql_type(&self, expected: SqlType, value: &Value) -> bool;
}

impl<F> SqlTypeCheck for F
where
    F: Fn(SqlType, &Value) -> bool + Send + Sync,
{
    fn is_sql_type(&self, expected: SqlType, value: &Value) -> bool {
        self(expected, value)
    }
}

/// Default compatibility rules.
///
/// - `NULL` fits any column.
/// - Integers widen into float columns.
/// - Dates fit datetime columns.
/// - Text holding a valid UUID fits uuid columns.
/// - Anything fits a json column.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTypes;

impl SqlTypeCheck for StandardTypes {
    fn is_sql_type(&self, expected: SqlType, value: &Value) -> bool {
        match (expected, value) {
            (_, Value::Null) => true,
            (SqlType::Json, _) => true,
            (SqlType::Float, Value::Int(_)) => true,
            (SqlType::DateTime, Value::Date(_)) => true,
            (SqlType::Uuid, Value::Text(s)) => Uuid::parse_str(s).is_ok(),
            _ => value.native_type() == Some(expected),
        }
    }
}
