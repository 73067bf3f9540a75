//! Filter for true/false inputs.
//!
//! Form submissions send checkboxes as "1"/"0" or "true"/"false".

use crate::traits::Cast;
use inputs::{parser, CastFailure, ColumnType, Value};

/// Casts to `Value::Boolean`.
///
/// Accepts booleans, the strings "1"/"true"/"0"/"false" (any case) and the
/// integers 1 and 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BooleanFilter;

impl Cast for BooleanFilter {
    fn type_name(&self) -> &'static str {
        "boolean"
    }

    fn cast(&self, value: &Value) -> Result<Value, CastFailure> {
        match value {
            Value::Boolean(_) => Ok(value.clone()),
            Value::String(s) => Ok(Value::Boolean(parser::parse_boolean(s)?)),
            Value::Integer(1) => Ok(Value::Boolean(true)),
            Value::Integer(0) => Ok(Value::Boolean(false)),
            other => Err(CastFailure::wrong_type("boolean", other)),
        }
    }

    fn database_column_type(&self) -> ColumnType {
        ColumnType::Boolean
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_filter() {
        let filter = BooleanFilter;

        assert_eq!(filter.cast(&Value::Boolean(false)).unwrap(), Value::Boolean(false));
        assert_eq!(filter.cast(&Value::from("1")).unwrap(), Value::Boolean(true));
        assert_eq!(filter.cast(&Value::from("False")).unwrap(), Value::Boolean(false));
        assert_eq!(filter.cast(&Value::Integer(1)).unwrap(), Value::Boolean(true));
    }

    #[test]
    fn test_boolean_filter_rejects() {
        let filter = BooleanFilter;

        assert!(filter.cast(&Value::from("maybe")).is_err());
        assert!(filter.cast(&Value::Integer(2)).is_err());
        assert!(filter.cast(&Value::Float(1.0)).is_err());
    }
}
