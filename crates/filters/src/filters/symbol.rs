//! Filter for symbolic names (roles, states, enum-like strings).

use crate::traits::Cast;
use inputs::{CastFailure, ColumnType, Value};

/// Casts to `Value::Symbol`. Strings are converted as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SymbolFilter;

impl Cast for SymbolFilter {
    fn type_name(&self) -> &'static str {
        "symbol"
    }

    fn cast(&self, value: &Value) -> Result<Value, CastFailure> {
        match value {
            Value::Symbol(_) => Ok(value.clone()),
            Value::String(s) => Ok(Value::Symbol(s.clone())),
            other => Err(CastFailure::wrong_type("symbol", other)),
        }
    }

    // Symbols are stored as their text
    fn database_column_type(&self) -> ColumnType {
        ColumnType::String
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_filter() {
        let filter = SymbolFilter;
        let symbol = Value::Symbol("admin".to_string());

        assert_eq!(filter.cast(&symbol).unwrap(), symbol);
        assert_eq!(filter.cast(&Value::from("admin")).unwrap(), symbol);
        assert!(filter.cast(&Value::Integer(3)).is_err());
    }
}
