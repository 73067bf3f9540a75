//! Filter for exact decimal numbers (prices, rates).

use crate::traits::Cast;
use inputs::{parser, CastFailure, ColumnType, Value};
use rust_decimal::Decimal;

/// Casts to `Value::Decimal`.
///
/// Strings keep the scale they were written with ("1.10" stays "1.10").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecimalFilter;

impl Cast for DecimalFilter {
    fn type_name(&self) -> &'static str {
        "decimal"
    }

    fn cast(&self, value: &Value) -> Result<Value, CastFailure> {
        match value {
            Value::Decimal(_) => Ok(value.clone()),
            Value::Integer(i) => Ok(Value::Decimal(Decimal::from(*i))),
            Value::Float(f) => Ok(Value::Decimal(Decimal::try_from(*f)?)),
            Value::String(s) => Ok(Value::Decimal(parser::parse_decimal(s)?)),
            other => Err(CastFailure::wrong_type("decimal", other)),
        }
    }

    fn database_column_type(&self) -> ColumnType {
        ColumnType::Decimal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_filter() {
        let filter = DecimalFilter;

        assert_eq!(filter.cast(&Value::Integer(3)).unwrap(), Value::Decimal(Decimal::from(3)));
        assert_eq!(filter.cast(&Value::from("19.99")).unwrap(), Value::Decimal(Decimal::new(1999, 2)));
        assert_eq!(filter.cast(&Value::Float(0.5)).unwrap(), Value::Decimal(Decimal::new(5, 1)));
    }

    #[test]
    fn test_decimal_filter_rejects() {
        let filter = DecimalFilter;

        assert!(filter.cast(&Value::from("abc")).is_err());
        assert!(filter.cast(&Value::Float(f64::INFINITY)).is_err());
        assert!(filter.cast(&Value::Boolean(true)).is_err());
    }
}
