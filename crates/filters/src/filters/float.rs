//! Filter for floating point numbers.

use crate::traits::Cast;
use inputs::{parser, CastFailure, ColumnType, Value};
use rust_decimal::prelude::ToPrimitive;

/// Casts to `Value::Float`. Integers and decimals widen, strings are parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FloatFilter;

impl Cast for FloatFilter {
    fn type_name(&self) -> &'static str {
        "float"
    }

    fn cast(&self, value: &Value) -> Result<Value, CastFailure> {
        match value {
            Value::Float(_) => Ok(value.clone()),
            Value::Integer(i) => Ok(Value::Float(*i as f64)),
            Value::Decimal(d) => d
                .to_f64()
                .map(Value::Float)
                .ok_or_else(|| CastFailure::OutOfRange(format!("float {}", d))),
            Value::String(s) => Ok(Value::Float(parser::parse_float(s)?)),
            other => Err(CastFailure::wrong_type("float", other)),
        }
    }

    fn database_column_type(&self) -> ColumnType {
        ColumnType::Float
    }
}
