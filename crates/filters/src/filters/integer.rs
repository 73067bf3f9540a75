//! Filter for whole numbers.

use crate::traits::Cast;
use inputs::{parser, CastFailure, ColumnType, Value};
use rust_decimal::prelude::ToPrimitive;

/// Casts to `Value::Integer`.
///
/// ## Algorithm
/// 1. Integers pass through
/// 2. Strings are parsed as base-10 after trimming ("1.5" fails)
/// 3. Floats and decimals convert only when they have no fractional part
///    and fit in an i64
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegerFilter;

impl Cast for IntegerFilter {
    fn type_name(&self) -> &'static str {
        "integer"
    }

    fn cast(&self, value: &Value) -> Result<Value, CastFailure> {
        match value {
            Value::Integer(_) => Ok(value.clone()),
            Value::String(s) => Ok(Value::Integer(parser::parse_integer(s)?)),
            Value::Float(f) => {
                // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 {
                    Ok(Value::Integer(*f as i64))
                } else {
                    Err(CastFailure::OutOfRange(format!("integer {}", f)))
                }
            }
            Value::Decimal(d) if d.fract().is_zero() => d
                .to_i64()
                .map(Value::Integer)
                .ok_or_else(|| CastFailure::OutOfRange(format!("integer {}", d))),
            other => Err(CastFailure::wrong_type("integer", other)),
        }
    }

    fn database_column_type(&self) -> ColumnType {
        ColumnType::Integer
    }
}
