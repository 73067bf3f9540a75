//! Filter for text inputs.

use crate::traits::Cast;
use inputs::{CastFailure, ColumnType, Value};

/// Casts to `Value::String`.
///
/// Only strings are accepted; numbers are not silently turned into text.
/// With `strip` (the default) surrounding whitespace is removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringFilter {
    strip: bool,
}

impl StringFilter {
    pub fn new() -> Self {
        Self { strip: true }
    }

    /// Configure whitespace stripping (default: true)
    pub fn with_strip(mut self, strip: bool) -> Self {
        self.strip = strip;
        self
    }

    pub fn strip(&self) -> bool {
        self.strip
    }
}

impl Default for StringFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Cast for StringFilter {
    fn type_name(&self) -> &'static str {
        "string"
    }

    fn cast(&self, value: &Value) -> Result<Value, CastFailure> {
        match value {
            Value::String(s) if self.strip => Ok(Value::String(s.trim().to_string())),
            Value::String(_) => Ok(value.clone()),
            other => Err(CastFailure::wrong_type("string", other)),
        }
    }

    fn database_column_type(&self) -> ColumnType {
        ColumnType::String
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_filter_strips_by_default() {
        let filter = StringFilter::new();
        assert_eq!(filter.cast(&Value::from("  hi ")).unwrap(), Value::from("hi"));
    }

    #[test]
    fn test_string_filter_without_strip() {
        let filter = StringFilter::new().with_strip(false);
        assert_eq!(filter.cast(&Value::from("  hi ")).unwrap(), Value::from("  hi "));
    }

    #[test]
    fn test_string_filter_rejects_numbers() {
        let filter = StringFilter::new();
        assert!(filter.cast(&Value::Integer(1)).is_err());
    }
}
