//! Filter for lists, optionally with a filter applied to every element.

use crate::filter::Filter;
use crate::traits::Cast;
use inputs::{CastFailure, ColumnType, Value};

/// Casts to `Value::Array`.
///
/// Without an element filter any array passes through. With one, every
/// element is cleaned by it (its default fills nil elements) and the first
/// failing element fails the whole array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrayFilter {
    element: Option<Box<Filter>>,
}

impl ArrayFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cast every element with `element`
    pub fn of(element: Filter) -> Self {
        Self {
            element: Some(Box::new(element)),
        }
    }

    pub fn element(&self) -> Option<&Filter> {
        self.element.as_deref()
    }
}

impl Cast for ArrayFilter {
    fn type_name(&self) -> &'static str {
        "array"
    }

    fn cast(&self, value: &Value) -> Result<Value, CastFailure> {
        let Value::Array(items) = value else {
            return Err(CastFailure::wrong_type("array", value));
        };

        match &self.element {
            None => Ok(value.clone()),
            Some(element) => items
                .iter()
                .enumerate()
                .map(|(index, item)| element.resolve_at(Some(item), index.to_string()))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
        }
    }

    fn database_column_type(&self) -> ColumnType {
        ColumnType::String
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::IntegerFilter;

    #[test]
    fn test_array_without_element_filter() {
        let raw = Value::Array(vec![Value::from("a"), Value::Integer(1)]);
        assert_eq!(ArrayFilter::new().cast(&raw).unwrap(), raw);
    }

    #[test]
    fn test_array_casts_each_element() {
        let filter = ArrayFilter::of(Filter::new("ids", IntegerFilter));
        let raw = Value::Array(vec![Value::from("1"), Value::Integer(2)]);

        assert_eq!(
            filter.cast(&raw).unwrap(),
            Value::Array(vec![Value::Integer(1), Value::Integer(2)])
        );
    }

    #[test]
    fn test_array_fails_on_bad_element() {
        let filter = ArrayFilter::of(Filter::new("ids", IntegerFilter));
        let raw = Value::Array(vec![Value::from("1"), Value::from("two")]);

        let err = filter.cast(&raw).unwrap_err();
        assert!(matches!(err, CastFailure::Nested { ref key, .. } if key == "1"));
    }

    #[test]
    fn test_array_rejects_non_arrays() {
        assert!(ArrayFilter::new().cast(&Value::from("1,2")).is_err());
    }
}
