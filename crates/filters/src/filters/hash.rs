//! Filter for nested hashes with their own declared attributes.

use crate::filter::Filter;
use crate::traits::Cast;
use inputs::{CastFailure, ColumnType, Value};
use std::collections::BTreeMap;

/// Casts to `Value::Hash`.
///
/// ## Algorithm
/// 1. Start from an empty hash (`strip`, the default) or a copy of the input
/// 2. For each nested filter, clean the value under its name; nested
///    defaults apply, a missing required key fails the hash
/// 3. Insert the cleaned value under the filter's name
#[derive(Debug, Clone, PartialEq)]
pub struct HashFilter {
    fields: Vec<Filter>,
    strip: bool,
}

impl HashFilter {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            strip: true,
        }
    }

    /// Declare a nested attribute (builder pattern)
    pub fn with_field(mut self, field: Filter) -> Self {
        self.fields.push(field);
        self
    }

    /// Configure dropping of undeclared keys (default: true)
    pub fn with_strip(mut self, strip: bool) -> Self {
        self.strip = strip;
        self
    }

    pub fn fields(&self) -> &[Filter] {
        &self.fields
    }

    pub fn strip(&self) -> bool {
        self.strip
    }
}

impl Default for HashFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Cast for HashFilter {
    fn type_name(&self) -> &'static str {
        "hash"
    }

    fn cast(&self, value: &Value) -> Result<Value, CastFailure> {
        let Value::Hash(map) = value else {
            return Err(CastFailure::wrong_type("hash", value));
        };

        let mut cleaned = if self.strip { BTreeMap::new() } else { map.clone() };
        for field in &self.fields {
            let value = field.resolve_at(map.get(field.name()), field.name())?;
            cleaned.insert(field.name().to_string(), value);
        }

        Ok(Value::Hash(cleaned))
    }

    fn database_column_type(&self) -> ColumnType {
        ColumnType::String
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{IntegerFilter, StringFilter};

    fn address_filter() -> HashFilter {
        HashFilter::new()
            .with_field(Filter::new("street", StringFilter::new()))
            .with_field(Filter::new("number", IntegerFilter).with_default(1i64))
    }

    fn hash(pairs: &[(&str, Value)]) -> Value {
        Value::Hash(pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect())
    }

    #[test]
    fn test_hash_casts_nested_fields() {
        let raw = hash(&[("street", Value::from(" Main ")), ("number", Value::from("12"))]);

        assert_eq!(
            address_filter().cast(&raw).unwrap(),
            hash(&[("street", Value::from("Main")), ("number", Value::Integer(12))])
        );
    }

    #[test]
    fn test_hash_applies_nested_defaults_and_strips() {
        let raw = hash(&[("street", Value::from("Main")), ("extra", Value::Boolean(true))]);

        assert_eq!(
            address_filter().cast(&raw).unwrap(),
            hash(&[("street", Value::from("Main")), ("number", Value::Integer(1))])
        );
    }

    #[test]
    fn test_hash_keeps_undeclared_keys_without_strip() {
        let raw = hash(&[("street", Value::from("Main")), ("extra", Value::Boolean(true))]);
        let cast = address_filter().with_strip(false).cast(&raw).unwrap();

        let Value::Hash(map) = cast else {
            panic!("expected a hash");
        };
        assert_eq!(map["extra"], Value::Boolean(true));
    }

    #[test]
    fn test_hash_missing_required_key() {
        let raw = hash(&[("number", Value::Integer(3))]);
        let err = address_filter().cast(&raw).unwrap_err();

        assert!(matches!(err, CastFailure::MissingKey { ref key } if key == "street"));
    }

    #[test]
    fn test_missing_key_inside_array_keeps_its_path() {
        let filter = crate::filters::ArrayFilter::of(Filter::new("addresses", address_filter()));
        let raw = Value::Array(vec![hash(&[("number", Value::Integer(3))])]);

        let err = filter.cast(&raw).unwrap_err();
        assert_eq!(err.to_string(), "0: street is required");
    }
}
