//! Results of running a filter set: typed attributes or collected errors.

use inputs::{FilterError, Value};
use std::fmt;

/// Typed values keyed by attribute name, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    values: Vec<(String, Value)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing an earlier value under the same name
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// JSON object with one key per attribute
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.values
                .iter()
                .map(|(n, v)| (n.clone(), v.to_json()))
                .collect(),
        )
    }
}

/// One entry in an error report
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// Reported by a filter while cleaning inputs
    Filter(FilterError),
    /// Added by business logic after the inputs were valid
    Custom { attribute: String, message: String },
}

/// Attribute for errors that do not belong to a single input
pub const BASE: &str = "base";

impl Failure {
    pub fn attribute(&self) -> &str {
        match self {
            Failure::Filter(err) => err.name(),
            Failure::Custom { attribute, .. } => attribute,
        }
    }

    /// Human-readable sentence, prefixed with the attribute unless it is `base`
    pub fn full_message(&self) -> String {
        match self {
            Failure::Filter(err) => err.to_string(),
            Failure::Custom { attribute, message } if attribute == BASE => message.clone(),
            Failure::Custom { attribute, message } => format!("{} {}", attribute, message),
        }
    }
}

/// Every failure from one pass, in the order it was found.
///
/// Filters are not fail-fast across attributes: a set with three bad inputs
/// produces three entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Errors {
    failures: Vec<Failure>,
}

impl Errors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: FilterError) {
        self.failures.push(Failure::Filter(err));
    }

    /// Record a failure that did not come from a filter
    pub fn add(&mut self, attribute: impl Into<String>, message: impl Into<String>) {
        self.failures.push(Failure::Custom {
            attribute: attribute.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Failure> {
        self.failures.iter()
    }

    /// Failures for one attribute
    pub fn on<'a>(&'a self, attribute: &'a str) -> impl Iterator<Item = &'a Failure> + 'a {
        self.failures
            .iter()
            .filter(move |failure| failure.attribute() == attribute)
    }

    pub fn full_messages(&self) -> Vec<String> {
        self.failures.iter().map(Failure::full_message).collect()
    }

    /// JSON array of `{attribute, kind, message}` objects
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.failures
                .iter()
                .map(|failure| {
                    let kind = match failure {
                        Failure::Filter(err) => err.kind(),
                        Failure::Custom { .. } => "custom",
                    };
                    serde_json::json!({
                        "attribute": failure.attribute(),
                        "kind": kind,
                        "message": failure.full_message(),
                    })
                })
                .collect(),
        )
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_messages().join(", "))
    }
}

impl std::error::Error for Errors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_keep_insertion_order() {
        let mut attributes = Attributes::new();
        attributes.insert("b", Value::Integer(1));
        attributes.insert("a", Value::Integer(2));
        attributes.insert("b", Value::Integer(3));

        let names: Vec<&str> = attributes.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(attributes.get("b"), Some(&Value::Integer(3)));
    }

    #[test]
    fn test_full_messages() {
        let mut errors = Errors::new();
        errors.push(FilterError::MissingValue { name: "email".to_string() });
        errors.add("password", "is too short");
        errors.add(BASE, "Account is locked");

        assert_eq!(
            errors.to_string(),
            "email is required, password is too short, Account is locked"
        );
        assert_eq!(errors.on("password").count(), 1);
    }
}
