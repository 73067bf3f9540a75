//! Filter declarations and the type-name registry.
//!
//! Declarations are plain data (usually JSON) describing one attribute:
//!
//! ```json
//! {"name": "start", "type": "time", "format": "%d/%m/%Y %H:%M:%S %z"}
//! {"name": "tags", "type": "array", "of": {"type": "string"}, "default": []}
//! {"name": "address", "type": "hash", "filters": [{"name": "city", "type": "string"}]}
//! ```
//!
//! `FilterDecl::build` looks the type name up, checks that every option
//! applies to that type, and validates the result (including its default)
//! before handing it out.

use crate::filter::{Filter, FilterKind};
use crate::filters::{
    ArrayFilter, BooleanFilter, DateFilter, DecimalFilter, FloatFilter, HashFilter, IntegerFilter,
    StringFilter, SymbolFilter, TimeFilter,
};
use inputs::{DeclarationError, Value};
use serde::{Deserialize, Deserializer};
use tracing::warn;

/// Every declarable type name
pub const TYPE_NAMES: &[&str] = &[
    "array", "boolean", "date", "decimal", "float", "hash", "integer", "string", "symbol", "time",
];

/// One attribute declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterDecl {
    /// May be left out only for an array's `of` declaration
    #[serde(default)]
    pub name: String,

    #[serde(rename = "type")]
    pub type_name: String,

    /// Present-but-null means "optional, defaults to nil"
    #[serde(default, deserialize_with = "present")]
    pub default: Option<Value>,

    #[serde(default)]
    pub desc: Option<String>,

    /// date, time
    #[serde(default)]
    pub format: Option<String>,

    /// string, hash
    #[serde(default)]
    pub strip: Option<bool>,

    /// array element declaration
    #[serde(default)]
    pub of: Option<Box<FilterDecl>>,

    /// hash field declarations
    #[serde(default)]
    pub filters: Vec<FilterDecl>,
}

/// Keep an explicit `null` as `Some(Value::Nil)`; a missing key stays `None`
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl FilterDecl {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            default: None,
            desc: None,
            format: None,
            strip: None,
            of: None,
            filters: Vec::new(),
        }
    }

    /// Build and validate the filter this declaration describes
    pub fn build(&self) -> Result<Filter, DeclarationError> {
        let mut filter = Filter::new(&self.name, self.kind()?);
        if let Some(default) = &self.default {
            filter = filter.with_default(default.clone());
        }
        if let Some(desc) = &self.desc {
            filter = filter.with_desc(desc.clone());
        }

        if let Err(err) = filter.validate() {
            warn!("Rejected declaration of {}: {}", self.name, err);
            return Err(err);
        }
        Ok(filter)
    }

    /// Resolve the declared type name to a concrete filter
    fn kind(&self) -> Result<FilterKind, DeclarationError> {
        self.check_options()?;

        let kind: FilterKind = match self.type_name.as_str() {
            "array" => match &self.of {
                Some(element) => {
                    let mut element = (**element).clone();
                    if element.name.is_empty() {
                        element.name = self.name.clone();
                    }
                    ArrayFilter::of(element.build()?).into()
                }
                None => ArrayFilter::new().into(),
            },
            "boolean" => BooleanFilter.into(),
            "date" => match &self.format {
                Some(format) => DateFilter::new().with_format(format).into(),
                None => DateFilter::new().into(),
            },
            "decimal" => DecimalFilter.into(),
            "float" => FloatFilter.into(),
            "hash" => {
                let mut hash = HashFilter::new().with_strip(self.strip.unwrap_or(true));
                for field in &self.filters {
                    hash = hash.with_field(field.build()?);
                }
                hash.into()
            }
            "integer" => IntegerFilter.into(),
            "string" => StringFilter::new()
                .with_strip(self.strip.unwrap_or(true))
                .into(),
            "symbol" => SymbolFilter.into(),
            "time" => match &self.format {
                Some(format) => TimeFilter::new().with_format(format).into(),
                None => TimeFilter::new().into(),
            },
            other => {
                return Err(DeclarationError::UnknownType {
                    name: self.name.clone(),
                    type_name: other.to_string(),
                });
            }
        };
        Ok(kind)
    }

    /// Reject options the declared type has no use for
    fn check_options(&self) -> Result<(), DeclarationError> {
        let t = self.type_name.as_str();
        let checks: [(&'static str, bool, &[&str]); 4] = [
            ("format", self.format.is_some(), &["date", "time"]),
            ("strip", self.strip.is_some(), &["string", "hash"]),
            ("of", self.of.is_some(), &["array"]),
            ("filters", !self.filters.is_empty(), &["hash"]),
        ];

        for (option, given, allowed) in checks {
            if given && TYPE_NAMES.contains(&t) && !allowed.contains(&t) {
                return Err(DeclarationError::InvalidOption {
                    name: self.name.clone(),
                    option,
                    reason: format!("does not apply to {} filters", t),
                });
            }
        }
        Ok(())
    }
}

/// Parse a JSON array of declarations
pub fn parse_declarations(json: &str) -> Result<Vec<FilterDecl>, DeclarationError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use inputs::{ColumnType, FilterError, GroupedInput};

    fn decl(json: &str) -> FilterDecl {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_every_type_name_builds() {
        for type_name in TYPE_NAMES {
            let filter = FilterDecl::new("x", *type_name).build().unwrap();
            assert_eq!(filter.type_name(), *type_name);
        }
    }

    #[test]
    fn test_unknown_type() {
        let err = FilterDecl::new("x", "money").build().unwrap_err();
        assert_eq!(
            err,
            DeclarationError::UnknownType {
                name: "x".to_string(),
                type_name: "money".to_string()
            }
        );
    }

    #[test]
    fn test_time_with_format() {
        let filter = decl(r#"{"name": "start", "type": "time", "format": "%d/%m/%Y"}"#)
            .build()
            .unwrap();

        assert_eq!(filter.database_column_type(), ColumnType::Datetime);
        assert!(filter.cast(&Value::from("13/12/2011")).is_ok());
        assert!(filter.cast(&Value::from("2011-12-13")).is_err());
    }

    #[test]
    fn test_null_default_is_kept() {
        let optional = decl(r#"{"name": "note", "type": "string", "default": null}"#);
        assert_eq!(optional.default, Some(Value::Nil));

        let required = decl(r#"{"name": "note", "type": "string"}"#);
        assert_eq!(required.default, None);
    }

    #[test]
    fn test_option_must_apply_to_type() {
        let err = decl(r#"{"name": "n", "type": "integer", "format": "%d"}"#)
            .build()
            .unwrap_err();

        assert!(matches!(err, DeclarationError::InvalidOption { option: "format", .. }));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<FilterDecl, _> =
            serde_json::from_str(r#"{"name": "n", "type": "integer", "colour": "red"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_default_is_rejected_at_build() {
        let mut declaration = FilterDecl::new("start", "time");
        declaration.default = Some(Value::Grouped(GroupedInput::from([("2", "1")])));

        let err = declaration.build().unwrap_err();
        assert!(matches!(err, DeclarationError::Default(FilterError::InvalidDefault { .. })));
    }

    #[test]
    fn test_nested_declarations() {
        let filter = decl(
            r#"{
                "name": "order",
                "type": "hash",
                "filters": [
                    {"name": "ids", "type": "array", "of": {"type": "integer"}},
                    {"name": "note", "type": "string", "default": null}
                ]
            }"#,
        )
        .build()
        .unwrap();

        let raw = Value::from_json(&serde_json::json!({"ids": ["1", 2]}));
        let cast = filter.cast(&raw).unwrap();
        assert_eq!(
            cast,
            Value::from_json(&serde_json::json!({"ids": [1, 2], "note": null}))
        );
    }

    #[test]
    fn test_strip_option_reaches_filter() {
        let string = decl(r#"{"name": "s", "type": "string", "strip": false}"#).build().unwrap();
        assert!(matches!(string.kind(), FilterKind::String(f) if !f.strip()));

        let hash = decl(r#"{"name": "h", "type": "hash", "strip": false}"#).build().unwrap();
        assert!(matches!(hash.kind(), FilterKind::Hash(f) if !f.strip()));

        let default = FilterDecl::new("h", "hash").build().unwrap();
        assert!(matches!(default.kind(), FilterKind::Hash(f) if f.strip()));
    }

    #[test]
    fn test_parse_declarations_malformed() {
        let err = parse_declarations("{not json").unwrap_err();
        assert!(matches!(err, DeclarationError::Malformed(_)));
    }
}
