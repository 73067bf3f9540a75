//! Error types for the inputs crate.
//!
//! There are three layers of errors here:
//! - `CastFailure` is what parsing and assembly code returns internally.
//!   It wraps library errors (chrono, std number parsing, rust_decimal)
//!   so `?` works everywhere inside a cast.
//! - `FilterError` is the only error a filter hands back to its caller.
//!   A `CastFailure` is turned into one at the filter boundary, so callers
//!   never see a library parse error.
//! - `DeclarationError` covers mistakes in how filters were declared
//!   (unknown types, duplicate names, broken defaults).

use crate::types::Value;
use thiserror::Error;

/// Errors reported by a filter for a single attribute.
///
/// Rust concept: each variant carries its own context fields, and the
/// `#[error(...)]` attribute from thiserror builds the `Display` text from them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// A raw value could not be converted to the filter's declared type
    #[error("{name} is invalid: {reason} (got {value})")]
    InvalidValue {
        name: String,
        value: Value,
        reason: String,
    },

    /// The configured default could not be converted
    ///
    /// This points at a broken declaration, not at bad user input.
    #[error("default for {name} is invalid: {reason} (got {value})")]
    InvalidDefault {
        name: String,
        value: Value,
        reason: String,
    },

    /// No value was supplied and the filter has no default
    #[error("{name} is required")]
    MissingValue { name: String },
}

impl FilterError {
    /// Name of the attribute this error belongs to
    pub fn name(&self) -> &str {
        match self {
            FilterError::InvalidValue { name, .. }
            | FilterError::InvalidDefault { name, .. }
            | FilterError::MissingValue { name } => name,
        }
    }

    /// Short machine-friendly tag for the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            FilterError::InvalidValue { .. } => "invalid_value",
            FilterError::InvalidDefault { .. } => "invalid_default",
            FilterError::MissingValue { .. } => "missing_value",
        }
    }

    /// Whether the error was caused by the supplied input rather than the
    /// declaration itself.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, FilterError::InvalidDefault { .. })
    }
}

/// Why a cast failed, before it is attributed to a named filter.
#[derive(Error, Debug)]
pub enum CastFailure {
    #[error("expected {expected}, got {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{0}")]
    Time(#[from] chrono::ParseError),

    #[error("{0}")]
    Integer(#[from] std::num::ParseIntError),

    #[error("{0}")]
    Float(#[from] std::num::ParseFloatError),

    #[error("{0}")]
    Decimal(#[from] rust_decimal::Error),

    /// Free-form parsing tried every known representation and none matched
    #[error("not a recognized {0}")]
    Unrecognized(&'static str),

    #[error("slot {slot} ({unit}) is missing")]
    MissingSlot { slot: u8, unit: &'static str },

    #[error("slot {slot} ({unit}) is not a number: {value:?}")]
    InvalidSlot {
        slot: u8,
        unit: &'static str,
        value: String,
    },

    #[error("{0} is out of range")]
    OutOfRange(String),

    /// Grouped input only comes from form submissions, never from a declaration
    #[error("grouped input cannot be used as a default")]
    GroupedDefault,

    #[error("{key} is required")]
    MissingKey { key: String },

    /// A nested element of an array or hash failed
    #[error("{key}: {source}")]
    Nested {
        key: String,
        source: Box<CastFailure>,
    },
}

impl CastFailure {
    /// Shorthand for the common "wrong shape of input" failure
    pub fn wrong_type(expected: &'static str, found: &Value) -> Self {
        CastFailure::WrongType {
            expected,
            found: found.type_name(),
        }
    }

    /// Attach a key (array index or hash key) to a nested failure
    pub fn nested(self, key: impl Into<String>) -> Self {
        CastFailure::Nested {
            key: key.into(),
            source: Box::new(self),
        }
    }

    /// Attribute this failure to a named filter as bad input
    pub fn into_invalid_value(self, name: &str, value: &Value) -> FilterError {
        FilterError::InvalidValue {
            name: name.to_string(),
            value: value.clone(),
            reason: self.to_string(),
        }
    }

    /// Attribute this failure to a named filter as a broken default
    pub fn into_invalid_default(self, name: &str, value: &Value) -> FilterError {
        FilterError::InvalidDefault {
            name: name.to_string(),
            value: value.clone(),
            reason: self.to_string(),
        }
    }
}

/// Mistakes in filter declarations, caught when filters are built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeclarationError {
    #[error("filter names must not be empty")]
    EmptyName,

    #[error("unknown filter type '{type_name}' for {name}")]
    UnknownType { name: String, type_name: String },

    #[error("{name} is declared more than once")]
    DuplicateName { name: String },

    #[error("{name}: option '{option}' {reason}")]
    InvalidOption {
        name: String,
        option: &'static str,
        reason: String,
    },

    /// Eager default validation failed
    #[error(transparent)]
    Default(FilterError),

    #[error("malformed declaration: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for DeclarationError {
    fn from(err: serde_json::Error) -> Self {
        DeclarationError::Malformed(err.to_string())
    }
}

/// Convenience type alias for Results of filter operations
pub type Result<T> = std::result::Result<T, FilterError>;
