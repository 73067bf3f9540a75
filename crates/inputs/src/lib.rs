//! # Inputs Crate
//!
//! Shared building blocks for typed input filters.
//!
//! ## Main Components
//!
//! - **types**: `Value`, `GroupedInput`, `ColumnType`
//! - **parser**: turn raw strings into booleans, numbers, dates and times
//! - **error**: the error taxonomy (`FilterError`, `CastFailure`, `DeclarationError`)
//!
//! ## Example Usage
//!
//! ```ignore
//! use inputs::{parser, GroupedInput, Value};
//!
//! let time = parser::parse_time("13/12/2011 14:15:16 +1718", Some("%d/%m/%Y %H:%M:%S %z"))?;
//! let raw = Value::Grouped(GroupedInput::from([("1", "2012"), ("2", "1"), ("3", "2")]));
//! ```

// Public modules
pub mod error;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CastFailure, DeclarationError, FilterError, Result};
pub use types::{ColumnType, GroupedInput, Value};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_failure_becomes_invalid_value() {
        let raw = Value::from("invalid");
        let err = CastFailure::Unrecognized("time").into_invalid_value("start", &raw);

        assert!(matches!(err, FilterError::InvalidValue { .. }));
        assert_eq!(err.name(), "start");
        assert!(err.is_user_facing());
        assert_eq!(err.to_string(), "start is invalid: not a recognized time (got \"invalid\")");
    }

    #[test]
    fn test_cast_failure_becomes_invalid_default() {
        let raw = Value::Grouped(GroupedInput::new());
        let err = CastFailure::MissingSlot { slot: 1, unit: "year" }.into_invalid_default("start", &raw);

        assert_eq!(err.kind(), "invalid_default");
        assert!(!err.is_user_facing());
    }

    #[test]
    fn test_nested_failure_message() {
        let err = CastFailure::Unrecognized("integer").nested("2");
        assert_eq!(err.to_string(), "2: not a recognized integer");
    }
}
