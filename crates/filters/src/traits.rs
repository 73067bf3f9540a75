//! Core trait for the concrete filter types.
//!
//! This module defines the `Cast` capability every filter type implements.
//! A `Filter` (see `filter.rs`) pairs one of these with a name and options.

use inputs::{CastFailure, ColumnType, Value};

/// Per-type casting rules.
///
/// ## Design Note
/// - `Send + Sync` lets one declared filter set be shared across threads
/// - `cast` returns a `CastFailure`, not a `FilterError`: the type does not
///   know which attribute it is casting, so `Filter` attaches the name
/// - Implementations must be pure functions of `(self, value)`
pub trait Cast: Send + Sync {
    /// Type name as written in declarations ("time", "integer", ...)
    fn type_name(&self) -> &'static str;

    /// Convert a raw value to this type.
    ///
    /// # Returns
    /// * `Ok(Value)` - A value of this filter's type. Values already of the
    ///   type come back unchanged.
    /// * `Err(CastFailure)` - The value cannot be converted
    fn cast(&self, value: &Value) -> Result<Value, CastFailure>;

    /// Storage-type hint for schema consumers. Fixed per type.
    fn database_column_type(&self) -> ColumnType;
}
