//! Concrete filter types.
//!
//! One module per declared type. Each implements `Cast` and is wrapped by
//! `FilterKind` so a `Filter` can hold any of them.

pub mod array;
pub mod boolean;
pub mod date;
pub mod decimal;
pub mod float;
pub mod hash;
pub mod integer;
pub mod string;
pub mod symbol;
pub mod time;

// Re-export for convenience
pub use array::ArrayFilter;
pub use boolean::BooleanFilter;
pub use date::DateFilter;
pub use decimal::DecimalFilter;
pub use float::FloatFilter;
pub use hash::HashFilter;
pub use integer::IntegerFilter;
pub use string::StringFilter;
pub use symbol::SymbolFilter;
pub use time::TimeFilter;
