//! Typed input filters: declaration, coercion and validation.
//!
//! This crate provides:
//! - The `Cast` trait and one concrete filter per supported type
//! - `Filter`, a named and configured filter for one attribute
//! - A registry that builds filters from declarations (JSON or code)
//! - `FilterSet` for running every declared filter over raw parameters
//!
//! ## Architecture
//! Raw parameters are processed in stages:
//! 1. Each declared attribute is looked up by name
//! 2. Its filter cleans the raw value (cast, or default when absent)
//! 3. Typed values are collected into `Attributes`, failures into `Errors`
//!
//! ## Example Usage
//! ```ignore
//! use filters::{Filter, FilterSet};
//! use filters::filters::*;
//!
//! let filters = FilterSet::new()
//!     .add(Filter::new("starts_at", TimeFilter::new().with_format("%d/%m/%Y %H:%M")))?
//!     .add(Filter::new("seats", IntegerFilter).with_default(1i64))?;
//!
//! match filters.process(&params) {
//!     Ok(attributes) => println!("{:?}", attributes.get("starts_at")),
//!     Err(errors) => println!("{}", errors),
//! }
//! ```

pub mod filter;
pub mod filter_set;
pub mod filters;
pub mod registry;
pub mod report;
pub mod slots;
pub mod traits;

// Re-export main types
pub use filter::{Filter, FilterKind};
pub use filter_set::{FilterSet, Params};
pub use registry::{FilterDecl, TYPE_NAMES};
pub use report::{Attributes, Errors, Failure};
pub use traits::Cast;

pub use inputs::{ColumnType, DeclarationError, FilterError, GroupedInput, Value};
