//! # Interaction Crate
//!
//! Runs business logic behind a declared set of typed inputs.
//!
//! ## Components
//!
//! - `params`: folds multi-part form keys (`start(1i)`, `start(2i)` ...)
//!   into grouped inputs
//! - `execution`: the `Interaction` trait, `run` / `run_bang`, and
//!   `Schema`, an interaction that only casts
//!
//! ## Example Usage
//!
//! ```ignore
//! use interaction::{run, Schema};
//!
//! let schema = Schema::from_json(&std::fs::read_to_string("decl.json")?)?;
//! let params = interaction::params::parse_params(r#"{"start(1i)": "2012", ...}"#)?;
//!
//! let outcome = run(&schema, params);
//! if !outcome.is_valid() {
//!     eprintln!("{}", outcome.errors());
//! }
//! ```

pub mod execution;
pub mod params;

pub use execution::{run, run_bang, Interaction, InvalidInteraction, Outcome, Schema};
pub use params::{group_params, params_from_json, parse_params, ParamsError};
