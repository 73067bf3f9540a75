//! The execution wrapper around a filter set.
//!
//! An interaction declares its inputs as a `FilterSet` and implements
//! `execute` over the typed attributes. `run` handles the rest: raw params
//! are grouped and cleaned first, and `execute` only runs when every input
//! is valid.

use crate::params::group_params;
use filters::{Attributes, DeclarationError, Errors, FilterSet, Params};
use thiserror::Error;
use tracing::{debug, info, instrument};

/// A unit of business logic with declared, typed inputs.
pub trait Interaction: Send + Sync {
    type Output;

    /// Declared inputs, in declaration order
    fn filters(&self) -> &FilterSet;

    /// Business logic. Only called with valid inputs.
    ///
    /// Runtime failures are reported the same way as input failures, with
    /// `Errors::add`.
    fn execute(&self, inputs: &Attributes) -> Result<Self::Output, Errors>;

    fn desc(&self) -> Option<&str> {
        None
    }
}

/// What happened when an interaction ran.
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    inputs: Option<Attributes>,
    result: Option<T>,
    errors: Errors,
}

impl<T> Outcome<T> {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Typed inputs, if they were all valid
    pub fn inputs(&self) -> Option<&Attributes> {
        self.inputs.as_ref()
    }

    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    pub fn errors(&self) -> &Errors {
        &self.errors
    }

    pub fn into_result(self) -> Result<T, InvalidInteraction> {
        match self.result {
            Some(result) if self.errors.is_empty() => Ok(result),
            _ => Err(InvalidInteraction {
                errors: self.errors,
            }),
        }
    }
}

/// Returned by `run_bang` when inputs or execution failed.
///
/// The message is every full message joined with ", ".
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{errors}")]
pub struct InvalidInteraction {
    pub errors: Errors,
}

/// Run an interaction over raw params.
///
/// ## Algorithm
/// 1. Fold grouped keys (`start(1i)` ...) into grouped inputs
/// 2. Clean every declared input, collecting all errors
/// 3. Invalid inputs: return without executing
/// 4. Otherwise execute and keep its result or its errors
#[instrument(skip_all, fields(inputs = interaction.filters().len()))]
pub fn run<I: Interaction>(interaction: &I, params: Params) -> Outcome<I::Output> {
    let params = group_params(params);

    let inputs = match interaction.filters().process(&params) {
        Ok(inputs) => inputs,
        Err(errors) => {
            info!("Interaction rejected with {} invalid inputs", errors.len());
            return Outcome {
                inputs: None,
                result: None,
                errors,
            };
        }
    };

    debug!("Inputs valid, executing");
    match interaction.execute(&inputs) {
        Ok(result) => Outcome {
            inputs: Some(inputs),
            result: Some(result),
            errors: Errors::new(),
        },
        Err(errors) => {
            info!("Interaction failed during execution: {}", errors);
            Outcome {
                inputs: Some(inputs),
                result: None,
                errors,
            }
        }
    }
}

/// Like `run`, but returns the result directly or fails with every message.
pub fn run_bang<I: Interaction>(interaction: &I, params: Params) -> Result<I::Output, InvalidInteraction> {
    run(interaction, params).into_result()
}

/// An interaction that only casts its inputs.
///
/// Built from declarations alone; `execute` hands back the typed inputs.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    filters: FilterSet,
    desc: Option<String>,
}

impl Schema {
    pub fn new(filters: FilterSet) -> Self {
        Self {
            filters,
            desc: None,
        }
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    /// Build from a JSON array of declarations
    pub fn from_json(json: &str) -> Result<Self, DeclarationError> {
        Ok(Self::new(FilterSet::from_json(json)?))
    }
}

impl Interaction for Schema {
    type Output = Attributes;

    fn filters(&self) -> &FilterSet {
        &self.filters
    }

    fn execute(&self, inputs: &Attributes) -> Result<Attributes, Errors> {
        Ok(inputs.clone())
    }

    fn desc(&self) -> Option<&str> {
        self.desc.as_deref()
    }
}
