//! The FilterSet holds the declared attributes of one interaction.
//!
//! This module provides the FilterSet struct that registers filters using
//! the builder pattern and runs them over a set of raw parameters.

use crate::filter::Filter;
use crate::registry::{self, FilterDecl};
use crate::report::{Attributes, Errors};
use inputs::{DeclarationError, Value};
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

/// Raw parameters keyed by attribute name
pub type Params = BTreeMap<String, Value>;

/// Declared filters, in declaration order.
///
/// ## Usage
/// ```ignore
/// let filters = FilterSet::new()
///     .add(Filter::new("email", StringFilter::new()))?
///     .add(Filter::new("starts_at", TimeFilter::new()))?
///     .add(Filter::new("seats", IntegerFilter).with_default(1i64))?;
///
/// let attributes = filters.process(&params)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    /// Create a new empty FilterSet.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Register a filter (builder pattern).
    ///
    /// The filter's declaration is validated here, once: a blank name,
    /// a duplicate name or a default that does not cast is rejected.
    pub fn add(mut self, filter: Filter) -> Result<Self, DeclarationError> {
        if let Err(err) = filter.validate() {
            warn!("Rejected filter {}: {}", filter.name(), err);
            return Err(err);
        }
        if self.get(filter.name()).is_some() {
            return Err(DeclarationError::DuplicateName {
                name: filter.name().to_string(),
            });
        }

        self.filters.push(filter);
        Ok(self)
    }

    /// Build a set from declarations, keeping their order
    pub fn from_declarations(declarations: &[FilterDecl]) -> Result<Self, DeclarationError> {
        declarations
            .iter()
            .try_fold(FilterSet::new(), |set, declaration| {
                set.add(declaration.build()?)
            })
    }

    /// Build a set from a JSON array of declarations
    pub fn from_json(json: &str) -> Result<Self, DeclarationError> {
        Self::from_declarations(&registry::parse_declarations(json)?)
    }

    pub fn get(&self, name: &str) -> Option<&Filter> {
        self.filters.iter().find(|filter| filter.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Clean every declared attribute from the raw parameters.
    ///
    /// ## Algorithm
    /// 1. For each filter in declaration order:
    ///    a. Look up the raw value by name
    ///    b. Clean it (cast, or fall back to the default)
    ///    c. Keep the typed value, or record the error and move on
    /// 2. Return the typed attributes, or every error found
    ///
    /// Parameters nobody declared are ignored.
    pub fn process(&self, params: &Params) -> Result<Attributes, Errors> {
        let mut attributes = Attributes::new();
        let mut errors = Errors::new();

        for filter in &self.filters {
            debug!("Applying filter: {} ({})", filter.name(), filter.type_name());
            match filter.clean(params.get(filter.name())) {
                Ok(value) => {
                    debug!("Filter applied: {} = {}", filter.name(), value);
                    attributes.insert(filter.name(), value);
                }
                Err(err) => {
                    debug!("Filter rejected: {}", err);
                    errors.push(err);
                }
            }
        }

        if errors.is_empty() {
            Ok(attributes)
        } else {
            Err(errors)
        }
    }

    /// Process many independent parameter sets in parallel.
    ///
    /// Results come back in the same order as `batch`.
    #[instrument(skip_all, fields(records = batch.len()))]
    pub fn process_batch(&self, batch: &[Params]) -> Vec<Result<Attributes, Errors>> {
        let results: Vec<_> = batch.par_iter().map(|params| self.process(params)).collect();

        let failed = results.iter().filter(|result| result.is_err()).count();
        debug!("Processed batch: {} ok, {} failed", results.len() - failed, failed);
        results
    }
}
