//! A declared filter: name, type and options for one attribute.
//!
//! `Filter` is where a `CastFailure` becomes a `FilterError`. Everything
//! public here reports errors with the attribute's name attached; library
//! parse errors never leave this module.

use crate::filters::{
    ArrayFilter, BooleanFilter, DateFilter, DecimalFilter, FloatFilter, HashFilter, IntegerFilter,
    StringFilter, SymbolFilter, TimeFilter,
};
use crate::traits::Cast;
use inputs::{CastFailure, ColumnType, DeclarationError, FilterError, Result, Value};
use std::collections::HashSet;

/// The closed set of filter types.
///
/// Dispatch is by tag: the registry maps a declared type name to one of
/// these variants.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterKind {
    Array(ArrayFilter),
    Boolean(BooleanFilter),
    Date(DateFilter),
    Decimal(DecimalFilter),
    Float(FloatFilter),
    Hash(HashFilter),
    Integer(IntegerFilter),
    String(StringFilter),
    Symbol(SymbolFilter),
    Time(TimeFilter),
}

impl FilterKind {
    fn as_cast(&self) -> &dyn Cast {
        match self {
            FilterKind::Array(f) => f,
            FilterKind::Boolean(f) => f,
            FilterKind::Date(f) => f,
            FilterKind::Decimal(f) => f,
            FilterKind::Float(f) => f,
            FilterKind::Hash(f) => f,
            FilterKind::Integer(f) => f,
            FilterKind::String(f) => f,
            FilterKind::Symbol(f) => f,
            FilterKind::Time(f) => f,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.as_cast().type_name()
    }

    pub fn database_column_type(&self) -> ColumnType {
        self.as_cast().database_column_type()
    }

    fn cast(&self, value: &Value) -> std::result::Result<Value, CastFailure> {
        self.as_cast().cast(value)
    }
}

macro_rules! impl_from_filter {
    ($($variant:ident => $filter:ty),* $(,)?) => {
        $(
            impl From<$filter> for FilterKind {
                fn from(filter: $filter) -> Self {
                    FilterKind::$variant(filter)
                }
            }
        )*
    };
}

impl_from_filter! {
    Array => ArrayFilter,
    Boolean => BooleanFilter,
    Date => DateFilter,
    Decimal => DecimalFilter,
    Float => FloatFilter,
    Hash => HashFilter,
    Integer => IntegerFilter,
    String => StringFilter,
    Symbol => SymbolFilter,
    Time => TimeFilter,
}

/// A typed input rule for one named attribute.
///
/// Filters are built once and never change. Building one is infallible;
/// `validate` is the explicit pass that checks the declaration, and
/// `FilterSet::add` runs it when the filter is registered.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    name: String,
    kind: FilterKind,
    default: Option<Value>,
    desc: Option<String>,
}

impl Filter {
    pub fn new(name: impl Into<String>, kind: impl Into<FilterKind>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            default: None,
            desc: None,
        }
    }

    /// Raw value used when the attribute is not supplied.
    ///
    /// `Value::Nil` makes the attribute optional with no value.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FilterKind {
        &self.kind
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn desc(&self) -> Option<&str> {
        self.desc.as_deref()
    }

    /// Whether the attribute may be left out
    pub fn is_optional(&self) -> bool {
        self.default.is_some()
    }

    /// Storage-type hint. Depends only on the filter type.
    pub fn database_column_type(&self) -> ColumnType {
        self.kind.database_column_type()
    }

    /// Convert a raw value to this filter's type.
    ///
    /// # Returns
    /// * `Ok(Value)` - The typed value (unchanged if it already had the type)
    /// * `Err(FilterError::InvalidValue)` - For any value that cannot be converted
    pub fn cast(&self, value: &Value) -> Result<Value> {
        self.kind
            .cast(value)
            .map_err(|failure| failure.into_invalid_value(&self.name, value))
    }

    /// Resolve the configured default through the same cast as real input.
    ///
    /// A grouped input is never a valid default, even a complete one.
    ///
    /// # Returns
    /// * `Ok(None)` - No default configured
    /// * `Ok(Some(Value::Nil))` - Optional attribute without a value
    /// * `Ok(Some(value))` - The cast default
    /// * `Err(FilterError::InvalidDefault)` - The default does not cast
    pub fn default(&self) -> Result<Option<Value>> {
        match &self.default {
            None => Ok(None),
            Some(Value::Nil) => Ok(Some(Value::Nil)),
            Some(raw @ Value::Grouped(_)) => {
                Err(CastFailure::GroupedDefault.into_invalid_default(&self.name, raw))
            }
            Some(raw) => self
                .kind
                .cast(raw)
                .map(Some)
                .map_err(|failure| failure.into_invalid_default(&self.name, raw)),
        }
    }

    /// Clean the supplied value for this attribute.
    ///
    /// Absent and nil input fall back to the default; without a default the
    /// attribute is missing. Anything else is cast.
    pub fn clean(&self, value: Option<&Value>) -> Result<Value> {
        match value {
            Some(raw) if !raw.is_nil() => self.cast(raw),
            _ => self.default()?.ok_or_else(|| FilterError::MissingValue {
                name: self.name.clone(),
            }),
        }
    }

    /// Check the declaration once, at registration time.
    ///
    /// ## Algorithm
    /// 1. The name must not be blank
    /// 2. Nested filters (array element, hash fields) are validated first,
    ///    and hash field names must be unique
    /// 3. The default, if any, must cast
    pub fn validate(&self) -> std::result::Result<(), DeclarationError> {
        if self.name.trim().is_empty() {
            return Err(DeclarationError::EmptyName);
        }

        match &self.kind {
            FilterKind::Array(array) => {
                if let Some(element) = array.element() {
                    element.validate()?;
                }
            }
            FilterKind::Hash(hash) => {
                let mut seen = HashSet::new();
                for field in hash.fields() {
                    field.validate()?;
                    if !seen.insert(field.name()) {
                        return Err(DeclarationError::DuplicateName {
                            name: format!("{}.{}", self.name, field.name()),
                        });
                    }
                }
            }
            _ => {}
        }

        self.default().map_err(DeclarationError::Default)?;
        Ok(())
    }

    /// `clean` for nested values, reporting under `key` without the
    /// attribute name. Used by array and hash filters.
    pub(crate) fn resolve_at(
        &self,
        value: Option<&Value>,
        key: impl Into<String>,
    ) -> std::result::Result<Value, CastFailure> {
        match value {
            Some(raw) if !raw.is_nil() => self.kind.cast(raw).map_err(|failure| failure.nested(key)),
            _ => match &self.default {
                None => Err(CastFailure::MissingKey { key: key.into() }),
                Some(Value::Nil) => Ok(Value::Nil),
                Some(Value::Grouped(_)) => Err(CastFailure::GroupedDefault.nested(key)),
                Some(raw) => self.kind.cast(raw).map_err(|failure| failure.nested(key)),
            },
        }
    }
}
