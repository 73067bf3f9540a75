//! Filter for calendar dates.

use crate::slots::{self, DATE_SLOTS};
use crate::traits::Cast;
use inputs::{parser, CastFailure, ColumnType, Value};

/// Casts to `Value::Date`.
///
/// Times keep the calendar date in their own offset. Grouped input needs all
/// of year, month and day (slots 1-3).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateFilter {
    format: Option<String>,
}

impl DateFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse strings strictly against a strftime-style template
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }
}

impl Cast for DateFilter {
    fn type_name(&self) -> &'static str {
        "date"
    }

    fn cast(&self, value: &Value) -> Result<Value, CastFailure> {
        match value {
            Value::Date(_) => Ok(value.clone()),
            Value::Time(time) => Ok(Value::Date(time.date_naive())),
            Value::String(s) => Ok(Value::Date(parser::parse_date(s, self.format())?)),
            Value::Grouped(group) => {
                let parts = DATE_SLOTS.assemble(group)?;
                Ok(Value::Date(slots::date_from_parts(parts[0], parts[1], parts[2])?))
            }
            other => Err(CastFailure::wrong_type("date", other)),
        }
    }

    fn database_column_type(&self) -> ColumnType {
        ColumnType::Date
    }
}
