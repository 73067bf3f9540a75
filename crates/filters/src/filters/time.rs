//! Filter for points in time.
//!
//! Accepts three shapes of raw input:
//! - a time value, returned untouched (offset and precision preserved)
//! - a string, parsed strictly against `format` if one is configured,
//!   otherwise free-form
//! - a grouped input, as sent by year/month/day/hour/minute/second selects

use crate::slots::{self, TIME_SLOTS};
use crate::traits::Cast;
use chrono::{DateTime, FixedOffset, NaiveTime};
use inputs::{parser, CastFailure, ColumnType, GroupedInput, Value};

/// Casts to `Value::Time`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeFilter {
    format: Option<String>,
}

impl TimeFilter {
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

    /// Build a UTC time from grouped input slots 1-6.
    ///
    /// Year, month and day are required; a missing time of day is midnight.
    fn from_grouped(group: &GroupedInput) -> Result<DateTime<FixedOffset>, CastFailure> {
        let parts = TIME_SLOTS.assemble(group)?;
        let date = slots::date_from_parts(parts[0], parts[1], parts[2])?;
        let time = NaiveTime::from_hms_opt(
            slots::component(parts[3], "hour")?,
            slots::component(parts[4], "minute")?,
            slots::component(parts[5], "second")?,
        )
        .ok_or_else(|| {
            CastFailure::OutOfRange(format!("time {}:{}:{}", parts[3], parts[4], parts[5]))
        })?;

        Ok(date.and_time(time).and_utc().fixed_offset())
    }
}

impl Cast for TimeFilter {
    fn type_name(&self) -> &'static str {
        "time"
    }

    fn cast(&self, value: &Value) -> Result<Value, CastFailure> {
        match value {
            Value::Time(_) => Ok(value.clone()),
            Value::Date(date) => Ok(Value::Time(parser::start_of_day(*date))),
            Value::String(s) => Ok(Value::Time(parser::parse_time(s, self.format())?)),
            Value::Grouped(group) => Ok(Value::Time(Self::from_grouped(group)?)),
            other => Err(CastFailure::wrong_type("time", other)),
        }
    }

    fn database_column_type(&self) -> ColumnType {
        ColumnType::Datetime
    }
}
