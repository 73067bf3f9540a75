//! String parsing primitives used by the concrete filters.
//!
//! Every function here takes the raw text of an input and returns either
//! the parsed value or a `CastFailure`. Nothing here knows the name of the
//! attribute being parsed; the filter adds that when it reports the error.
//!
//! Date and time parsing has two modes:
//! - strict: a caller-supplied strftime template that must match exactly
//! - free-form: an ordered list of known representations, first match wins

use crate::error::CastFailure;
use chrono::format::{ParseErrorKind, Parsed, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Utc};
use rust_decimal::Decimal;
use std::borrow::Cow;
use tracing::trace;

/// Representations that carry their own offset, tried after RFC 3339 and
/// RFC 2822.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%dT%H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M %z",
    "%Y/%m/%d %H:%M:%S%.f %z",
    "%d %B %Y %H:%M:%S %z",
    "%b %d %Y %H:%M:%S %z",
    "%Y%m%dT%H%M%S%z",
];

/// Representations without an offset. These are read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%b %d %Y %H:%M:%S",
    "%B %d %Y %H:%M:%S",
    "%Y%m%dT%H%M%S",
];

/// Calendar date representations
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

/// Parse "1"/"true" and "0"/"false", ignoring case and surrounding whitespace
pub fn parse_boolean(s: &str) -> Result<bool, CastFailure> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(CastFailure::Unrecognized("boolean")),
    }
}

pub fn parse_integer(s: &str) -> Result<i64, CastFailure> {
    Ok(s.trim().parse::<i64>()?)
}

/// Parse a finite float. "NaN" and "inf" are rejected.
pub fn parse_float(s: &str) -> Result<f64, CastFailure> {
    let f = s.trim().parse::<f64>()?;
    if f.is_finite() {
        Ok(f)
    } else {
        Err(CastFailure::Unrecognized("float"))
    }
}

/// Parse a decimal, accepting scientific notation ("1.5e3")
pub fn parse_decimal(s: &str) -> Result<Decimal, CastFailure> {
    let s = s.trim();
    if s.contains(['e', 'E']) {
        Ok(Decimal::from_scientific(s)?)
    } else {
        Ok(s.parse::<Decimal>()?)
    }
}

/// Parse a point in time.
///
/// With a `format`, the whole string must match that template. A template
/// without an offset (`%z`) is read as UTC, and one without a time of day is
/// read as midnight.
///
/// Without a `format`, the free-form representations are tried in order:
/// RFC 3339, RFC 2822, offset formats, naive formats (UTC), and finally
/// plain dates (midnight UTC).
pub fn parse_time(s: &str, format: Option<&str>) -> Result<DateTime<FixedOffset>, CastFailure> {
    match format {
        Some(format) => parse_time_with_format(s, format),
        None => parse_time_free_form(s.trim()),
    }
}

/// Parse a calendar date.
///
/// With a `format`, strict template matching. Without one, the known date
/// representations are tried first, then anything `parse_time` accepts
/// (keeping only its date part).
pub fn parse_date(s: &str, format: Option<&str>) -> Result<NaiveDate, CastFailure> {
    match format {
        Some(format) => Ok(NaiveDate::parse_from_str(s, format)?),
        None => {
            let s = s.trim();
            match match_date_formats(s) {
                Some(date) => Ok(date),
                None => parse_time_free_form(s)
                    .map(|time| time.date_naive())
                    .map_err(|_| CastFailure::Unrecognized("date")),
            }
        }
    }
}

/// Midnight UTC on the given date
pub fn start_of_day(date: NaiveDate) -> DateTime<FixedOffset> {
    date.and_time(NaiveTime::MIN).and_utc().fixed_offset()
}

fn parse_time_with_format(s: &str, format: &str) -> Result<DateTime<FixedOffset>, CastFailure> {
    let mut parsed = Parsed::new();
    chrono::format::parse(&mut parsed, s, StrftimeItems::new(format))?;

    match parsed.to_datetime() {
        Ok(time) => return Ok(time),
        Err(err) if err.kind() != ParseErrorKind::NotEnough => return Err(err.into()),
        Err(_) => {}
    }

    // The template matched but does not pin down an instant on its own.
    // A missing offset is UTC and a missing time of day is midnight.
    let offset = match parsed.offset() {
        Some(_) => parsed.to_fixed_offset()?,
        None => Utc.fix(),
    };
    let local = match parsed.to_naive_time() {
        Ok(time) => parsed.to_naive_date()?.and_time(time),
        Err(err) if err.kind() == ParseErrorKind::NotEnough => {
            parsed.to_naive_date()?.and_time(NaiveTime::MIN)
        }
        Err(err) => return Err(err.into()),
    };

    local
        .and_local_timezone(offset)
        .single()
        .ok_or_else(|| CastFailure::OutOfRange(format!("time {}", local)))
}

fn parse_time_free_form(s: &str) -> Result<DateTime<FixedOffset>, CastFailure> {
    if let Ok(time) = DateTime::parse_from_rfc3339(s) {
        return Ok(time);
    }
    if let Ok(time) = DateTime::parse_from_rfc2822(s) {
        return Ok(time);
    }

    let zoned = normalize_zone(s);
    for format in OFFSET_FORMATS {
        if let Ok(time) = DateTime::parse_from_str(&zoned, format) {
            trace!("Parsed {:?} with offset format {}", s, format);
            return Ok(time);
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            trace!("Parsed {:?} with naive format {}, assuming UTC", s, format);
            return Ok(naive.and_utc().fixed_offset());
        }
    }

    match_date_formats(s)
        .map(start_of_day)
        .ok_or(CastFailure::Unrecognized("time"))
}

/// Rewrite a trailing `UTC`, `GMT` or `Z` zone name as `+0000`
fn normalize_zone(s: &str) -> Cow<'_, str> {
    for zone in [" UTC", " GMT"] {
        if let Some(rest) = s.strip_suffix(zone) {
            return Cow::Owned(format!("{} +0000", rest));
        }
    }
    match s.strip_suffix('Z') {
        Some(rest) if rest.ends_with(|c: char| c.is_ascii_digit()) => {
            Cow::Owned(format!("{}+0000", rest))
        }
        _ => Cow::Borrowed(s),
    }
}

fn match_date_formats(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_boolean() {
        assert!(parse_boolean("1").unwrap());
        assert!(parse_boolean(" TRUE ").unwrap());
        assert!(!parse_boolean("0").unwrap());
        assert!(!parse_boolean("false").unwrap());
        assert!(parse_boolean("yes").is_err());
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_integer(" 42 ").unwrap(), 42);
        assert!(parse_integer("4.2").is_err());
        assert_eq!(parse_float("4.25").unwrap(), 4.25);
        assert!(parse_float("NaN").is_err());
        assert_eq!(parse_decimal("1.10").unwrap().to_string(), "1.10");
        assert_eq!(parse_decimal("1.5e3").unwrap(), Decimal::from(1500));
    }

    #[test]
    fn test_parse_time_free_form_with_offset() {
        let time = parse_time("2011-12-13 14:15:16 +1718", None).unwrap();

        assert_eq!(time.year(), 2011);
        assert_eq!(time.hour(), 14);
        assert_eq!(time.offset().local_minus_utc(), 17 * 3600 + 18 * 60);
    }

    #[test]
    fn test_parse_time_free_form_naive_is_utc() {
        let time = parse_time("2011-12-13 14:15", None).unwrap();

        assert_eq!(time.offset().local_minus_utc(), 0);
        assert_eq!(time.minute(), 15);
    }

    #[test]
    fn test_parse_time_strict_format() {
        let format = "%d/%m/%Y %H:%M:%S %z";
        let time = parse_time("13/12/2011 14:15:16 +1718", Some(format)).unwrap();
        assert_eq!(time.day(), 13);

        // Valid in another representation, but not this template
        assert!(parse_time("2011-12-13 14:15:16 +1718", Some(format)).is_err());
    }

    #[test]
    fn test_parse_time_free_form_zone_names() {
        let expected = DateTime::parse_from_rfc3339("2011-12-13T14:15:16+00:00").unwrap();

        assert_eq!(parse_time("2011-12-13 14:15:16 UTC", None).unwrap(), expected);
        assert_eq!(parse_time("2011-12-13 14:15:16 GMT", None).unwrap(), expected);
        assert_eq!(parse_time("20111213T141516Z", None).unwrap(), expected);
        assert_eq!(parse_time("Dec 13 2011 14:15:16", None).unwrap(), expected);
        assert_eq!(parse_time("Dec 13 2011 14:15:16 UTC", None).unwrap(), expected);
    }

    #[test]
    fn test_normalize_zone() {
        assert_eq!(normalize_zone("14:15:16 UTC"), "14:15:16 +0000");
        assert_eq!(normalize_zone("141516Z"), "141516+0000");
        assert_eq!(normalize_zone("14:15:16 +0100"), "14:15:16 +0100");
        assert_eq!(normalize_zone("QZ"), "QZ");
    }

    #[test]
    fn test_parse_time_strict_format_keeps_offset_without_time() {
        let time = parse_time("13/12/2011 +0500", Some("%d/%m/%Y %z")).unwrap();

        assert_eq!(time.offset().local_minus_utc(), 5 * 3600);
        assert_eq!(time, DateTime::parse_from_rfc3339("2011-12-13T00:00:00+05:00").unwrap());
    }

    #[test]
    fn test_parse_time_strict_format_without_offset() {
        let time = parse_time("13/12/2011", Some("%d/%m/%Y")).unwrap();

        assert_eq!(time, start_of_day(NaiveDate::from_ymd_opt(2011, 12, 13).unwrap()));
    }

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2011, 12, 13).unwrap();

        assert_eq!(parse_date("2011-12-13", None).unwrap(), expected);
        assert_eq!(parse_date("13 December 2011", None).unwrap(), expected);
        assert_eq!(parse_date("2011-12-13 14:15:16 +0000", None).unwrap(), expected);
        assert_eq!(parse_date("13/12/2011", Some("%d/%m/%Y")).unwrap(), expected);
        assert!(parse_date("invalid", None).is_err());
    }
}
