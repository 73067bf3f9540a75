//! Slot tables for assembling values out of grouped input.
//!
//! A grouped input arrives as `{"1" => "2012", "2" => "1", "3" => "2", ...}`.
//! Each filter that accepts one owns a `SlotTable` listing which position
//! maps to which unit, and whether the slot may be left out.

use chrono::NaiveDate;
use inputs::{CastFailure, GroupedInput};

/// One positional slot of a grouped input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub position: u8,
    pub unit: &'static str,
    /// Value used when the slot is absent or blank. `None` means required.
    pub fallback: Option<i64>,
}

impl Slot {
    pub const fn required(position: u8, unit: &'static str) -> Self {
        Self {
            position,
            unit,
            fallback: None,
        }
    }

    pub const fn optional(position: u8, unit: &'static str, fallback: i64) -> Self {
        Self {
            position,
            unit,
            fallback: Some(fallback),
        }
    }

    pub fn is_required(&self) -> bool {
        self.fallback.is_none()
    }
}

/// Ordered slots, most significant unit first
#[derive(Debug, Clone, Copy)]
pub struct SlotTable {
    slots: &'static [Slot],
}

/// year, month, day
pub const DATE_SLOTS: SlotTable = SlotTable::new(&[
    Slot::required(1, "year"),
    Slot::required(2, "month"),
    Slot::required(3, "day"),
]);

/// year, month, day, then an optional time of day
pub const TIME_SLOTS: SlotTable = SlotTable::new(&[
    Slot::required(1, "year"),
    Slot::required(2, "month"),
    Slot::required(3, "day"),
    Slot::optional(4, "hour", 0),
    Slot::optional(5, "minute", 0),
    Slot::optional(6, "second", 0),
]);

impl SlotTable {
    pub const fn new(slots: &'static [Slot]) -> Self {
        Self { slots }
    }

    pub fn required(&self) -> impl Iterator<Item = &'static Slot> {
        self.slots.iter().filter(|slot| slot.is_required())
    }

    /// Read every slot of the table out of a grouped input.
    ///
    /// ## Algorithm
    /// For each slot in table order:
    /// 1. Look up its position; blank strings count as absent
    /// 2. Present: must parse as an integer
    /// 3. Absent: use the fallback, or fail if the slot is required
    ///
    /// Either every component is returned or none is. Keys outside the table
    /// are ignored.
    pub fn assemble(&self, group: &GroupedInput) -> Result<Vec<i64>, CastFailure> {
        self.slots
            .iter()
            .map(|slot| {
                let raw = group
                    .slot(slot.position)
                    .map(str::trim)
                    .filter(|raw| !raw.is_empty());

                match raw {
                    Some(raw) => raw.parse::<i64>().map_err(|_| CastFailure::InvalidSlot {
                        slot: slot.position,
                        unit: slot.unit,
                        value: raw.to_string(),
                    }),
                    None => slot.fallback.ok_or(CastFailure::MissingSlot {
                        slot: slot.position,
                        unit: slot.unit,
                    }),
                }
            })
            .collect()
    }
}

/// Narrow an assembled component, failing if it does not fit
pub(crate) fn component<T: TryFrom<i64>>(value: i64, unit: &str) -> Result<T, CastFailure> {
    T::try_from(value).map_err(|_| CastFailure::OutOfRange(format!("{} {}", unit, value)))
}

/// Build a calendar date, rejecting impossible ones like month 13
pub(crate) fn date_from_parts(year: i64, month: i64, day: i64) -> Result<NaiveDate, CastFailure> {
    NaiveDate::from_ymd_opt(
        component(year, "year")?,
        component(month, "month")?,
        component(day, "day")?,
    )
    .ok_or_else(|| CastFailure::OutOfRange(format!("date {}-{}-{}", year, month, day)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_slots() {
        let required: Vec<&str> = TIME_SLOTS.required().map(|slot| slot.unit).collect();
        assert_eq!(required, vec!["year", "month", "day"]);

        assert_eq!(DATE_SLOTS.required().count(), 3);
    }

    #[test]
    fn test_assemble_with_fallbacks() {
        let group = GroupedInput::from([("1", "2012"), ("2", "1"), ("3", "2"), ("4", " ")]);
        let parts = TIME_SLOTS.assemble(&group).unwrap();

        assert_eq!(parts, vec![2012, 1, 2, 0, 0, 0]);
    }

    #[test]
    fn test_assemble_missing_required() {
        let group = GroupedInput::from([("2", "1")]);
        let err = TIME_SLOTS.assemble(&group).unwrap_err();

        assert!(matches!(err, CastFailure::MissingSlot { slot: 1, unit: "year" }));
    }

    #[test]
    fn test_assemble_non_numeric() {
        let group = GroupedInput::from([("1", "2012"), ("2", "jan"), ("3", "2")]);
        let err = DATE_SLOTS.assemble(&group).unwrap_err();

        assert!(matches!(err, CastFailure::InvalidSlot { slot: 2, .. }));
    }

    #[test]
    fn test_date_from_parts_rejects_impossible_dates() {
        assert!(date_from_parts(2012, 1, 2).is_ok());
        assert!(date_from_parts(2012, 13, 2).is_err());
        assert!(date_from_parts(2011, 2, 29).is_err());
        assert!(date_from_parts(2012, -1, 2).is_err());
    }
}
