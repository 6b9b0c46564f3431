// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar units accepted by [`Moment::add`](crate::Moment::add).

use std::fmt;
use std::str::FromStr;

use qtty::{Day, Days, Hours, Millisecond, Milliseconds, Minutes, Seconds, Weeks};

use crate::error::Error;

/// Unit of a calendar addition.
///
/// Units up to [`Week`](CalendarUnit::Week) have a fixed length; months and
/// years are applied to the calendar fields instead.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CalendarUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl CalendarUnit {
    pub const ALL: [CalendarUnit; 8] = [
        CalendarUnit::Millisecond,
        CalendarUnit::Second,
        CalendarUnit::Minute,
        CalendarUnit::Hour,
        CalendarUnit::Day,
        CalendarUnit::Week,
        CalendarUnit::Month,
        CalendarUnit::Year,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            CalendarUnit::Millisecond => "millisecond",
            CalendarUnit::Second => "second",
            CalendarUnit::Minute => "minute",
            CalendarUnit::Hour => "hour",
            CalendarUnit::Day => "day",
            CalendarUnit::Week => "week",
            CalendarUnit::Month => "month",
            CalendarUnit::Year => "year",
        }
    }

    /// Short alias; `m` is minute and `M` is month.
    pub const fn short_name(&self) -> &'static str {
        match self {
            CalendarUnit::Millisecond => "ms",
            CalendarUnit::Second => "s",
            CalendarUnit::Minute => "m",
            CalendarUnit::Hour => "h",
            CalendarUnit::Day => "d",
            CalendarUnit::Week => "w",
            CalendarUnit::Month => "M",
            CalendarUnit::Year => "y",
        }
    }

    /// What adding `value` of this unit does to a moment.
    pub fn shift(&self, value: i64) -> Shift {
        let v = value as f64;
        let exact_ms = |ms: Milliseconds| Shift::Millis(ms.value().round() as i64);
        match self {
            CalendarUnit::Millisecond => Shift::Millis(value),
            CalendarUnit::Second => exact_ms(Seconds::new(v).to::<Millisecond>()),
            CalendarUnit::Minute => exact_ms(Minutes::new(v).to::<Millisecond>()),
            CalendarUnit::Hour => exact_ms(Hours::new(v).to::<Millisecond>()),
            CalendarUnit::Day => Shift::Days(Days::new(v)),
            CalendarUnit::Week => Shift::Days(Weeks::new(v).to::<Day>()),
            CalendarUnit::Month => Shift::Months(value),
            CalendarUnit::Year => Shift::Years(value),
        }
    }
}

/// A calendar addition resolved to the quantity it moves.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shift {
    /// Fixed sub-day length, carried through the millisecond accumulator.
    Millis(i64),
    /// Whole days added to the Julian Day.
    Days(Days),
    /// Added to the month field, then reconverted.
    Months(i64),
    /// Added to the year field, then reconverted.
    Years(i64),
}

impl fmt::Display for CalendarUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CalendarUnit {
    type Err = Error;

    /// Short aliases match exactly; long names ignore case and a plural `s`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(unit) = Self::ALL.iter().find(|u| u.short_name() == trimmed) {
            return Ok(*unit);
        }
        let lower = trimmed.to_lowercase();
        let singular = lower.strip_suffix('s').unwrap_or(&lower);
        Self::ALL
            .iter()
            .find(|u| u.name() == singular)
            .copied()
            .ok_or_else(|| Error::UnknownUnit(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_aliases_are_case_sensitive() {
        assert_eq!("m".parse::<CalendarUnit>(), Ok(CalendarUnit::Minute));
        assert_eq!("M".parse::<CalendarUnit>(), Ok(CalendarUnit::Month));
        assert_eq!("ms".parse::<CalendarUnit>(), Ok(CalendarUnit::Millisecond));
    }

    #[test]
    fn long_names_and_plurals() {
        assert_eq!("month".parse::<CalendarUnit>(), Ok(CalendarUnit::Month));
        assert_eq!(" Days ".parse::<CalendarUnit>(), Ok(CalendarUnit::Day));
        assert_eq!("HOURS".parse::<CalendarUnit>(), Ok(CalendarUnit::Hour));
    }

    #[test]
    fn unknown_unit() {
        assert_eq!(
            "fortnight".parse::<CalendarUnit>(),
            Err(Error::UnknownUnit("fortnight".into()))
        );
    }

    #[test]
    fn fixed_lengths() {
        assert_eq!(CalendarUnit::Hour.shift(2), Shift::Millis(7_200_000));
        assert_eq!(CalendarUnit::Minute.shift(-3), Shift::Millis(-180_000));
        assert_eq!(CalendarUnit::Second.shift(1), Shift::Millis(1_000));
        assert_eq!(CalendarUnit::Day.shift(1), Shift::Days(Days::new(1.0)));
        assert_eq!(CalendarUnit::Week.shift(2), Shift::Days(Days::new(14.0)));
    }

    #[test]
    fn calendar_units_are_not_fixed_lengths() {
        assert_eq!(CalendarUnit::Month.shift(3), Shift::Months(3));
        assert_eq!(CalendarUnit::Year.shift(-1), Shift::Years(-1));
    }

    #[test]
    fn display_uses_long_name() {
        assert_eq!(CalendarUnit::Week.to_string(), "week");
    }
}
