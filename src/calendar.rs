// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Gregorian calendar ↔ Julian Day conversion.
//!
//! The transform is the classic astronomical one (Meeus, *Astronomical
//! Algorithms*, ch. 7): January and February are counted as months 13 and 14
//! of the previous year, and the centurial leap correction is applied only
//! from the Gregorian cutover (1582-10-15, JD 2 299 160.5) onwards.  Earlier
//! dates follow the Julian leap-year rule.
//!
//! Years are astronomical: year `0` exists and equals 1 BC.
//!
//! Neither direction validates its input.  Out-of-range fields are absorbed
//! by the arithmetic, so `day = 32` lands in the next month and `hour = -1`
//! in the previous day.

use crate::constants::{GREGORIAN_CUTOVER_JDN, GREGORIAN_CUTOVER_KEY, HOUR_MS, MINUTE_MS, SECOND_MS};
use crate::jdms::{reconcile, split_day};
use crate::offset::{minutes_to_day_fraction, minutes_to_ms, AmbientOffset};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Calendar fields of a proleptic Gregorian date-time.
///
/// No range invariant is enforced; see the module docs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GregorianFields {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
    pub millisecond: i32,
}

impl GregorianFields {
    /// A date at midnight.
    pub const fn new(year: i32, month: i32, day: i32) -> Self {
        Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
            millisecond: 0,
        }
    }

    pub const fn and_hms(self, hour: i32, minute: i32, second: i32) -> Self {
        Self {
            hour,
            minute,
            second,
            ..self
        }
    }

    pub const fn and_millisecond(self, millisecond: i32) -> Self {
        Self {
            millisecond,
            ..self
        }
    }

    /// Milliseconds since midnight described by the time-of-day fields.
    /// Not wrapped: `hour = 25` yields more than a day.
    pub fn time_of_day_ms(&self) -> i64 {
        self.hour as i64 * HOUR_MS
            + self.minute as i64 * MINUTE_MS
            + self.second as i64 * SECOND_MS
            + self.millisecond as i64
    }

    /// Day fraction of the time-of-day fields, summed the same way the
    /// fields are weighted in the JD formula.
    fn day_fraction(&self) -> f64 {
        self.hour as f64 / 24.0
            + self.minute as f64 / (24.0 * 60.0)
            + self.second as f64 / (24.0 * 60.0 * 60.0)
            + self.millisecond as f64 / (24.0 * 60.0 * 60.0 * 1000.0)
    }
}

/// Gregorian calendar fields → Julian Day.
///
/// With `is_utc == false` the fields are local wall-clock time at `ambient`,
/// and the ambient offset is removed so the result is the absolute instant.
///
/// ```
/// use jdcal::{gregorian_to_jdn, AmbientOffset, GregorianFields};
///
/// let noon = GregorianFields::new(2000, 1, 1).and_hms(12, 0, 0);
/// assert_eq!(gregorian_to_jdn(&noon, true, AmbientOffset::UTC), 2_451_545.0);
/// ```
pub fn gregorian_to_jdn(fields: &GregorianFields, is_utc: bool, ambient: AmbientOffset) -> f64 {
    // Carry whole years out of the month so that the Jan/Feb shift below
    // always sees a month in 1..=12.
    let month0 = fields.month as i64 - 1;
    let mut year = fields.year as i64 + month0.div_euclid(12);
    let mut month = month0.rem_euclid(12) + 1;
    let day = fields.day as i64;

    let mut fraction = fields.day_fraction();
    if !is_utc {
        fraction -= minutes_to_day_fraction(ambient.minutes());
    }

    let gregorian = year * 372 + month * 31 + day >= GREGORIAN_CUTOVER_KEY;
    if month <= 2 {
        month += 12;
        year -= 1;
    }
    let correction = if gregorian {
        let century = (year as f64 / 100.0).floor();
        2.0 - century + (century / 4.0).floor()
    } else {
        0.0
    };

    (365.25 * (year + 4716) as f64).floor()
        + (30.6001 * (month + 1) as f64).floor()
        + day as f64
        + correction
        - 1524.5
        + fraction
}

/// Julian Day → Gregorian calendar fields.
///
/// With `is_utc == false` the fields are rendered as wall-clock time at
/// `ambient`.  When `jdms` (exact UTC millisecond-of-day of `jdn`) is given,
/// the time-of-day is taken from it instead of from the float fraction, and
/// the day number is reconciled against it.
pub fn jdn_to_gregorian(
    jdn: f64,
    is_utc: bool,
    ambient: AmbientOffset,
    jdms: Option<i64>,
) -> GregorianFields {
    let (jdn, jdms) = if is_utc {
        (jdn, jdms)
    } else {
        let shift = ambient.minutes();
        (
            jdn + minutes_to_day_fraction(shift),
            jdms.map(|ms| reconcile(ms, minutes_to_ms(shift)).0),
        )
    };
    let (day_number, ms) = split_day(jdn, jdms);
    civil_fields(day_number, ms)
}

/// Calendar fields from a day number (`floor(jd + 0.5)`) and an in-range
/// millisecond-of-day.
fn civil_fields(day_number: i64, ms: i64) -> GregorianFields {
    let (year, month, day) = civil_from_day_number(day_number);
    GregorianFields {
        year: saturate_year(year),
        month: month as i32,
        day: day as i32,
        hour: (ms / HOUR_MS) as i32,
        minute: (ms % HOUR_MS / MINUTE_MS) as i32,
        second: (ms % MINUTE_MS / SECOND_MS) as i32,
        millisecond: (ms % SECOND_MS) as i32,
    }
}

/// Clamp an `i64` year into the `i32` field range.
pub(crate) fn saturate_year(year: i64) -> i32 {
    year.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

fn civil_from_day_number(day_number: i64) -> (i64, i64, i64) {
    let mut d = day_number;
    if d >= GREGORIAN_CUTOVER_JDN {
        let c = ((d as f64 - 1_867_216.25) / 36_524.25).floor() as i64;
        d += 1 + c - (c as f64 / 4.0).floor() as i64;
    }
    d += 1524;

    let mut year = ((d as f64 - 122.1) / 365.25).floor() as i64;
    d -= (365.25 * year as f64).floor() as i64;
    let mut month = (d as f64 / 30.601).floor() as i64;
    d -= (30.601 * month as f64).floor() as i64;
    let day = d;

    if month > 13 {
        month -= 13;
        year -= 4715;
    } else {
        month -= 1;
        year -= 4716;
    }
    (year, month, day)
}
