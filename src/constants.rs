// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Fixed epochs and the name tables used by the formatter.

/// J2000.0 epoch: 2000-01-01T12:00:00 UTC (JD 2 451 545.0).
pub const J2000: f64 = 2_451_545.0;

/// JD of the Unix epoch (1970-01-01T00:00:00Z).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Day number (`floor(jd + 0.5)`) of the Unix epoch.
pub(crate) const UNIX_EPOCH_DAY: i64 = 2_440_588;

/// First day number of the Gregorian calendar (1582-10-15).
///
/// Earlier day numbers are decoded with the Julian leap-year rule.
pub const GREGORIAN_CUTOVER_JDN: i64 = 2_299_161;

/// `year * 372 + month * 31 + day` of 1582-10-15, the calendar-side test
/// for the same cutover.
pub(crate) const GREGORIAN_CUTOVER_KEY: i64 = 1582 * 372 + 10 * 31 + 15;

/// Milliseconds in one civil day.
pub const DAY_MS: i64 = 86_400_000;

/// Minutes in one civil day.
pub(crate) const DAY_MINUTES: f64 = 1_440.0;

pub(crate) const HOUR_MS: i64 = 3_600_000;
pub(crate) const MINUTE_MS: i64 = 60_000;
pub(crate) const SECOND_MS: i64 = 1_000;

/// English month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English weekday names, Sunday first (index = `Moment::day_of_week`).
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];
