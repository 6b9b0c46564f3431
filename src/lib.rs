// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian Day moments
//!
//! Conversion between Gregorian calendar fields, the astronomical Julian Day
//! and Unix-epoch milliseconds, with calendar arithmetic and pattern
//! formatting over an immutable value type.  Dates before the Gregorian
//! cutover and before year 1 (astronomical numbering, year 0 = 1 BC) are
//! handled by the same arithmetic.
//!
//! # Core types
//!
//! - [`Moment`]: an instant (`jdn` + exact millisecond-of-day) with a
//!   calendar reading attached.
//! - [`MomentConfig`]: UTC vs. local reading, fixed offset, and the
//!   injectable [`AmbientOffset`] standing in for the host timezone.
//! - [`GregorianFields`]: year/month/day/hour/minute/second/millisecond.
//! - [`CalendarUnit`]: units accepted by [`Moment::add`].
//!
//! # Conversions
//!
//! | Function | Direction |
//! |----------|-----------|
//! | [`gregorian_to_jdn`] | calendar fields → JD |
//! | [`jdn_to_gregorian`] | JD → calendar fields |
//! | [`timestamp_to_jdn`] / [`jdn_to_timestamp`] | epoch ms ↔ JD |
//! | [`timestamp_to_julian_pair`] / [`julian_pair_to_timestamp`] | epoch ms ↔ JD + ms-of-day |
//!
//! # Quick example
//!
//! ```
//! use jdcal::{CalendarUnit, GregorianFields, Moment, MomentConfig};
//!
//! let m = Moment::from_gregorian(
//!     &GregorianFields::new(2023, 4, 14).and_hms(12, 0, 0),
//!     MomentConfig::utc(),
//! );
//! assert_eq!(m.jdn(), 2_460_049.0);
//! assert_eq!(m.add(1, CalendarUnit::Week).format("YYYY-MM-DD dddd"), "2023-04-21 Friday");
//! ```

mod calendar;
mod constants;
mod epoch;
mod error;
mod format;
pub mod jdms;
mod moment;
mod offset;
mod parse;
mod unit;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use calendar::{gregorian_to_jdn, jdn_to_gregorian, GregorianFields};
pub use constants::{
    DAY_MS, GREGORIAN_CUTOVER_JDN, J2000, MONTH_NAMES, UNIX_EPOCH_JD, WEEKDAY_NAMES,
};
pub use epoch::{
    checked_julian_pair_to_timestamp, jdn_to_timestamp, julian_pair_to_timestamp,
    timestamp_to_jdn, timestamp_to_julian_pair, JulianPair,
};
pub use error::{Error, Result};
pub use format::{format_moment, DEFAULT_PATTERN};
pub use moment::Moment;
pub use offset::{AmbientOffset, ConfigPatch, MomentConfig};
pub use parse::{parse_date_string, ParsedDate};
pub use unit::{CalendarUnit, Shift};
