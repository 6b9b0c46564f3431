// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Unix-epoch milliseconds ↔ Julian Day.
//!
//! Timestamps are POSIX milliseconds (leap seconds ignored).  The Unix epoch
//! falls on a midnight, so a timestamp's millisecond-of-day is simply its
//! remainder modulo one day and the conversions below are exact.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{DAY_MS, UNIX_EPOCH_DAY};
use crate::jdms::{compose_day, split_day};

/// A Julian Day with its optional exact millisecond-of-day companion.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JulianPair {
    pub jdn: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub jdms: Option<i64>,
}

impl JulianPair {
    pub const fn new(jdn: f64, jdms: i64) -> Self {
        Self {
            jdn,
            jdms: Some(jdms),
        }
    }

    /// A bare JD; the millisecond-of-day is derived from its fraction.
    pub const fn from_jdn(jdn: f64) -> Self {
        Self { jdn, jdms: None }
    }
}

impl From<f64> for JulianPair {
    fn from(jdn: f64) -> Self {
        Self::from_jdn(jdn)
    }
}

pub fn timestamp_to_jdn(timestamp_ms: i64) -> f64 {
    timestamp_to_julian_pair(timestamp_ms).jdn
}

/// Nearest millisecond timestamp of `jdn`.
pub fn jdn_to_timestamp(jdn: f64) -> i64 {
    julian_pair_to_timestamp(&JulianPair::from_jdn(jdn))
}

pub fn timestamp_to_julian_pair(timestamp_ms: i64) -> JulianPair {
    let day = UNIX_EPOCH_DAY + timestamp_ms.div_euclid(DAY_MS);
    let jdms = timestamp_ms.rem_euclid(DAY_MS);
    JulianPair::new(compose_day(day, jdms), jdms)
}

/// Timestamp of a pair, using `jdms` for the sub-day part when present.
///
/// Saturates at `i64::MIN` / `i64::MAX` for days more than about 292
/// million years from the epoch; see [`checked_julian_pair_to_timestamp`].
pub fn julian_pair_to_timestamp(pair: &JulianPair) -> i64 {
    let (day, ms) = split_day(pair.jdn, pair.jdms);
    day.saturating_sub(UNIX_EPOCH_DAY)
        .saturating_mul(DAY_MS)
        .saturating_add(ms)
}

/// Like [`julian_pair_to_timestamp`], but `None` when the result does not
/// fit in an `i64`.
pub fn checked_julian_pair_to_timestamp(pair: &JulianPair) -> Option<i64> {
    let (day, ms) = split_day(pair.jdn, pair.jdms);
    day.checked_sub(UNIX_EPOCH_DAY)?
        .checked_mul(DAY_MS)?
        .checked_add(ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{J2000, UNIX_EPOCH_JD};

    #[test]
    fn unix_epoch() {
        assert_eq!(timestamp_to_jdn(0), UNIX_EPOCH_JD);
        assert_eq!(jdn_to_timestamp(UNIX_EPOCH_JD), 0);
    }

    #[test]
    fn j2000() {
        assert_eq!(timestamp_to_jdn(946_728_000_000), J2000);
        assert_eq!(jdn_to_timestamp(J2000), 946_728_000_000);
    }

    #[test]
    fn negative_timestamps_borrow_whole_days() {
        let pair = timestamp_to_julian_pair(-1);
        assert_eq!(pair.jdms, Some(DAY_MS - 1));
        assert_eq!(julian_pair_to_timestamp(&pair), -1);
    }

    #[test]
    fn pair_keeps_millisecond_precision() {
        let ts = 1_686_000_123_457;
        let pair = timestamp_to_julian_pair(ts);
        assert_eq!(julian_pair_to_timestamp(&pair), ts);
    }

    #[test]
    fn far_future_saturates_or_reports_overflow() {
        // Roughly year one billion.
        let pair = JulianPair::new(365_250_000_000.5, 0);
        assert_eq!(julian_pair_to_timestamp(&pair), i64::MAX);
        assert_eq!(checked_julian_pair_to_timestamp(&pair), None);

        let past = JulianPair::new(-365_250_000_000.5, 0);
        assert_eq!(julian_pair_to_timestamp(&past), i64::MIN);
        assert_eq!(checked_julian_pair_to_timestamp(&past), None);
    }

    #[test]
    fn checked_agrees_within_range() {
        let pair = timestamp_to_julian_pair(-62_135_596_800_000);
        assert_eq!(checked_julian_pair_to_timestamp(&pair), Some(-62_135_596_800_000));
    }

    #[test]
    fn bare_jdn_rounds_to_nearest_millisecond() {
        let ts = jdn_to_timestamp(UNIX_EPOCH_JD + 1.5 / 86_400_000.0);
        assert!(ts == 1 || ts == 2, "got {ts}");
    }
}
