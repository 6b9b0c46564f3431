// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Exact millisecond-of-day bookkeeping.
//!
//! A Julian Day stored as `f64` near 2.4 million carries roughly 40 µs of
//! resolution, and every fractional-day addition rounds again.  The
//! millisecond-of-day accumulator (`jdms`) is kept alongside the float so
//! that second and millisecond fields stay exact.  The helpers here keep the
//! two in agreement:
//!
//! - [`reconcile`] wraps `jdms + delta` into `[0, DAY_MS)` and reports the
//!   whole days carried or borrowed.
//! - [`split_day`] reads the integer day number from a JD, trusting `jdms`
//!   (when given) for the sub-day part and correcting the day number by one
//!   if the float landed on the wrong side of midnight.
//! - [`compose_day`] rebuilds the JD from a day number and `jdms`.

use crate::constants::DAY_MS;

/// Add `delta_ms` to `jdms`, returning the wrapped millisecond-of-day and the
/// number of whole days carried (negative when borrowing).
#[inline]
pub fn reconcile(jdms: i64, delta_ms: i64) -> (i64, i64) {
    // Days and remainders are summed apart so no `i64` delta can overflow.
    let ms = jdms.rem_euclid(DAY_MS) + delta_ms.rem_euclid(DAY_MS);
    let carry = jdms.div_euclid(DAY_MS) + delta_ms.div_euclid(DAY_MS) + ms / DAY_MS;
    (ms % DAY_MS, carry)
}

/// Millisecond-of-day encoded in the fraction of `jd`, rounded to the
/// nearest millisecond. May return `DAY_MS` when the fraction rounds up.
#[inline]
pub(crate) fn fraction_ms(jd: f64) -> i64 {
    let shifted = jd + 0.5;
    ((shifted - shifted.floor()) * DAY_MS as f64).round() as i64
}

/// Split `jd` into `(day_number, millisecond_of_day)`.
///
/// `day_number` is `floor(jd + 0.5)`: midnight at the start of the civil
/// day. With `jdms` the sub-day part is taken from it verbatim and the day
/// number is nudged by one when the float fraction sits more than half a
/// day away from it.
pub fn split_day(jd: f64, jdms: Option<i64>) -> (i64, i64) {
    let day = (jd + 0.5).floor() as i64;
    let from_float = fraction_ms(jd);
    match jdms {
        Some(ms) => {
            let ms = ms.rem_euclid(DAY_MS);
            let diff = ms - from_float;
            if diff > DAY_MS / 2 {
                (day.saturating_sub(1), ms)
            } else if diff < -DAY_MS / 2 {
                (day.saturating_add(1), ms)
            } else {
                (day, ms)
            }
        }
        None => {
            let (ms, carry) = reconcile(from_float, 0);
            (day.saturating_add(carry), ms)
        }
    }
}

/// Inverse of [`split_day`].
#[inline]
pub fn compose_day(day: i64, jdms: i64) -> f64 {
    day as f64 - 0.5 + jdms as f64 / DAY_MS as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconcile_without_wrap() {
        assert_eq!(reconcile(1_000, 500), (1_500, 0));
    }

    #[test]
    fn reconcile_carries_forward() {
        assert_eq!(reconcile(DAY_MS - 1, 2), (1, 1));
        assert_eq!(reconcile(0, 3 * DAY_MS + 7), (7, 3));
    }

    #[test]
    fn reconcile_borrows_from_prior_day() {
        assert_eq!(reconcile(0, -1), (DAY_MS - 1, -1));
        assert_eq!(reconcile(10, -DAY_MS - 20), (DAY_MS - 10, -2));
    }

    #[test]
    fn reconcile_zero_delta_normalises_range() {
        assert_eq!(reconcile(DAY_MS, 0), (0, 1));
        assert_eq!(reconcile(-1, 0), (DAY_MS - 1, -1));
    }

    #[test]
    fn reconcile_extreme_deltas_do_not_overflow() {
        let (ms, carry) = reconcile(DAY_MS - 1, i64::MAX);
        assert_eq!(ms, (DAY_MS - 1 + i64::MAX % DAY_MS) % DAY_MS);
        assert_eq!(carry, i64::MAX / DAY_MS + 1);
        let (ms, carry) = reconcile(0, i64::MIN);
        assert_eq!(ms, i64::MIN.rem_euclid(DAY_MS));
        assert_eq!(carry, i64::MIN.div_euclid(DAY_MS));
    }

    #[test]
    fn split_noon_and_midnight() {
        assert_eq!(split_day(2_451_545.0, None), (2_451_545, DAY_MS / 2));
        assert_eq!(split_day(2_451_544.5, None), (2_451_545, 0));
    }

    #[test]
    fn split_rounds_up_to_next_midnight() {
        let just_before = 2_451_544.5 - 1e-9;
        assert_eq!(split_day(just_before, None), (2_451_545, 0));
    }

    #[test]
    fn split_trusts_jdms_across_midnight() {
        // Float says 23:59:59.99…, the accumulator says 00:00:00.000.
        let jd = 2_451_544.5 - 2e-9;
        assert_eq!(split_day(jd, Some(0)), (2_451_545, 0));
        // Float says 00:00:00.000 of the next day, accumulator says 23:59:59.999.
        let jd = 2_451_544.5;
        assert_eq!(split_day(jd, Some(DAY_MS - 1)), (2_451_544, DAY_MS - 1));
    }

    #[test]
    fn compose_inverts_split() {
        let (day, ms) = split_day(2_460_101.25, None);
        assert_eq!(compose_day(day, ms), 2_460_101.25);
    }
}
