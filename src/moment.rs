// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The immutable [`Moment`] value type.
//!
//! A `Moment` stores an instant as a Julian Day (`jdn`, astronomical
//! convention: `.5` is midnight UTC) plus `jdms`, the exact UTC
//! millisecond-of-day of the same instant.  `jdn` carries the day count and
//! `jdms` the sub-day part; see [`crate::jdms`] for how the two are kept in
//! agreement.
//!
//! Calendar fields are *derived* on first read and memoised per instance.
//! How they are read depends on [`MomentConfig`]: UTC or the ambient local
//! zone, plus an optional fixed offset.  [`Moment::utc`] and
//! [`Moment::local`] change only that reading, never the stored instant.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::OnceCell;
use qtty::Days;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::calendar::{gregorian_to_jdn, jdn_to_gregorian, saturate_year, GregorianFields};
use crate::epoch::{
    checked_julian_pair_to_timestamp, julian_pair_to_timestamp, timestamp_to_julian_pair, JulianPair,
};
use crate::error::Error;
use crate::format;
use crate::jdms::{compose_day, fraction_ms, reconcile, split_day};
use crate::offset::{minutes_to_day_fraction, minutes_to_ms, ConfigPatch, MomentConfig};
use crate::parse::{parse_date_string, ParsedDate};
use crate::unit::{CalendarUnit, Shift};

/// An instant on the Julian Day axis with a calendar reading attached.
///
/// ```
/// use jdcal::{AmbientOffset, CalendarUnit, GregorianFields, Moment, MomentConfig};
///
/// let cfg = MomentConfig::local().with_ambient(AmbientOffset::from_minutes(480));
/// let m = Moment::parse("2023-12-01", cfg);
/// let next = m.add(1, CalendarUnit::Month);
/// assert_eq!(next.format_default(), "2024-01-01 00:00:00");
/// assert_eq!(next, Moment::from_gregorian(&GregorianFields::new(2024, 1, 1), cfg));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "MomentRepr", into = "MomentRepr"))]
pub struct Moment {
    jdn: Days,
    jdms: i64,
    config: MomentConfig,
    fields: OnceCell<GregorianFields>,
    timestamp: OnceCell<Option<i64>>,
}

impl Moment {
    // ── constructors ──────────────────────────────────────────────────

    fn from_parts(jdn: f64, jdms: i64, config: MomentConfig) -> Self {
        Self {
            jdn: Days::new(jdn),
            jdms: reconcile(jdms, 0).0,
            config,
            fields: OnceCell::new(),
            timestamp: OnceCell::new(),
        }
    }

    /// The current instant from the host clock.
    pub fn now(config: MomentConfig) -> Self {
        Self::from_epoch_millis(Utc::now().timestamp_millis(), config)
    }

    /// Same instant and config as `other`.
    pub fn copy_of(other: &Moment) -> Self {
        Self::from_parts(other.jdn.value(), other.jdms, other.config)
    }

    /// Same instant as `other`, read with `patch` applied to its config.
    ///
    /// Fields absent from the patch take their defaults rather than the
    /// values of `other`; the ambient offset is inherited.
    pub fn from_moment(other: &Moment, patch: ConfigPatch) -> Self {
        Self::from_parts(other.jdn.value(), other.jdms, other.config.patched(patch))
    }

    /// From a bare Julian Day; `jdms` is derived from its fraction.
    pub fn from_julian_day_number(jdn: f64, config: MomentConfig) -> Self {
        Self::from_julian_pair(JulianPair::from_jdn(jdn), config)
    }

    pub fn from_julian_pair(pair: JulianPair, config: MomentConfig) -> Self {
        let jdms = pair.jdms.unwrap_or_else(|| fraction_ms(pair.jdn));
        Self::from_parts(pair.jdn, jdms, config)
    }

    /// From Unix-epoch milliseconds.
    pub fn from_epoch_millis(timestamp_ms: i64, config: MomentConfig) -> Self {
        Self::from_julian_pair(timestamp_to_julian_pair(timestamp_ms), config)
    }

    /// From a chrono date-time in any zone; only the instant is kept.
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>, config: MomentConfig) -> Self {
        Self::from_epoch_millis(datetime.timestamp_millis(), config)
    }

    /// From calendar fields, read as UTC or as ambient local time per
    /// `config.is_utc`.  The fixed `offset_minutes` is not applied here; it
    /// only affects how fields are rendered.
    pub fn from_gregorian(fields: &GregorianFields, config: MomentConfig) -> Self {
        Self::from_fields_as(fields, config.is_utc, config)
    }

    fn from_fields_as(fields: &GregorianFields, as_utc: bool, config: MomentConfig) -> Self {
        let jdn = gregorian_to_jdn(fields, as_utc, config.ambient);
        let zone_ms = if as_utc {
            0
        } else {
            minutes_to_ms(config.ambient.minutes())
        };
        Self::from_parts(jdn, fields.time_of_day_ms() - zone_ms, config)
    }

    fn from_parsed(parsed: ParsedDate, config: MomentConfig) -> Self {
        // A trailing `Z` pins the fields to UTC; a local config still
        // renders the resulting instant in local time.
        Self::from_fields_as(&parsed.fields, config.is_utc || parsed.explicit_utc, config)
    }

    /// Parse a date string leniently.
    ///
    /// Input the grammar does not recognise yields the first day of the
    /// current month at midnight.  Use [`str::parse`] for a strict variant.
    pub fn parse(input: &str, config: MomentConfig) -> Self {
        let parsed = parse_date_string(input).unwrap_or_else(|| {
            log::warn!("unrecognised date string {input:?}, using the current month");
            let today = Moment::now(config).fields();
            ParsedDate::fallback(today.year, today.month)
        });
        Self::from_parsed(parsed, config)
    }

    // ── static conversions ────────────────────────────────────────────

    /// [`gregorian_to_jdn`] with the zone settings of `config`.
    pub fn gregorian_to_jdn(fields: &GregorianFields, config: &MomentConfig) -> f64 {
        gregorian_to_jdn(fields, config.is_utc, config.ambient)
    }

    /// [`jdn_to_gregorian`] with the zone settings of `config`.
    pub fn jdn_to_gregorian(jdn: f64, config: &MomentConfig, jdms: Option<i64>) -> GregorianFields {
        jdn_to_gregorian(jdn, config.is_utc, config.ambient, jdms)
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub fn jdn(&self) -> f64 {
        self.jdn.value()
    }

    /// The Julian Day as a quantity.
    #[inline]
    pub fn julian_day(&self) -> Days {
        self.jdn
    }

    /// Exact UTC millisecond-of-day, in `[0, 86_400_000)`.
    #[inline]
    pub fn jdms(&self) -> i64 {
        self.jdms
    }

    #[inline]
    pub fn config(&self) -> &MomentConfig {
        &self.config
    }

    #[inline]
    pub fn is_utc(&self) -> bool {
        self.config.is_utc
    }

    /// Minutes east of UTC of the wall clock the fields are read in.
    #[inline]
    pub fn timezone_offset(&self) -> i32 {
        self.config.display_offset_minutes()
    }

    pub fn julian_pair(&self) -> JulianPair {
        JulianPair::new(self.jdn(), self.jdms)
    }

    // ── derived fields ────────────────────────────────────────────────

    /// All calendar fields, computed once per instance.
    pub fn fields(&self) -> GregorianFields {
        *self.fields.get_or_init(|| {
            let offset = self.config.offset_minutes;
            let jdms = reconcile(self.jdms, minutes_to_ms(offset)).0;
            jdn_to_gregorian(
                self.jdn() + minutes_to_day_fraction(offset),
                self.config.is_utc,
                self.config.ambient,
                Some(jdms),
            )
        })
    }

    pub fn year(&self) -> i32 {
        self.fields().year
    }

    pub fn month(&self) -> i32 {
        self.fields().month
    }

    pub fn day(&self) -> i32 {
        self.fields().day
    }

    pub fn hour(&self) -> i32 {
        self.fields().hour
    }

    pub fn minute(&self) -> i32 {
        self.fields().minute
    }

    pub fn second(&self) -> i32 {
        self.fields().second
    }

    pub fn millisecond(&self) -> i32 {
        self.fields().millisecond
    }

    /// Day of the week of the rendered date, `0` = Sunday.
    pub fn day_of_week(&self) -> u32 {
        let shift = self.timezone_offset();
        let jdms = reconcile(self.jdms, minutes_to_ms(shift)).0;
        let (day, _) = split_day(self.jdn() + minutes_to_day_fraction(shift), Some(jdms));
        // JD 0 (day number 0) was a Monday.
        ((day.rem_euclid(7) + 1) % 7) as u32
    }

    /// Unix-epoch milliseconds, computed once per instance.
    ///
    /// Saturates at `i64::MIN` / `i64::MAX` about 292 million years from
    /// the epoch; [`Moment::checked_timestamp`] reports that as `None`.
    pub fn timestamp(&self) -> i64 {
        self.checked_timestamp()
            .unwrap_or_else(|| julian_pair_to_timestamp(&self.julian_pair()))
    }

    pub fn checked_timestamp(&self) -> Option<i64> {
        *self
            .timestamp
            .get_or_init(|| checked_julian_pair_to_timestamp(&self.julian_pair()))
    }

    /// The instant as a chrono UTC date-time, or `None` outside chrono's range.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let datetime = self
            .checked_timestamp()
            .and_then(DateTime::<Utc>::from_timestamp_millis);
        if datetime.is_none() {
            log::debug!("JD {} is outside chrono's representable range", self.jdn());
        }
        datetime
    }

    // ── reinterpretation ──────────────────────────────────────────────

    /// The same stored instant read in UTC, fixed offset cleared.
    pub fn utc(&self) -> Moment {
        self.reinterpret(true)
    }

    /// The same stored instant read in ambient local time, fixed offset cleared.
    pub fn local(&self) -> Moment {
        self.reinterpret(false)
    }

    fn reinterpret(&self, is_utc: bool) -> Moment {
        let config = MomentConfig {
            is_utc,
            offset_minutes: 0,
            ambient: self.config.ambient,
        };
        Self::from_parts(self.jdn(), self.jdms, config)
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// A new moment `value` units later (earlier for negative `value`).
    ///
    /// Sub-day units move the exact millisecond accumulator and carry whole
    /// days into the Julian Day.  Days and weeks add to the Julian Day.
    /// Months and years are added to the calendar fields, which are then
    /// reconverted, so day overflow rolls forward (Jan 31 + 1 month is
    /// Mar 3 in a common year).  The month carry is done in `i64`, and a
    /// resulting year outside `i32` saturates at `i32::MIN` / `i32::MAX`.
    pub fn add(&self, value: i64, unit: CalendarUnit) -> Moment {
        match unit.shift(value) {
            Shift::Millis(delta_ms) => {
                let (day, ms) = split_day(self.jdn(), Some(self.jdms));
                let (jdms, carry) = reconcile(ms, delta_ms);
                Self::from_parts(compose_day(day + carry, jdms), jdms, self.config)
            }
            Shift::Days(days) => Self::from_parts((self.jdn + days).value(), self.jdms, self.config),
            Shift::Months(months) => self.add_to_fields(|f| {
                let total = (f.year as i64 * 12 + f.month as i64 - 1).saturating_add(months);
                f.year = saturate_year(total.div_euclid(12));
                f.month = total.rem_euclid(12) as i32 + 1;
            }),
            Shift::Years(years) => {
                self.add_to_fields(|f| f.year = saturate_year((f.year as i64).saturating_add(years)))
            }
        }
    }

    fn add_to_fields(&self, apply: impl FnOnce(&mut GregorianFields)) -> Moment {
        let mut fields = Self::jdn_to_gregorian(self.jdn(), &self.config, Some(self.jdms));
        apply(&mut fields);
        let jdn = Self::gregorian_to_jdn(&fields, &self.config);
        Self::from_parts(jdn, self.jdms, self.config)
    }

    // ── rendering ─────────────────────────────────────────────────────

    /// Render with a token pattern; an empty pattern uses
    /// [`DEFAULT_PATTERN`](crate::DEFAULT_PATTERN).
    pub fn format(&self, pattern: &str) -> String {
        format::format_moment(self, pattern)
    }

    /// Render as `YYYY-MM-DD HH:mm:ss`.
    pub fn format_default(&self) -> String {
        format::format_moment(self, format::DEFAULT_PATTERN)
    }

    /// `2023-06-05T12:00:00.000Z`.
    pub fn to_iso_string(&self) -> String {
        format::iso_string(self)
    }

    /// `Mon, 05 Jun 2023 12:00:00 GMT`.
    pub fn to_utc_string(&self) -> String {
        format::utc_string(self)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait implementations
// ═══════════════════════════════════════════════════════════════════════════

/// Equal when both the instant (to the millisecond) and the config match.
impl PartialEq for Moment {
    fn eq(&self, other: &Self) -> bool {
        split_day(self.jdn(), Some(self.jdms)) == split_day(other.jdn(), Some(other.jdms))
            && self.config == other.config
    }
}

/// `Mon Jun 05 2023 20:00:00 GMT+0800`, in the moment's own reading.
impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format::display_string(self))
    }
}

/// Strict parsing with the default config: input the grammar does not
/// match is an error instead of a fallback.
impl FromStr for Moment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_date_string(s)
            .map(|parsed| Self::from_parsed(parsed, MomentConfig::default()))
            .ok_or_else(|| Error::Unparseable(s.to_string()))
    }
}

#[cfg(feature = "serde")]
#[derive(Clone, Serialize, Deserialize)]
struct MomentRepr {
    jdn: f64,
    #[serde(default)]
    jdms: Option<i64>,
    #[serde(default)]
    config: MomentConfig,
}

#[cfg(feature = "serde")]
impl From<MomentRepr> for Moment {
    fn from(repr: MomentRepr) -> Self {
        Moment::from_julian_pair(
            JulianPair {
                jdn: repr.jdn,
                jdms: repr.jdms,
            },
            repr.config,
        )
    }
}

#[cfg(feature = "serde")]
impl From<Moment> for MomentRepr {
    fn from(moment: Moment) -> Self {
        MomentRepr {
            jdn: moment.jdn(),
            jdms: Some(moment.jdms),
            config: moment.config,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
