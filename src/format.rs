// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Token-pattern rendering of a [`Moment`].
//!
//! | Token | Output |
//! |-------|--------|
//! | `J` | Julian Day |
//! | `Y` / `YY` / `YYYY` | year / last two digits / four digits, signed when negative |
//! | `M` / `MM` / `MMM` / `MMMM` | month / padded / `Jan` / `January` |
//! | `D` / `DD` | day of month / padded |
//! | `d` / `dd` / `ddd` / `dddd` | weekday index / `Mo` / `Mon` / `Monday` |
//! | `H` / `HH` / `h` / `hh` | 24-hour / padded / 12-hour / padded |
//! | `a` / `A` | `am` / `AM` |
//! | `m` / `mm` / `s` / `ss` | minute and second, plain / padded |
//! | `S` / `SS` / `SSS` | tenths / hundredths / milliseconds |
//! | `Z` / `ZZ` | offset `+08:00` / `+0800` |
//! | `[...]` | literal text |
//!
//! Any other run of pattern letters is copied through unchanged.

use chrono::{FixedOffset, SecondsFormat};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::calendar::GregorianFields;
use crate::constants::{MONTH_NAMES, WEEKDAY_NAMES};
use crate::moment::Moment;

pub const DEFAULT_PATTERN: &str = "YYYY-MM-DD HH:mm:ss";

const ISO_PATTERN: &str = "YYYY-MM-DD[T]HH:mm:ss.SSS[Z]";
const UTC_PATTERN: &str = "ddd, DD MMM YYYY HH:mm:ss [GMT]";
const DISPLAY_PATTERN: &str = "ddd MMM DD YYYY HH:mm:ss [GMT]ZZ";

/// Years from which chrono renders the host-style strings; earlier dates use
/// the pattern formatter.
const NATIVE_YEAR_FLOOR: i32 = 1900;

static FORMAT_TOKENS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\]]+)\]|J|Y{1,4}|M{1,4}|D{1,2}|d{1,4}|H{1,2}|h{1,2}|a|A|m{1,2}|s{1,2}|Z{1,2}|S{1,3}")
        .unwrap()
});

/// Everything a token can ask for, read once per call.
struct TokenContext {
    jdn: f64,
    fields: GregorianFields,
    weekday: u32,
    offset_minutes: i32,
}

impl TokenContext {
    fn new(moment: &Moment) -> Self {
        Self {
            jdn: moment.jdn(),
            fields: moment.fields(),
            weekday: moment.day_of_week(),
            offset_minutes: moment.timezone_offset(),
        }
    }

    fn render(&self, token: &str) -> Option<String> {
        let f = &self.fields;
        let hour12 = match f.hour % 12 {
            0 => 12,
            h => h,
        };
        let rendered = match token {
            "J" => self.jdn.to_string(),
            "Y" => f.year.to_string(),
            "YY" => format!("{:02}", f.year.unsigned_abs() % 100),
            "YYYY" => signed_year(f.year),
            "M" => f.month.to_string(),
            "MM" => format!("{:02}", f.month),
            "MMM" => abbreviate(month_name(f.month), 3),
            "MMMM" => month_name(f.month).to_string(),
            "D" => f.day.to_string(),
            "DD" => format!("{:02}", f.day),
            "d" => self.weekday.to_string(),
            "dd" => abbreviate(self.weekday_name(), 2),
            "ddd" => abbreviate(self.weekday_name(), 3),
            "dddd" => self.weekday_name().to_string(),
            "H" => f.hour.to_string(),
            "HH" => format!("{:02}", f.hour),
            "h" => hour12.to_string(),
            "hh" => format!("{hour12:02}"),
            "a" => meridiem(f.hour).to_lowercase(),
            "A" => meridiem(f.hour).to_string(),
            "m" => f.minute.to_string(),
            "mm" => format!("{:02}", f.minute),
            "s" => f.second.to_string(),
            "ss" => format!("{:02}", f.second),
            "S" => (f.millisecond / 100).to_string(),
            "SS" => format!("{:02}", f.millisecond / 10),
            "SSS" => format!("{:03}", f.millisecond),
            "Z" => zone(self.offset_minutes, ":"),
            "ZZ" => zone(self.offset_minutes, ""),
            _ => return None,
        };
        Some(rendered)
    }

    fn weekday_name(&self) -> &'static str {
        WEEKDAY_NAMES
            .get(self.weekday as usize)
            .copied()
            .unwrap_or("")
    }
}

fn signed_year(year: i32) -> String {
    let digits = format!("{:04}", year.unsigned_abs());
    if year < 0 {
        format!("-{digits}")
    } else {
        digits
    }
}

fn month_name(month: i32) -> &'static str {
    usize::try_from(month - 1)
        .ok()
        .and_then(|i| MONTH_NAMES.get(i))
        .copied()
        .unwrap_or("")
}

fn abbreviate(name: &str, len: usize) -> String {
    name.chars().take(len).collect()
}

fn meridiem(hour: i32) -> &'static str {
    if hour < 12 {
        "AM"
    } else {
        "PM"
    }
}

fn zone(offset_minutes: i32, separator: &str) -> String {
    let sign = if offset_minutes >= 0 { '+' } else { '-' };
    let minutes = offset_minutes.unsigned_abs();
    format!("{sign}{:02}{separator}{:02}", minutes / 60, minutes % 60)
}

/// Render `moment` with `pattern` (or [`DEFAULT_PATTERN`] if empty).
pub fn format_moment(moment: &Moment, pattern: &str) -> String {
    let pattern = if pattern.is_empty() {
        DEFAULT_PATTERN
    } else {
        pattern
    };
    let ctx = TokenContext::new(moment);
    FORMAT_TOKENS
        .replace_all(pattern, |caps: &Captures<'_>| match caps.get(1) {
            Some(literal) => literal.as_str().to_string(),
            None => ctx.render(&caps[0]).unwrap_or_else(|| caps[0].to_string()),
        })
        .into_owned()
}

// ── host-style strings ────────────────────────────────────────────────────

pub(crate) fn iso_string(moment: &Moment) -> String {
    let utc = moment.utc();
    if utc.year() > NATIVE_YEAR_FLOOR {
        if let Some(datetime) = utc.to_datetime() {
            return datetime.to_rfc3339_opts(SecondsFormat::Millis, true);
        }
    }
    format_moment(&utc, ISO_PATTERN)
}

pub(crate) fn utc_string(moment: &Moment) -> String {
    let utc = moment.utc();
    if utc.year() > NATIVE_YEAR_FLOOR {
        if let Some(datetime) = utc.to_datetime() {
            return datetime.format("%a, %d %b %Y %H:%M:%S GMT").to_string();
        }
    }
    format_moment(&utc, UTC_PATTERN)
}

pub(crate) fn display_string(moment: &Moment) -> String {
    if moment.year() > NATIVE_YEAR_FLOOR {
        let zone = FixedOffset::east_opt(moment.timezone_offset() * 60);
        if let (Some(datetime), Some(zone)) = (moment.to_datetime(), zone) {
            return datetime
                .with_timezone(&zone)
                .format("%a %b %d %Y %H:%M:%S GMT%z")
                .to_string();
        }
    }
    format_moment(moment, DISPLAY_PATTERN)
}
