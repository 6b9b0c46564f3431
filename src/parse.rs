// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Loose date-time string grammar.
//!
//! Accepted shapes, all optional from the month onward:
//!
//! ```text
//! 2023-05-06 12:30:45.123Z
//! 2023/5/6T12:30
//! 20230506
//! -0099-01-01      astronomical year −99
//! BC100/1/1        100 BC, i.e. astronomical year −99
//! 0/04/09          year 0
//! ```
//!
//! Missing month and day default to `1`, missing time fields to `0`.  A
//! trailing `Z` (either case) is reported as [`ParsedDate::explicit_utc`];
//! the parser itself does not act on it.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::calendar::GregorianFields;

static DATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?x)
        ^\s*
        (?:
            (?i:bc)\s*(?P<bc>\d{1,6})    # BC-prefixed year
          | (?P<signed>[+-]\d{1,6})      # signed astronomical year
          | (?P<year>\d{1,4})            # plain year
        )
        [-/]?
        (?P<month>\d{1,2})?
        [-/]?
        (?P<day>\d{0,2})
        [Tt\s]*
        (?P<hour>\d{1,2})?
        :?
        (?P<minute>\d{1,2})?
        :?
        (?P<second>\d{1,2})?
        (?:[.:](?P<fraction>\d+))?       # fractional seconds
        \s*
        (?P<utc>[Zz])?
        \s*$
        "#,
    )
    .unwrap()
});

/// Fields recovered from a date string.
///
/// Fractional seconds are read as a decimal fraction, so `.5` is 500 ms
/// (not 5 ms); only the first three digits count.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParsedDate {
    pub fields: GregorianFields,
    /// The input ended in `Z`.
    pub explicit_utc: bool,
}

impl ParsedDate {
    /// Defaults used when nothing in the input matches: the first day of
    /// the given year and month at midnight.
    pub fn fallback(year: i32, month: i32) -> Self {
        Self {
            fields: GregorianFields::new(year, month, 1),
            explicit_utc: false,
        }
    }
}

/// Parse `input` against the grammar above.
///
/// Returns `None` only when the string does not match at all.
pub fn parse_date_string(input: &str) -> Option<ParsedDate> {
    let caps = DATE_REGEX.captures(input)?;

    let year = if let Some(bc) = number(&caps, "bc") {
        1 - bc
    } else {
        number(&caps, "signed")
            .or_else(|| number(&caps, "year"))
            .unwrap_or(0)
    };

    let fields = GregorianFields {
        year,
        month: number(&caps, "month").unwrap_or(1),
        day: number(&caps, "day").unwrap_or(1),
        hour: number(&caps, "hour").unwrap_or(0),
        minute: number(&caps, "minute").unwrap_or(0),
        second: number(&caps, "second").unwrap_or(0),
        millisecond: caps
            .name("fraction")
            .map_or(0, |m| fraction_to_millis(m.as_str())),
    };

    Some(ParsedDate {
        fields,
        explicit_utc: caps.name("utc").is_some(),
    })
}

fn number(caps: &Captures<'_>, name: &str) -> Option<i32> {
    caps.name(name).and_then(|m| m.as_str().parse().ok())
}

/// Decimal fraction of a second → milliseconds, keeping three digits.
fn fraction_to_millis(digits: &str) -> i32 {
    digits
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(3)
        .fold(0, |acc, b| acc * 10 + (b - b'0') as i32)
}
