// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Timezone interpretation: the host (ambient) offset and per-moment config.
//!
//! Two offsets take part in every conversion and must not be confused:
//!
//! | Offset | Source | Applied when |
//! |--------|--------|--------------|
//! | [`AmbientOffset`] | the executing host, or injected | `is_utc == false` |
//! | `offset_minutes` | declared by the caller | always, on top of the above |
//!
//! All offsets here are minutes **east** of UTC (`local − UTC`), the sign
//! convention of `chrono::FixedOffset::local_minus_utc`.

use chrono::{Local, Offset};
use once_cell::sync::Lazy;
use qtty::{Day, Days, Minutes};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{DAY_MINUTES, MINUTE_MS};

static HOST_OFFSET: Lazy<AmbientOffset> = Lazy::new(|| {
    let seconds = Local::now().offset().fix().local_minus_utc();
    let offset = AmbientOffset::from_minutes(seconds / 60);
    log::debug!("host local offset resolved to {} min", offset.minutes());
    offset
});

/// Local-timezone offset of the execution environment, in minutes east of UTC.
///
/// The library never reads the host timezone behind the caller's back:
/// every conversion receives an `AmbientOffset` through [`MomentConfig`].
/// [`AmbientOffset::host`] is the default and asks the host once per process.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AmbientOffset(i32);

impl AmbientOffset {
    /// UTC itself.
    pub const UTC: Self = Self(0);

    /// A fixed offset in minutes east of UTC (`480` for UTC+08:00).
    #[inline]
    pub const fn from_minutes(minutes: i32) -> Self {
        Self(minutes)
    }

    /// The host's local offset, queried on first use and cached.
    #[inline]
    pub fn host() -> Self {
        *HOST_OFFSET
    }

    #[inline]
    pub const fn minutes(&self) -> i32 {
        self.0
    }

    /// The offset as a fraction of a day.
    #[inline]
    pub fn as_days(&self) -> Days {
        Minutes::new(self.0 as f64).to::<Day>()
    }
}

impl Default for AmbientOffset {
    fn default() -> Self {
        Self::host()
    }
}

/// Minutes expressed as a day fraction, divided exactly as `m / 1440`.
#[inline]
pub(crate) fn minutes_to_day_fraction(minutes: i32) -> f64 {
    minutes as f64 / DAY_MINUTES
}

#[inline]
pub(crate) fn minutes_to_ms(minutes: i32) -> i64 {
    minutes as i64 * MINUTE_MS
}

/// How a [`Moment`](crate::Moment) reads and renders calendar fields.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MomentConfig {
    /// Read and emit fields in UTC instead of the ambient local zone.
    pub is_utc: bool,
    /// Extra fixed offset (minutes east) layered on top of `is_utc`.
    pub offset_minutes: i32,
    /// Offset used for local interpretation when `is_utc` is false.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ambient: AmbientOffset,
}

impl Default for MomentConfig {
    fn default() -> Self {
        Self {
            is_utc: false,
            offset_minutes: 0,
            ambient: AmbientOffset::host(),
        }
    }
}

impl MomentConfig {
    /// UTC interpretation, no extra offset.
    pub fn utc() -> Self {
        Self {
            is_utc: true,
            ..Self::default()
        }
    }

    /// Local interpretation against the host offset.
    pub fn local() -> Self {
        Self::default()
    }

    pub fn with_offset(self, offset_minutes: i32) -> Self {
        Self {
            offset_minutes,
            ..self
        }
    }

    pub fn with_ambient(self, ambient: AmbientOffset) -> Self {
        Self { ambient, ..self }
    }

    /// Minutes east of UTC of the wall clock this config renders.
    pub fn display_offset_minutes(&self) -> i32 {
        let zone = if self.is_utc { 0 } else { self.ambient.minutes() };
        zone + self.offset_minutes
    }

    /// Apply a [`ConfigPatch`]: present fields win, absent fields reset to
    /// their defaults. The ambient offset is kept.
    pub fn patched(&self, patch: ConfigPatch) -> Self {
        Self {
            is_utc: patch.is_utc.unwrap_or(false),
            offset_minutes: patch.offset_minutes.unwrap_or(0),
            ambient: self.ambient,
        }
    }
}

/// Partial configuration applied when re-wrapping an existing moment.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConfigPatch {
    pub is_utc: Option<bool>,
    pub offset_minutes: Option<i32>,
}

impl ConfigPatch {
    pub fn utc() -> Self {
        Self {
            is_utc: Some(true),
            offset_minutes: None,
        }
    }

    pub fn offset(offset_minutes: i32) -> Self {
        Self {
            is_utc: None,
            offset_minutes: Some(offset_minutes),
        }
    }
}
