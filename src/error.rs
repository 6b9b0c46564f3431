// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type for the few typed entry points that can refuse input.
//!
//! Conversions themselves never fail: malformed strings fall back to
//! defaults and out-of-range fields are normalised by the calendar
//! arithmetic.

/// Result type for fallible `jdcal` operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unknown calendar unit: {0:?}")]
    UnknownUnit(String),

    #[error("cannot parse {0:?} as a date")]
    Unparseable(String),
}
