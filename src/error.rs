// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types for calendar construction and conversion.
//!
//! Every conversion in this crate is a pure function, so the only failures
//! are local validation failures on the input. They are reported through
//! [`CalendarError`]; nothing is retried and nothing is silently mapped to a
//! sentinel value.
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | [`InvalidTimeScale`](CalendarError::InvalidTimeScale) | parsing a [`Scale`](crate::Scale) name |
//! | [`InvalidTimeZoneSlot`](CalendarError::InvalidTimeZoneSlot) | building a Mars [`TimeZone`](crate::TimeZone) |
//! | [`InvalidCivilDate`](CalendarError::InvalidCivilDate) | strict [`CivilDateTime`](crate::CivilDateTime) construction |
//! | [`InvalidMarsDate`](CalendarError::InvalidMarsDate) | strict [`MarsDateTime`](crate::MarsDateTime) construction |
//! | [`OutOfRange`](CalendarError::OutOfRange) | results outside the supported civil range, mirs beyond [`MAX_MIR`](crate::MarsDateTime::MAX_MIR) |

use thiserror::Error;

/// Which civil field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CivilField {
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Microsecond,
}

/// Which Mars calendar field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarsField {
    Month,
    Sol,
    Millisols,
}

/// Failure modes of the calendar conversions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalendarError {
    #[error("unsupported time scale '{0}': expected UTC, TAI or TT")]
    InvalidTimeScale(String),

    #[error("Mars time zone slot {0} is outside the range -5..=5")]
    InvalidTimeZoneSlot(i64),

    #[error("invalid civil date {year:04}-{month:02}-{day:02}: bad {field:?}")]
    InvalidCivilDate {
        year: i32,
        month: u32,
        day: u32,
        field: CivilField,
    },

    #[error("invalid Mars date M{mir}/{month:02}/{sol:02}: bad {field:?}")]
    InvalidMarsDate {
        mir: i64,
        month: u32,
        sol: u32,
        field: MarsField,
    },

    #[error("value is outside the supported calendar range")]
    OutOfRange,
}

/// Convenience alias used throughout the crate.
pub type CalendarResult<T> = Result<T, CalendarError>;
