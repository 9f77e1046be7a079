// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil (proleptic Gregorian) date-time fields.
//!
//! [`CivilDateTime`] is the plain, validated record of an Earth wall-clock
//! reading: year (astronomical numbering, so year 0 is 1 BCE), month, day,
//! time of day down to the microsecond, and an optional fixed UTC offset.
//! It carries no arithmetic of its own; see [`EarthTime`](crate::EarthTime)
//! for that.

use chrono::FixedOffset;
use std::fmt;

use crate::error::{CalendarError, CalendarResult, CivilField};
use crate::leap_seconds;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Returns `true` for leap years of the proleptic Gregorian calendar.
#[inline]
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1..=12) of `year`. Returns 0 for an invalid month.
#[inline]
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// A validated civil date-time.
///
/// `offset == None` means the fields are UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCivilDateTime"))]
pub struct CivilDateTime {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    microsecond: u32,
    /// Seconds east of UTC.
    offset: Option<i32>,
}

/// Unchecked wire form of [`CivilDateTime`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawCivilDateTime {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    microsecond: u32,
    offset: Option<i32>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCivilDateTime> for CivilDateTime {
    type Error = CalendarError;

    fn try_from(raw: RawCivilDateTime) -> CalendarResult<Self> {
        let dt = Self::from_parts(
            raw.year,
            raw.month,
            raw.day,
            raw.hour,
            raw.minute,
            raw.second,
            raw.microsecond,
            raw.offset,
        );
        dt.validate()?;
        Ok(dt)
    }
}

impl CivilDateTime {
    /// Builds a UTC civil date-time, rejecting any out-of-range field.
    ///
    /// `second == 60` is accepted only for the last minute of a month that
    /// appears in the leap-second table.
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        microsecond: u32,
    ) -> CalendarResult<Self> {
        let dt = Self::from_parts(year, month, day, hour, minute, second, microsecond, None);
        dt.validate()?;
        Ok(dt)
    }

    /// Midnight UTC on the given date.
    pub fn date(year: i32, month: u32, day: u32) -> CalendarResult<Self> {
        Self::new(year, month, day, 0, 0, 0, 0)
    }

    /// Same fields, read as local time at `offset`.
    ///
    /// Re-validates because a leap second is only legal where the shifted
    /// reading lands on 23:59:60 UTC.
    pub fn with_offset(self, offset: FixedOffset) -> CalendarResult<Self> {
        let dt = Self {
            offset: Some(offset.local_minus_utc()),
            ..self
        };
        dt.validate()?;
        Ok(dt)
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) const fn from_parts(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        microsecond: u32,
        offset: Option<i32>,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            microsecond,
            offset,
        }
    }

    fn invalid(&self, field: CivilField) -> CalendarError {
        CalendarError::InvalidCivilDate {
            year: self.year,
            month: self.month,
            day: self.day,
            field,
        }
    }

    fn validate(&self) -> CalendarResult<()> {
        if self.offset.is_some() && self.offset().is_none() {
            return Err(CalendarError::OutOfRange);
        }
        if !(1..=12).contains(&self.month) {
            return Err(self.invalid(CivilField::Month));
        }
        if self.day < 1 || self.day > days_in_month(self.year, self.month) {
            return Err(self.invalid(CivilField::Day));
        }
        if self.hour > 23 {
            return Err(self.invalid(CivilField::Hour));
        }
        if self.minute > 59 {
            return Err(self.invalid(CivilField::Minute));
        }
        if self.second > 60 || (self.second == 60 && !self.is_leap_second_minute()) {
            return Err(self.invalid(CivilField::Second));
        }
        if self.microsecond > 999_999 {
            return Err(self.invalid(CivilField::Microsecond));
        }
        Ok(())
    }

    /// Whether this reading falls in 23:59 UTC on the last day of a month
    /// that ended with an inserted leap second.
    fn is_leap_second_minute(&self) -> bool {
        let offset_minutes = (self.offset_seconds() / 60) as i64;
        let local = self.hour as i64 * 60 + self.minute as i64;
        let utc = local - offset_minutes;
        // Local and UTC readings land on different days when the offset
        // pushes the minute across midnight.
        let day_shift = utc.div_euclid(1440);
        let utc_minute_of_day = utc.rem_euclid(1440);
        if utc_minute_of_day != 23 * 60 + 59 {
            return false;
        }
        let (mut year, mut month, mut day) = (self.year, self.month, self.day as i64 + day_shift);
        if day < 1 {
            month = if month == 1 { 12 } else { month - 1 };
            if month == 12 {
                year -= 1;
            }
            day = days_in_month(year, month) as i64;
        } else if day > days_in_month(year, month) as i64 {
            month = if month == 12 { 1 } else { month + 1 };
            if month == 1 {
                year += 1;
            }
            day = 1;
        }
        day == days_in_month(year, month) as i64 && leap_seconds::is_leap_month(year, month)
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    pub const fn month(&self) -> u32 {
        self.month
    }

    #[inline]
    pub const fn day(&self) -> u32 {
        self.day
    }

    #[inline]
    pub const fn hour(&self) -> u32 {
        self.hour
    }

    #[inline]
    pub const fn minute(&self) -> u32 {
        self.minute
    }

    #[inline]
    pub const fn second(&self) -> u32 {
        self.second
    }

    #[inline]
    pub const fn microsecond(&self) -> u32 {
        self.microsecond
    }

    /// UTC offset, or `None` for UTC fields.
    #[inline]
    pub fn offset(&self) -> Option<FixedOffset> {
        self.offset.and_then(FixedOffset::east_opt)
    }

    /// Offset from UTC in seconds (0 when no offset is set).
    #[inline]
    pub fn offset_seconds(&self) -> i32 {
        self.offset.unwrap_or(0)
    }

    /// Seconds elapsed since local midnight, including the microseconds.
    #[inline]
    pub fn seconds_of_day(&self) -> f64 {
        (self.hour * 3600 + self.minute * 60 + self.second) as f64
            + self.microsecond as f64 / 1e6
    }
}

impl fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:06}",
            self.year, self.month, self.day, self.hour, self.minute, self.second, self.microsecond
        )?;
        match self.offset() {
            Some(offset) => write!(f, "{offset}"),
            None => f.write_str("Z"),
        }
    }
}
