// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Leap-second table
//!
//! UTC months that ended with an inserted (positive) leap second, as
//! announced in IERS Bulletin C. The list is ordered and must be extended by
//! hand whenever the IERS schedules a new leap second: append the
//! `(year, month)` of the month whose last minute gains a 61st second.
//!
//! TAI − UTC was already 10 s when the leap-second system began on
//! 1972-01-01, so `TAI − UTC = 10 + leap_second_count`.
//!
//! ## References
//! * IERS Bulletin C (leap second announcements)
//! * <https://hpiers.obspm.fr/iers/bul/bulc/Leap_Second.dat>

/// TAI − UTC in effect on 1972-01-01, before the first inserted leap second.
pub const INITIAL_TAI_MINUS_UTC: f64 = 10.0;

/// `(year, month)` pairs whose final UTC minute had 61 seconds.
pub const LEAP_SECOND_MONTHS: [(i32, u32); 27] = [
    (1972, 6),
    (1972, 12),
    (1973, 12),
    (1974, 12),
    (1975, 12),
    (1976, 12),
    (1977, 12),
    (1978, 12),
    (1979, 12),
    (1981, 6),
    (1982, 6),
    (1983, 6),
    (1985, 6),
    (1987, 12),
    (1989, 12),
    (1990, 12),
    (1992, 6),
    (1993, 6),
    (1994, 6),
    (1995, 12),
    (1997, 6),
    (1998, 12),
    (2005, 12),
    (2008, 12),
    (2012, 6),
    (2015, 6),
    (2016, 12),
];

/// Month number used to ask for the count at the very end of a year.
pub const LAST_MONTH: u32 = 12;

/// Whether a leap second was inserted at the end of `(year, month)` UTC.
#[inline]
pub fn is_leap_month(year: i32, month: u32) -> bool {
    LEAP_SECOND_MONTHS.binary_search(&(year, month)).is_ok()
}

/// Number of leap seconds in effect during UTC month `(year, month)`.
///
/// A table entry counts from the first instant of the following month,
/// so during the entry's own month (including its 23:59:60) it is not yet
/// counted.
#[inline]
pub fn leap_seconds_before(year: i32, month: u32) -> u32 {
    // Entries strictly earlier than (year, month).
    LEAP_SECOND_MONTHS.partition_point(|&entry| entry < (year, month)) as u32
}

/// TAI − UTC in seconds during UTC month `(year, month)`.
#[inline]
pub fn tai_minus_utc(year: i32, month: u32) -> f64 {
    INITIAL_TAI_MINUS_UTC + leap_seconds_before(year, month) as f64
}
