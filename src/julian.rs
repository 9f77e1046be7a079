// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Gregorian ↔ Julian Date arithmetic.
//!
//! Pure numeric routines with no notion of time scale: a Julian Date here is
//! just a day count whose integer boundary falls at noon. The scale-aware
//! wrappers live in [`EarthTime`](crate::EarthTime) and [`Time`](crate::Time).
//!
//! ## References
//! * Fliegel & Van Flandern (1968), *Communications of the ACM* 11, 657
//! * Press et al., *Numerical Recipes in C*, 2nd ed., §1.7 (`caldat`)

use crate::civil::{days_in_month, CivilDateTime};
use crate::error::{CalendarError, CalendarResult};

/// Julian Date of the Unix epoch, 1970-01-01T00:00:00 UTC.
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Seconds in a civil day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// J2000.0: 2000-01-01T12:00:00 (JD 2 451 545.0).
pub const J2000: f64 = 2_451_545.0;

/// Days in a Julian century.
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Julian Day Number (the integer day starting at noon) of a Gregorian date.
///
/// Works for the whole proleptic range, including year 0 and negative years:
/// the year is shifted to start in March and every division floors.
pub fn julian_day_number(year: i64, month: u32, day: u32) -> i64 {
    let a = (14 - month as i64) / 12;
    let y = year + 4800 - a;
    let m = month as i64 + 12 * a - 3;
    day as i64 + (153 * m + 2) / 5 + 365 * y + y.div_euclid(4) - y.div_euclid(100)
        + y.div_euclid(400)
        - 32_045
}

/// Julian Date of a civil date-time (the offset, if any, is removed first).
pub fn gregorian_to_julian_date(dt: &CivilDateTime) -> f64 {
    let jdn = julian_day_number(dt.year() as i64, dt.month(), dt.day());
    let seconds = dt.seconds_of_day() - dt.offset_seconds() as f64;
    // The Julian day starts at noon, half a day after civil midnight.
    (jdn as f64 - 0.5) + seconds / SECONDS_PER_DAY
}

/// UTC civil date-time of a Julian Date.
///
/// The time of day is peeled off by successive multiplications
/// (hours → minutes → seconds → microseconds), flooring each stage, so an
/// input that lands a hair below a boundary reads as the previous
/// microsecond rather than rounding up.
pub fn julian_date_to_gregorian(jd: f64) -> CalendarResult<CivilDateTime> {
    if !jd.is_finite() {
        return Err(CalendarError::OutOfRange);
    }
    let mut jday = jd.floor();
    let mut frac = jd - jday;

    // Half-day offset: move the day boundary from noon to midnight. This
    // has to happen before the century correction below, otherwise the
    // morning of March 1 in a common century year reads as February 29.
    frac += 0.5;
    if frac >= 1.0 {
        frac -= 1.0;
        jday += 1.0;
    }

    let j0 = (((jday - 1_867_216.0) - 0.25) / 36_524.25).floor();
    let j1 = jday + 1.0 + j0 - (0.25 * j0).floor();

    let j2 = j1 + 1524.0;
    let j3 = (6680.0 + ((j2 - 2_439_870.0) - 122.1) / 365.25).floor();
    let j4 = (j3 * 365.25).floor();
    let j5 = ((j2 - j4) / 30.6001).floor();

    let day = (j2 - j4 - (j5 * 30.6001).floor()).floor();
    let mut month = (j5 - 1.0).floor();
    if month > 12.0 {
        month -= 12.0;
    }
    let mut year = (j3 - 4715.0).floor();
    if month > 2.0 {
        year -= 1.0;
    }
    if year < i32::MIN as f64 || year > i32::MAX as f64 {
        return Err(CalendarError::OutOfRange);
    }

    let hours = frac * 24.0;
    let hour = hours.floor();
    let minutes = (hours - hour) * 60.0;
    let minute = minutes.floor();
    let seconds = (minutes - minute) * 60.0;
    let second = seconds.floor();
    let microsecond = ((seconds - second) * 1e6).floor();

    let (year, month, day) = (year as i32, month as u32, day as u32);
    debug_assert!(day >= 1 && day <= days_in_month(year, month));
    Ok(CivilDateTime::from_parts(
        year,
        month,
        day,
        hour as u32,
        minute as u32,
        second as u32,
        microsecond as u32,
        None,
    ))
}

/// Unix timestamp (seconds) of a UTC Julian Date.
#[inline]
pub fn julian_date_to_timestamp(jd: f64) -> f64 {
    (jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY
}

/// UTC Julian Date of a Unix timestamp (seconds).
#[inline]
pub fn timestamp_to_julian_date(timestamp: f64) -> f64 {
    timestamp / SECONDS_PER_DAY + UNIX_EPOCH_JD
}

/// Whether `(year, month, day)` names a real proleptic Gregorian date.
#[inline]
pub fn is_valid_date(year: i32, month: u32, day: u32) -> bool {
    (1..=12).contains(&month) && day >= 1 && day <= days_in_month(year, month)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn civil(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> CivilDateTime {
        CivilDateTime::new(y, mo, d, h, mi, s, 0).unwrap()
    }

    #[test]
    fn julian_day_number_reference_values() {
        assert_eq!(julian_day_number(2000, 1, 1), 2_451_545);
        assert_eq!(julian_day_number(1970, 1, 1), 2_440_588);
        assert_eq!(julian_day_number(1858, 11, 17), 2_400_001);
        // Proleptic Gregorian 4714 BCE November 24 is JDN 0.
        assert_eq!(julian_day_number(-4713, 11, 24), 0);
        assert_eq!(julian_day_number(-4713, 11, 23), -1);
    }

    #[test]
    fn j2000_noon() {
        let jd = gregorian_to_julian_date(&civil(2000, 1, 1, 12, 0, 0));
        assert_eq!(jd, J2000);
        let back = julian_date_to_gregorian(J2000).unwrap();
        assert_eq!(back, civil(2000, 1, 1, 12, 0, 0));
    }

    #[test]
    fn unix_epoch_midnight() {
        let jd = gregorian_to_julian_date(&civil(1970, 1, 1, 0, 0, 0));
        assert_eq!(jd, UNIX_EPOCH_JD);
        assert_eq!(julian_date_to_timestamp(jd), 0.0);
        assert_eq!(timestamp_to_julian_date(0.0), UNIX_EPOCH_JD);
    }

    #[test]
    fn midnight_carries_into_next_day() {
        // Fraction 0.5 + half-day correction reaches 1.0 exactly.
        let back = julian_date_to_gregorian(2_451_544.5).unwrap();
        assert_eq!(back, civil(2000, 1, 1, 0, 0, 0));
    }

    #[test]
    fn january_and_february_take_the_month_overflow_branch() {
        let jan = julian_date_to_gregorian(2_457_754.5).unwrap();
        assert_eq!((jan.year(), jan.month(), jan.day()), (2017, 1, 1));
        let feb = julian_date_to_gregorian(gregorian_to_julian_date(&civil(2016, 2, 29, 6, 0, 0)))
            .unwrap();
        assert_eq!(feb, civil(2016, 2, 29, 6, 0, 0));
    }

    #[test]
    fn march_first_of_common_century_years() {
        for year in [1700, 1800, 1900, 2100] {
            for hour in [0, 6, 12, 18] {
                let dt = civil(year, 3, 1, hour, 0, 0);
                let back = julian_date_to_gregorian(gregorian_to_julian_date(&dt)).unwrap();
                assert_eq!(back, dt);
            }
        }
    }

    #[test]
    fn arbitrary_times_roundtrip_within_microseconds() {
        for year in (1..=9999).step_by(97) {
            let dt = CivilDateTime::new(year, 7, 13, 11, 17, 43, 250_000).unwrap();
            let jd = gregorian_to_julian_date(&dt);
            let back = julian_date_to_gregorian(jd).unwrap();
            assert_eq!((back.year(), back.month(), back.day()), (year, 7, 13));
            let error = (back.seconds_of_day() - dt.seconds_of_day()).abs();
            // f64 resolves ~40 µs at JD 2.4e6; the floors only ever lose time.
            assert!(error < 1e-4, "year {year}: {error} s");
        }
    }

    #[test]
    fn quarter_day_times_roundtrip_exactly() {
        for year in [1, 400, 1582, 1609, 1900, 2000, 2017, 9999] {
            for month in 1..=12 {
                for hour in [0, 6, 12, 18] {
                    let dt = civil(year, month, days_in_month(year, month), hour, 0, 0);
                    let back = julian_date_to_gregorian(gregorian_to_julian_date(&dt)).unwrap();
                    assert_eq!(back, dt);
                }
            }
        }
    }

    #[test]
    fn negative_years() {
        let dt = civil(-500, 3, 1, 12, 0, 0);
        let jd = gregorian_to_julian_date(&dt);
        assert_eq!(jd, julian_day_number(-500, 3, 1) as f64);
        assert_eq!(julian_date_to_gregorian(jd).unwrap(), dt);
    }

    #[test]
    fn offset_is_removed() {
        let utc = civil(2017, 7, 31, 13, 35, 22);
        let local = civil(2017, 7, 31, 15, 35, 22)
            .with_offset(chrono::FixedOffset::east_opt(7200).unwrap())
            .unwrap();
        assert_eq!(
            gregorian_to_julian_date(&utc),
            gregorian_to_julian_date(&local)
        );
    }

    #[test]
    fn non_finite_input_is_rejected() {
        assert_eq!(
            julian_date_to_gregorian(f64::NAN),
            Err(CalendarError::OutOfRange)
        );
        assert_eq!(
            julian_date_to_gregorian(f64::INFINITY),
            Err(CalendarError::OutOfRange)
        );
    }

    #[test]
    fn validity_check() {
        assert!(is_valid_date(2016, 2, 29));
        assert!(!is_valid_date(2017, 2, 29));
        assert!(!is_valid_date(2017, 0, 1));
        assert!(!is_valid_date(2017, 1, 0));
    }
}
