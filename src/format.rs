// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Text rendering of Mars dates and of time differences.
//!
//! ```rust
//! use utopian::format::{format_date_time, FormatOptions};
//! use utopian::{MarsDateTime, TimeZone};
//!
//! let dt = MarsDateTime::from_timestamp(1_501_508_122.0, TimeZone::MTC);
//! assert_eq!(format_date_time(&dt, &FormatOptions::default()), "M217/04/01:886.888+000");
//! ```

use crate::mars::MarsDateTime;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Display switches for the Mars formatters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormatOptions {
    /// Lead with `M` (dates) or `M:` (times).
    pub prefix: bool,
    /// Append the zone offset to date-times.
    pub time_zone: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            prefix: true,
            time_zone: true,
        }
    }
}

/// `M217/04/01`, or `217/04/01` without the prefix.
pub fn format_date(dt: &MarsDateTime, prefix: bool) -> String {
    format!(
        "{}{}/{:02}/{:02}",
        if prefix { "M" } else { "" },
        dt.mir(),
        dt.month(),
        dt.sol()
    )
}

/// `M:886.888`, or `886.888` without the prefix. Always three integer
/// digits; halves round up.
pub fn format_time(dt: &MarsDateTime, prefix: bool) -> String {
    let thousandths = (dt.millisols() * 1000.0 + 0.5).floor() as i64;
    format!(
        "{}{:03}.{:03}",
        if prefix { "M:" } else { "" },
        thousandths / 1000,
        thousandths % 1000
    )
}

/// Zone offset in millisols: `+000`, `+300`, `-500`.
pub fn format_time_zone(dt: &MarsDateTime) -> String {
    format!("{:+04}", i32::from(dt.time_zone().slot()) * 100)
}

/// `M217/04/01:886.888+000` with the parts toggled by `options`.
pub fn format_date_time(dt: &MarsDateTime, options: &FormatOptions) -> String {
    let mut text = format_date(dt, options.prefix);
    text.push(':');
    text.push_str(&format_time(dt, false));
    if options.time_zone {
        text.push_str(&format_time_zone(dt));
    }
    text
}

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3_600.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const SECONDS_PER_WEEK: f64 = 604_800.0;
/// Mean Gregorian month.
const SECONDS_PER_MONTH: f64 = 2_629_746.0;
/// Mean Gregorian year.
const SECONDS_PER_YEAR: f64 = 31_556_952.0;

fn count(n: i64, one: &str, unit: &str) -> String {
    if n == 1 {
        one.to_string()
    } else {
        format!("{n} {unit}")
    }
}

/// Rough English description of a time difference: `"a second"`,
/// `"35 seconds"`, `"5 minutes"`, `"an hour"`, `"3 weeks"`, `"2 years"`.
///
/// The sign is ignored. Round counts of a larger unit are left to that
/// unit, so 24 hours reads as `"a day"` and 14 days as `"2 weeks"`.
pub fn describe_interval(seconds: f64) -> String {
    let seconds = seconds.abs().round();
    let units = |per: f64| (seconds / per).round() as i64;

    if seconds <= 20.0 {
        return count(seconds as i64, "a second", "seconds");
    }
    if seconds < 58.0 {
        return format!("{} seconds", units(5.0) * 5);
    }

    let minutes = units(SECONDS_PER_MINUTE);
    if minutes <= 20 {
        return count(minutes, "a minute", "minutes");
    }
    if minutes < 58 {
        return format!("{} minutes", (minutes as f64 / 5.0).round() as i64 * 5);
    }

    let hours = units(SECONDS_PER_HOUR);
    if hours < 48 && hours % 24 != 0 {
        return count(hours, "an hour", "hours");
    }

    let days = units(SECONDS_PER_DAY);
    if days < 28 && days % 7 != 0 {
        return count(days, "a day", "days");
    }

    let weeks = units(SECONDS_PER_WEEK);
    if weeks <= 12 {
        return count(weeks, "a week", "weeks");
    }

    let months = units(SECONDS_PER_MONTH);
    if months < 24 && months % 12 != 0 {
        return count(months, "a month", "months");
    }

    count(units(SECONDS_PER_YEAR), "a year", "years")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mars::TimeZone;

    fn date(mir: i64, month: u32, sol: u32, millisols: f64, slot: i64) -> MarsDateTime {
        MarsDateTime::new(mir, month, sol, millisols, TimeZone::new(slot).unwrap()).unwrap()
    }

    #[test]
    fn dates() {
        let dt = date(217, 4, 1, 886.888, 0);
        assert_eq!(format_date(&dt, true), "M217/04/01");
        assert_eq!(format_date(&dt, false), "217/04/01");
        assert_eq!(format_date(&date(-1, 24, 28, 0.0, 0), true), "M-1/24/28");
    }

    #[test]
    fn times() {
        assert_eq!(format_time(&date(217, 4, 1, 886.888, 0), true), "M:886.888");
        assert_eq!(format_time(&date(217, 4, 1, 886.888, 0), false), "886.888");
        assert_eq!(format_time(&date(0, 1, 1, 0.0, 0), false), "000.000");
        assert_eq!(format_time(&date(0, 1, 1, 7.5, 0), false), "007.500");
        assert_eq!(format_time(&date(0, 1, 1, 999.999, 0), false), "999.999");
    }

    #[test]
    fn zones() {
        assert_eq!(format_time_zone(&date(0, 1, 1, 0.0, 0)), "+000");
        assert_eq!(format_time_zone(&date(0, 1, 1, 0.0, 3)), "+300");
        assert_eq!(format_time_zone(&date(0, 1, 1, 0.0, -5)), "-500");
    }

    #[test]
    fn date_times_honour_options() {
        let dt = date(217, 4, 1, 886.888, 0);
        assert_eq!(
            format_date_time(&dt, &FormatOptions::default()),
            "M217/04/01:886.888+000"
        );
        let bare = FormatOptions {
            prefix: false,
            time_zone: false,
        };
        assert_eq!(format_date_time(&dt, &bare), "217/04/01:886.888");
        assert_eq!(
            date(217, 4, 2, 186.887, 3).to_string(),
            "M217/04/02:186.887+300"
        );
    }

    #[test]
    fn intervals() {
        assert_eq!(describe_interval(0.0), "0 seconds");
        assert_eq!(describe_interval(1.0), "a second");
        assert_eq!(describe_interval(-20.0), "20 seconds");
        assert_eq!(describe_interval(33.0), "35 seconds");
        assert_eq!(describe_interval(58.0), "a minute");
        assert_eq!(describe_interval(20.0 * 60.0), "20 minutes");
        assert_eq!(describe_interval(33.0 * 60.0), "35 minutes");
        assert_eq!(describe_interval(3_600.0), "an hour");
        assert_eq!(describe_interval(5.0 * 3_600.0), "5 hours");
        assert_eq!(describe_interval(86_400.0), "a day");
        assert_eq!(describe_interval(3.0 * 86_400.0), "3 days");
        assert_eq!(describe_interval(14.0 * 86_400.0), "2 weeks");
        assert_eq!(describe_interval(12.0 * 604_800.0), "12 weeks");
        assert_eq!(describe_interval(5.0 * SECONDS_PER_MONTH), "5 months");
        assert_eq!(describe_interval(SECONDS_PER_YEAR), "a year");
        assert_eq!(describe_interval(3.0 * SECONDS_PER_YEAR), "3 years");
    }

    #[test]
    fn options_default_on() {
        let options = FormatOptions::default();
        assert!(options.prefix && options.time_zone);
    }
}
