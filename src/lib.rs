// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Earth and Mars calendrical conversions
//!
//! This crate converts moments between the Earth civil calendar, Julian
//! Dates on the UTC, TAI and TT scales, and the Utopian calendar of Mars.
//!
//! # Core types
//!
//! - [`EarthTime`]: a civil moment at a fixed UTC offset, with field
//!   getters, setters and calendar arithmetic.
//! - [`Time<S>`]: a Julian Date tagged with a [`TimeScale`] marker.
//! - [`MarsTime`]: the continuous Mars instant, in sols since the epoch.
//! - [`MarsDateTime`]: mir, month, sol and millisols in a Mars [`TimeZone`].
//!
//! # Time scales
//!
//! | Marker | Runtime | Scale |
//! |--------|---------|-------|
//! | [`UTC`] | [`Scale::Utc`] | Coordinated Universal Time (civil) |
//! | [`TAI`] | [`Scale::Tai`] | International Atomic Time |
//! | [`TT`] | [`Scale::Tt`] | Terrestrial Time |
//!
//! Converting a `Time<UTC>` applies TT − UTC automatically: a parabola
//! before 1770, a quartic until 1972, and `32.184 s + TAI − UTC` from the
//! leap-second table afterwards.
//!
//! # The Utopian calendar
//!
//! A mir (Mars year) has 24 months in four quarters of six. Months hold
//! 28 sols, except the last month of each quarter, which holds 27; the
//! last month of a long mir gains the extra 28th sol. Long mirs are odd
//! mirs, plus every tenth mir unless it is a hundredth, plus every
//! thousandth. Mir 0 began at 1609-03-12T19:19:06 UTC.
//!
//! ```rust
//! use utopian::{EarthTime, MarsDateTime, TimeZone};
//!
//! let earth = EarthTime::from_timestamp(1_501_508_122.0).unwrap();
//! let mars = MarsDateTime::from_timestamp(earth.timestamp(), TimeZone::MTC);
//! assert_eq!(mars.to_string(), "M217/04/01:886.888+000");
//! assert_eq!(mars.month_name().name, "Lepus");
//! ```

pub mod cache;
pub mod calendar;
mod civil;
mod delta_t;
mod earth;
mod error;
pub mod format;
pub(crate) mod instant;
pub mod julian;
pub mod leap_seconds;
mod mars;
pub(crate) mod scales;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use civil::{days_in_month, is_leap_year, CivilDateTime};
pub use delta_t::{tt_minus_utc, TT_MINUS_TAI};
pub use earth::EarthTime;
pub use error::{CalendarError, CalendarResult, CivilField, MarsField};
pub use format::{describe_interval, FormatOptions};
pub use instant::{Time, TimeScale};
pub use julian::{
    gregorian_to_julian_date, julian_date_to_gregorian, julian_date_to_timestamp,
    timestamp_to_julian_date,
};
pub use mars::{
    epoch_timestamp, MarsDateTime, MarsTime, TimeZone, DAYS_PER_SOL, EPOCH, SECONDS_PER_MILLISOL,
    SECONDS_PER_SOL,
};
pub use scales::{Scale, TAI, TT, UTC};

/// Julian Date on the civil UTC axis.
///
/// This is a type alias for [`Time<UTC>`].
pub type JulianDate = Time<UTC>;
