// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # TT − UTC correction layer
//!
//! Piecewise model for the offset between Terrestrial Time and the civil UTC
//! reading of a moment:
//!
//! | UTC date | Model |
//! |----------|-------|
//! | before 1770-01-01 | Morrison & Stephenson parabola in centuries from 1820 |
//! | 1770-01-01 .. 1972-01-01 | quartic in Julian centuries from J2000 |
//! | from 1972-01-01 | `32.184 s + TAI − UTC` from the leap-second table |
//!
//! The correction is applied automatically by the [`UTC`](crate::UTC) scale
//! marker: converting a `Time<UTC>` to [`TT`](crate::TT) or [`TAI`](crate::TAI)
//! adds it, and the inverse runs a three-iteration fixed-point solver.
//!
//! ## Quick Example
//! ```rust
//! use utopian::{Time, TT, UTC};
//!
//! let utc = Time::<UTC>::new(2_457_966.066_226_851_7); // 2017-07-31T13:35:22Z
//! let tt = utc.to::<TT>();
//! println!("JD(TT) = {tt}");
//! println!("TT − UTC = {}", utc.tt_minus_utc());
//! ```
//!
//! ## References
//! * Morrison & Stephenson (2004), "Historical values of the Earth's clock error"
//! * IERS Bulletin C (TAI − UTC)

use crate::instant::Time;
use crate::julian::{julian_date_to_gregorian, DAYS_PER_JULIAN_CENTURY, J2000};
use crate::leap_seconds;
use crate::scales::UTC;
use qtty::{Day, Days, Seconds};

/// `TT − TAI`, exact by definition of TT.
pub const TT_MINUS_TAI: Seconds = Seconds::new(32.184);

/// First UTC year covered by the modern quartic.
const QUARTIC_START_YEAR: i32 = 1770;

/// First UTC year covered by the leap-second table.
const LEAP_SECOND_START_YEAR: i32 = 1972;

/// **Before 1770**: parabola in centuries from 1820, keyed on the civil year.
#[inline]
fn tt_minus_utc_parabola(year: f64) -> Seconds {
    let c = (1820.0 - year) / 100.0;
    Seconds::new(-20.0 + 32.0 * c * c)
}

/// **1770 – 1971**: quartic in Julian centuries from J2000 on the UTC axis.
#[inline]
fn tt_minus_utc_quartic(jd_utc: Days) -> Seconds {
    let c = (jd_utc.value() - J2000) / DAYS_PER_JULIAN_CENTURY;
    Seconds::new(64.184 + 59.0 * c - 51.2 * c.powi(2) - 67.1 * c.powi(3) - 16.4 * c.powi(4))
}

/// **1972 onwards**: `TT − TAI + TAI − UTC`.
#[inline]
fn tt_minus_utc_atomic(year: i32, month: u32) -> Seconds {
    TT_MINUS_TAI + Seconds::new(leap_seconds::tai_minus_utc(year, month))
}

/// TT − UTC for a moment whose UTC civil `(year, month)` and UTC Julian Date
/// are both known.
#[inline]
pub fn tt_minus_utc(year: i32, month: u32, jd_utc: Days) -> Seconds {
    match year {
        y if y < QUARTIC_START_YEAR => tt_minus_utc_parabola(y as f64),
        y if y < LEAP_SECOND_START_YEAR => tt_minus_utc_quartic(jd_utc),
        y => tt_minus_utc_atomic(y, month),
    }
}

/// TT − UTC for a Julian Date on the **UTC** axis.
///
/// Years outside `i32` fall in the parabola branch with a mean-year estimate;
/// a NaN input propagates into a NaN offset.
pub(crate) fn tt_minus_utc_from_jd(jd_utc: Days) -> Seconds {
    match julian_date_to_gregorian(jd_utc.value()) {
        Ok(civil) => tt_minus_utc(civil.year(), civil.month(), jd_utc),
        Err(_) => {
            let year = 2000.0 + (jd_utc.value() - J2000) / 365.2425;
            tt_minus_utc_parabola(year.floor())
        }
    }
}

/// TAI − UTC for a Julian Date on the **UTC** axis: 10 s plus the leap
/// seconds in effect. Years outside `i32` read as before or after the table.
pub(crate) fn tai_minus_utc_from_jd(jd_utc: Days) -> Seconds {
    let offset = match julian_date_to_gregorian(jd_utc.value()) {
        Ok(civil) => leap_seconds::tai_minus_utc(civil.year(), civil.month()),
        Err(_) if jd_utc.value() > J2000 => {
            leap_seconds::tai_minus_utc(i32::MAX, leap_seconds::LAST_MONTH)
        }
        Err(_) => leap_seconds::INITIAL_TAI_MINUS_UTC,
    };
    Seconds::new(offset)
}

/// UTC Julian Date of a TAI Julian Date, by a three-step fixed point on
/// the piecewise-constant TAI − UTC.
pub(crate) fn utc_from_tai(jd_tai: Days) -> Days {
    let mut utc = jd_tai;
    for _ in 0..3 {
        utc = jd_tai - tai_minus_utc_from_jd(utc).to::<Day>();
    }
    utc
}

// ── Time<UTC> convenience method ──────────────────────────────────────────

impl Time<UTC> {
    /// Returns **TT − UTC** in seconds at this UTC epoch.
    ///
    /// The same correction is applied automatically when converting to
    /// [`TT`](crate::TT) with `.to::<TT>()`.
    #[inline]
    pub fn tt_minus_utc(&self) -> Seconds {
        tt_minus_utc_from_jd(self.quantity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scales::TT;

    #[test]
    fn parabola_before_1770() {
        // 1609: c = 2.11, 32·c² − 20
        let dt = tt_minus_utc(1609, 3, Days::new(2_308_806.3));
        assert!((dt - Seconds::new(122.4672)).abs() < Seconds::new(1e-9));
        let dt = tt_minus_utc(1769, 12, Days::new(2_367_539.0));
        assert!((dt - Seconds::new(-11.6768)).abs() < Seconds::new(1e-9));
    }

    #[test]
    fn quartic_between_1770_and_1972() {
        let dt = tt_minus_utc(1770, 1, Days::new(2_367_539.5));
        assert!((dt - Seconds::new(15.103_981_820_432_24)).abs() < Seconds::new(1e-6));
        let dt = tt_minus_utc(1971, 12, Days::new(2_441_317.0));
        assert!((dt - Seconds::new(45.020_087_944_514_88)).abs() < Seconds::new(1e-6));
    }

    #[test]
    fn atomic_from_1972() {
        assert_eq!(tt_minus_utc(1972, 1, Days::new(2_441_317.5)), Seconds::new(42.184));
        assert_eq!(tt_minus_utc(2017, 7, Days::new(2_457_966.0)), Seconds::new(69.184));
    }

    #[test]
    fn from_jd_decodes_the_civil_month() {
        // 2017-01-01T00:00Z picks up the 2016-12 leap second.
        let dt = tt_minus_utc_from_jd(Days::new(2_457_754.5));
        assert_eq!(dt, Seconds::new(69.184));
        // One hour earlier it is still December 2016.
        let dt = tt_minus_utc_from_jd(Days::new(2_457_754.5 - 1.0 / 24.0));
        assert_eq!(dt, Seconds::new(68.184));
    }

    #[test]
    fn from_jd_is_total() {
        assert!(tt_minus_utc_from_jd(Days::new(f64::NAN)).value().is_nan());
        let far = tt_minus_utc_from_jd(Days::new(-1e15));
        assert!(far.value().is_finite() && far > Seconds::new(0.0));
    }

    #[test]
    fn tai_minus_utc_from_jd_follows_the_table() {
        assert_eq!(tai_minus_utc_from_jd(Days::new(2_441_317.5)), Seconds::new(10.0));
        assert_eq!(tai_minus_utc_from_jd(Days::new(2_457_966.0)), Seconds::new(37.0));
        assert_eq!(tai_minus_utc_from_jd(Days::new(1e15)), Seconds::new(37.0));
        assert_eq!(tai_minus_utc_from_jd(Days::new(-1e15)), Seconds::new(10.0));
    }

    #[test]
    fn utc_from_tai_inverts_the_table() {
        let utc = Days::new(2_457_966.0);
        let tai = utc + Seconds::new(37.0).to::<Day>();
        assert!((utc_from_tai(tai) - utc).abs() < Days::new(1e-9));
        let utc = Days::new(2_415_020.5);
        let tai = utc + Seconds::new(10.0).to::<Day>();
        assert!((utc_from_tai(tai) - utc).abs() < Days::new(1e-9));
    }

    #[test]
    fn utc_scale_applies_correction() {
        let utc = Time::<UTC>::new(2_457_966.066_226_851_7);
        let tt = utc.to::<TT>();
        let offset = tt.quantity() - utc.quantity();
        assert!((offset - utc.tt_minus_utc().to::<Day>()).abs() < Days::new(1e-9));
    }
}
