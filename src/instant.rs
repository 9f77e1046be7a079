// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Generic time–scale parameterised Julian Date.
//!
//! [`Time<S>`] stores a Julian Date as a [`Days`] quantity whose *meaning*
//! is fixed by the compile-time marker `S: TimeScale`. Arithmetic, scale
//! conversion, serialisation and display are implemented once, generically.
//!
//! Methods that only make sense on one axis (e.g.
//! [`Time::<TT>::mars_sol_date()`](Time::mars_sol_date)) live in inherent
//! `impl` blocks gated on the concrete marker.

use chrono::{DateTime, Utc};
use qtty::*;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::julian::UNIX_EPOCH_JD;
use crate::scales::UTC;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ═══════════════════════════════════════════════════════════════════════════
// TimeScale trait
// ═══════════════════════════════════════════════════════════════════════════

/// Marker trait for time scales.
///
/// A **time scale** defines:
///
/// 1. A human-readable **label** (`"UTC"`, `"TAI"`, `"TT"`).
/// 2. A pair of conversion functions between a Julian Date read on this
///    scale and the **Julian Date in TT**, the canonical axis.
pub trait TimeScale: Copy + Clone + std::fmt::Debug + PartialEq + PartialOrd + 'static {
    /// Display label used by [`Time`] formatting.
    const LABEL: &'static str;

    /// Convert a Julian Date on this scale to JD(TT).
    fn to_jd_tt(value: Days) -> Days;

    /// Convert JD(TT) back to a Julian Date on this scale.
    fn from_jd_tt(jd_tt: Days) -> Days;
}

// ═══════════════════════════════════════════════════════════════════════════
// Time<S> — the generic instant
// ═══════════════════════════════════════════════════════════════════════════

/// A Julian Date on time scale `S`.
///
/// `PhantomData` is zero-sized, so `Time<S>` is layout-identical to `Days`
/// (a single `f64`).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Time<S: TimeScale> {
    quantity: Days,
    _scale: PhantomData<S>,
}

impl<S: TimeScale> Time<S> {
    // ── constructors ──────────────────────────────────────────────────

    /// Create from a raw Julian Date.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            quantity: Days::new(value),
            _scale: PhantomData,
        }
    }

    /// Create from a [`Days`] quantity.
    #[inline]
    pub const fn from_days(days: Days) -> Self {
        Self {
            quantity: days,
            _scale: PhantomData,
        }
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// The Julian Date as a quantity in days.
    #[inline]
    pub const fn quantity(&self) -> Days {
        self.quantity
    }

    /// The Julian Date as a scalar.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.quantity.value()
    }

    /// The same instant as a Julian Date in TT.
    #[inline]
    pub fn julian_day_tt(&self) -> Days {
        S::to_jd_tt(self.quantity)
    }

    /// Build an instant from a Julian Date in TT.
    #[inline]
    pub fn from_julian_day_tt(jd_tt: Days) -> Self {
        Self::from_days(S::from_jd_tt(jd_tt))
    }

    // ── cross-scale conversion (mirroring qtty's .to::<T>()) ─────────

    /// Convert this instant to another time scale.
    ///
    /// ```text
    /// self → JD(TT) → target
    /// ```
    #[inline]
    pub fn to<T: TimeScale>(&self) -> Time<T> {
        Time::<T>::from_julian_day_tt(S::to_jd_tt(self.quantity))
    }

    // ── chrono helpers ────────────────────────────────────────────────

    /// Convert to a `chrono::DateTime<Utc>`, rounded to the microsecond.
    ///
    /// Returns `None` outside chrono's representable range.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        let jd_utc = self.to::<UTC>().quantity();
        let seconds_since_epoch = (jd_utc - Days::new(UNIX_EPOCH_JD)).to::<Second>().value();
        if !seconds_since_epoch.is_finite() {
            return None;
        }
        let micros = (seconds_since_epoch * 1e6).round();
        if micros.abs() >= i64::MAX as f64 {
            return None;
        }
        DateTime::<Utc>::from_timestamp_micros(micros as i64)
    }

    /// Build an instant from a `chrono::DateTime<Utc>`.
    ///
    /// The reading is taken as UTC and the TT − UTC correction of its date
    /// is applied on the way to `S`.
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        let seconds_since_epoch = Seconds::new(datetime.timestamp() as f64);
        let fraction = Seconds::new(datetime.timestamp_subsec_micros() as f64 / 1e6);
        let jd_utc = Days::new(UNIX_EPOCH_JD) + (seconds_since_epoch + fraction).to::<Day>();
        Time::<UTC>::from_days(jd_utc).to::<S>()
    }

    // ── min / max ─────────────────────────────────────────────────────

    /// Element-wise minimum.
    #[inline]
    pub const fn min(self, other: Self) -> Self {
        Self::from_days(self.quantity.min_const(other.quantity))
    }

    /// Element-wise maximum.
    #[inline]
    pub const fn max(self, other: Self) -> Self {
        Self::from_days(self.quantity.max_const(other.quantity))
    }
}

impl Time<UTC> {
    /// Unix timestamp (seconds) of this UTC Julian Date.
    #[inline]
    pub fn timestamp(&self) -> f64 {
        crate::julian::julian_date_to_timestamp(self.value())
    }

    /// UTC Julian Date of a Unix timestamp (seconds).
    #[inline]
    pub fn from_timestamp(timestamp: f64) -> Self {
        Self::new(crate::julian::timestamp_to_julian_date(timestamp))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Generic trait implementations
// ═══════════════════════════════════════════════════════════════════════════

// ── Display ───────────────────────────────────────────────────────────────

impl<S: TimeScale> std::fmt::Display for Time<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JD({}) {}", S::LABEL, self.value())
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl<S: TimeScale> Serialize for Time<S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de, S: TimeScale> Deserialize<'de> for Time<S> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::new(v))
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl<S: TimeScale> Add<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity + rhs)
    }
}

impl<S: TimeScale> AddAssign<Days> for Time<S> {
    #[inline]
    fn add_assign(&mut self, rhs: Days) {
        self.quantity += rhs;
    }
}

impl<S: TimeScale> Sub<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity - rhs)
    }
}

impl<S: TimeScale> SubAssign<Days> for Time<S> {
    #[inline]
    fn sub_assign(&mut self, rhs: Days) {
        self.quantity -= rhs;
    }
}

impl<S: TimeScale> Sub for Time<S> {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.quantity - rhs.quantity
    }
}

// ── From/Into Days ────────────────────────────────────────────────────────

impl<S: TimeScale> From<Days> for Time<S> {
    #[inline]
    fn from(days: Days) -> Self {
        Self::from_days(days)
    }
}

impl<S: TimeScale> From<Time<S>> for Days {
    #[inline]
    fn from(time: Time<S>) -> Self {
        time.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scales::{TAI, TT};

    #[test]
    fn creation_and_accessors() {
        let jd = Time::<UTC>::new(2_451_545.0);
        assert_eq!(jd.quantity(), Days::new(2_451_545.0));
        assert_eq!(jd.value(), 2_451_545.0);
    }

    #[test]
    fn utc_chrono_roundtrip() {
        let datetime = DateTime::from_timestamp(1_501_508_122, 0).unwrap();
        let jd = Time::<UTC>::from_utc(datetime);
        assert!((jd.value() - 2_457_966.066_226_851_7).abs() < 1e-9);
        let back = jd.to_utc().expect("to_utc");
        let delta_us = back.timestamp_micros() - datetime.timestamp_micros();
        assert!(delta_us.abs() <= 100, "roundtrip error: {delta_us} µs");
    }

    #[test]
    fn from_utc_on_tt_applies_correction() {
        let datetime = DateTime::from_timestamp(1_501_508_122, 0).unwrap();
        let tt = Time::<TT>::from_utc(datetime);
        let utc = Time::<UTC>::from_utc(datetime);
        let offset = (tt.quantity() - utc.quantity()).to::<Second>();
        assert!((offset - Seconds::new(69.184)).abs() < Seconds::new(1e-4));
    }

    #[test]
    fn to_utc_out_of_range_is_none() {
        assert!(Time::<UTC>::new(f64::NAN).to_utc().is_none());
        assert!(Time::<UTC>::new(1e15).to_utc().is_none());
    }

    #[test]
    fn timestamp_helpers() {
        assert_eq!(Time::<UTC>::from_timestamp(0.0).value(), UNIX_EPOCH_JD);
        assert_eq!(Time::<UTC>::new(UNIX_EPOCH_JD + 1.0).timestamp(), 86_400.0);
    }

    #[test]
    fn add_sub_days() {
        let mut jd = Time::<TAI>::new(2_451_545.0);
        jd += Days::new(1.0);
        assert_eq!(jd.quantity(), Days::new(2_451_546.0));
        jd -= Days::new(0.5);
        assert_eq!(jd.quantity(), Days::new(2_451_545.5));
        assert_eq!((jd + Days::new(1.5)).quantity(), Days::new(2_451_547.0));
        assert_eq!((jd - Days::new(1.5)).quantity(), Days::new(2_451_544.0));
        assert_eq!(jd - Time::<TAI>::new(2_451_545.0), Days::new(0.5));
    }

    #[test]
    fn min_max_and_ordering() {
        let earlier = Time::<TT>::new(10.0);
        let later = earlier + Days::new(1.0);
        assert!(earlier < later);
        assert_eq!(earlier.min(later), earlier);
        assert_eq!(earlier.max(later), later);
    }

    #[test]
    fn into_days() {
        let jd = Time::<UTC>::new(2_451_547.5);
        let days: Days = jd.into();
        assert_eq!(days, Days::new(2_451_547.5));
        assert_eq!(Time::<UTC>::from(days), jd);
    }

    #[test]
    fn display_names_the_scale() {
        let jd = Time::<TT>::new(2_451_545.0);
        assert_eq!(jd.to_string(), "JD(TT) 2451545");
    }
}
