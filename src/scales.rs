// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-scale marker types.
//!
//! Each zero-sized type identifies an Earth time scale and encodes how a
//! Julian Date read on that scale relates to the canonical **Julian Date in
//! TT** (Terrestrial Time).
//!
//! | Marker | Description | Offset to TT |
//! |--------|-------------|--------------|
//! | [`UTC`] | Coordinated Universal Time | TT − UTC, see [`delta_t`](crate::delta_t) |
//! | [`TAI`] | International Atomic Time | 32.184 s from 1972, ΔT − 10 s before |
//! | [`TT`]  | Terrestrial Time | 0 |
//!
//! [`Scale`] is the runtime counterpart, for callers that pick the scale from
//! user input.

use crate::delta_t::{tai_minus_utc_from_jd, tt_minus_utc_from_jd, utc_from_tai};
use crate::error::CalendarError;
use crate::instant::TimeScale;
use qtty::{Day, Days};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Terrestrial Time, the uniform axis every other scale is measured against.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct TT;

impl TimeScale for TT {
    const LABEL: &'static str = "TT";

    #[inline(always)]
    fn to_jd_tt(value: Days) -> Days {
        value
    }

    #[inline(always)]
    fn from_jd_tt(jd_tt: Days) -> Days {
        jd_tt
    }
}

/// International Atomic Time.
///
/// A TAI reading is `UTC + 10 s + leap seconds`, so the conversion goes
/// through UTC. From 1972 this is exactly `TT = TAI + 32.184 s`; before
/// 1972 TAI − UTC stays at 10 s while TT − UTC follows the ΔT model, and
/// TT − TAI drifts with it.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct TAI;

impl TimeScale for TAI {
    const LABEL: &'static str = "TAI";

    #[inline]
    fn to_jd_tt(value: Days) -> Days {
        UTC::to_jd_tt(utc_from_tai(value))
    }

    #[inline]
    fn from_jd_tt(jd_tt: Days) -> Days {
        let utc = UTC::from_jd_tt(jd_tt);
        utc + tai_minus_utc_from_jd(utc).to::<Day>()
    }
}

/// Coordinated Universal Time, the civil scale.
///
/// The conversion to JD(TT) adds the date-dependent TT − UTC offset. The
/// inverse solves `utc + Δ(utc) = tt` with a three-iteration fixed point;
/// Δ is piecewise flat or slowly varying, so convergence is immediate
/// everywhere except within a few seconds of an inserted leap second.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct UTC;

impl TimeScale for UTC {
    const LABEL: &'static str = "UTC";

    #[inline]
    fn to_jd_tt(utc_value: Days) -> Days {
        utc_value + tt_minus_utc_from_jd(utc_value).to::<Day>()
    }

    #[inline]
    fn from_jd_tt(jd_tt: Days) -> Days {
        let mut utc = jd_tt;
        for _ in 0..3 {
            utc = jd_tt - tt_minus_utc_from_jd(utc).to::<Day>();
        }
        utc
    }
}

// ---------------------------------------------------------------------------
// Cross-scale From/Into  (generated by macro)
// ---------------------------------------------------------------------------

/// Generate pairwise `From<Time<A>> for Time<B>` implementations.
macro_rules! impl_time_conversions {
    ($single:ty) => {};

    ($first:ty, $($rest:ty),+ $(,)?) => {
        $(
            impl From<crate::instant::Time<$first>> for crate::instant::Time<$rest> {
                #[inline]
                fn from(t: crate::instant::Time<$first>) -> Self {
                    t.to::<$rest>()
                }
            }

            impl From<crate::instant::Time<$rest>> for crate::instant::Time<$first> {
                #[inline]
                fn from(t: crate::instant::Time<$rest>) -> Self {
                    t.to::<$first>()
                }
            }
        )+

        impl_time_conversions!($($rest),+);
    };
}

impl_time_conversions!(UTC, TAI, TT);

// ---------------------------------------------------------------------------
// Runtime scale selector
// ---------------------------------------------------------------------------

/// Time scale chosen at runtime.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Scale {
    #[default]
    Utc,
    Tai,
    Tt,
}

impl Scale {
    /// Canonical upper-case name.
    pub const fn label(self) -> &'static str {
        match self {
            Scale::Utc => UTC::LABEL,
            Scale::Tai => TAI::LABEL,
            Scale::Tt => TT::LABEL,
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Case-insensitive; anything but `UTC`, `TAI` or `TT` is an
/// [`InvalidTimeScale`](CalendarError::InvalidTimeScale).
impl FromStr for Scale {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UTC" => Ok(Scale::Utc),
            "TAI" => Ok(Scale::Tai),
            "TT" => Ok(Scale::Tt),
            _ => Err(CalendarError::InvalidTimeScale(s.to_string())),
        }
    }
}
