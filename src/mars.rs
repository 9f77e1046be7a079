// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Mars time and the Utopian calendar date
//!
//! [`MarsTime`] is the canonical Mars instant: a continuous count of sols
//! elapsed since the calendar epoch, 1609-03-12T19:19:06 UTC, which is
//! `M0/01/01 000.000` in zone MTC. [`MarsDateTime`] is the broken-down
//! calendar view of such an instant in one of the eleven decisol-wide
//! [`TimeZone`]s.
//!
//! ```text
//! sols = (unix_seconds − epoch_seconds) / 88 775.244 147
//! ```
//!
//! ## Decomposition
//!
//! A sol count is split into kilomirs (exactly 668 591 sols each), then
//! mirs by dividing by the mean mir of 668.591 sols. That estimate can be
//! off by one in either direction and is corrected with a single step, so
//! the whole decomposition is O(1) for any mir.
//!
//! ## Mars Sol Date
//!
//! The MSD of Allison & McEwen (2000) is an independent running sol count
//! used by Mars24:
//!
//! ```text
//! MSD = (JD(TT) − 2 405 522.002 877 9) / 1.027 491 251 7
//! MTC = frac(MSD)
//! ```

use std::fmt;
use std::sync::LazyLock;

use qtty::{Day, Days};

use crate::cache::{self, SolDate};
use crate::calendar::{
    self, sols_before_mir, sols_in_mir, sols_in_month, MonthName,
    SOLS_PER_CALENDAR_MIR, SOLS_PER_KILOMIR, SOLS_PER_LONG_MONTH, SOLS_PER_LONG_WEEK,
    SOLS_PER_SHORT_QUARTER,
};
use crate::civil::CivilDateTime;
use crate::delta_t::{tai_minus_utc_from_jd, tt_minus_utc_from_jd};
use crate::earth::EarthTime;
use crate::error::{CalendarError, CalendarResult, MarsField};
use crate::instant::{Time, TimeScale};
use crate::julian::{
    julian_date_to_timestamp, julian_day_number, timestamp_to_julian_date, SECONDS_PER_DAY,
};
use crate::scales::{Scale, TT, UTC};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// SI seconds in a mean Mars solar day.
pub const SECONDS_PER_SOL: f64 = 88_775.244_147;
/// Terran days in a sol.
pub const DAYS_PER_SOL: f64 = 1.027_491_251_7;
/// SI seconds in a millisol.
pub const SECONDS_PER_MILLISOL: f64 = SECONDS_PER_SOL / 1000.0;
/// JD(TT) at MSD 0 (1873-12-29).
pub const MSD_EPOCH_JD_TT: f64 = 2_405_522.002_877_9;
/// JD at which the prime-meridian mean solar time of Allison (1997) is zero.
pub const MEAN_SOLAR_TIME_EPOCH_JD: f64 = 2_440_692.0;

/// Civil moment of `M0/01/01 000.000` MTC.
pub const EPOCH: CivilDateTime = CivilDateTime::from_parts(1609, 3, 12, 19, 19, 6, 0, None);

/// Julian Day Number of 1970-01-01.
const UNIX_EPOCH_JDN: i64 = 2_440_588;

static EPOCH_TIMESTAMP: LazyLock<f64> = LazyLock::new(|| {
    let days = julian_day_number(EPOCH.year() as i64, EPOCH.month(), EPOCH.day()) - UNIX_EPOCH_JDN;
    (days as f64) * SECONDS_PER_DAY + EPOCH.seconds_of_day()
});

/// Unix timestamp of the calendar epoch, computed once.
#[inline]
pub fn epoch_timestamp() -> f64 {
    *EPOCH_TIMESTAMP
}

// ═══════════════════════════════════════════════════════════════════════════
// TimeZone
// ═══════════════════════════════════════════════════════════════════════════

/// A Mars time zone: one decisol of longitude, slot −5..=5 east of MTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i64", into = "i64"))]
pub struct TimeZone(i8);

impl TimeZone {
    /// Coordinated Mars Time, slot 0.
    pub const MTC: TimeZone = TimeZone(0);
    /// Westernmost slot.
    pub const MIN_SLOT: i64 = -5;
    /// Easternmost slot.
    pub const MAX_SLOT: i64 = 5;

    /// Zone for `slot`, rejecting anything outside −5..=5.
    pub fn new(slot: i64) -> CalendarResult<Self> {
        if (Self::MIN_SLOT..=Self::MAX_SLOT).contains(&slot) {
            Ok(TimeZone(slot as i8))
        } else {
            Err(CalendarError::InvalidTimeZoneSlot(slot))
        }
    }

    /// Slot number, −5..=5.
    #[inline]
    pub const fn slot(self) -> i8 {
        self.0
    }

    /// Offset from MTC in sols.
    #[inline]
    pub fn offset_sols(self) -> f64 {
        self.0 as f64 / 10.0
    }
}

impl TryFrom<i64> for TimeZone {
    type Error = CalendarError;

    fn try_from(slot: i64) -> Result<Self, Self::Error> {
        Self::new(slot)
    }
}

impl From<TimeZone> for i64 {
    fn from(zone: TimeZone) -> Self {
        zone.0 as i64
    }
}

/// `MTC`, `MTC+3`, `MTC-2`.
impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => f.write_str("MTC"),
            slot => write!(f, "MTC{slot:+}"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// MarsTime
// ═══════════════════════════════════════════════════════════════════════════

/// Sols elapsed since the Utopian epoch.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MarsTime {
    sols: f64,
}

impl MarsTime {
    /// The epoch itself.
    pub const EPOCH: MarsTime = MarsTime { sols: 0.0 };

    /// From a raw sol count.
    #[inline]
    pub const fn from_sols(sols: f64) -> Self {
        Self { sols }
    }

    /// Sols since the epoch.
    #[inline]
    pub const fn sols(&self) -> f64 {
        self.sols
    }

    /// The current moment.
    pub fn now() -> Self {
        Self::from_timestamp(EarthTime::now().timestamp())
    }

    /// Instant of a Unix timestamp (seconds).
    #[inline]
    pub fn from_timestamp(timestamp: f64) -> Self {
        Self::from_sols((timestamp - epoch_timestamp()) / SECONDS_PER_SOL)
    }

    /// Unix timestamp (seconds) of this instant.
    #[inline]
    pub fn timestamp(&self) -> f64 {
        epoch_timestamp() + self.sols * SECONDS_PER_SOL
    }

    /// Instant of an Earth moment.
    #[inline]
    pub fn from_earth_time(earth: &EarthTime) -> Self {
        Self::from_timestamp(earth.timestamp())
    }

    /// The Earth moment, in UTC, to the microsecond.
    pub fn earth_time(&self) -> CalendarResult<EarthTime> {
        EarthTime::from_timestamp(self.timestamp())
    }

    /// Instant of a UTC Julian Date.
    #[inline]
    pub fn from_julian_date(jd_utc: f64) -> Self {
        Self::from_timestamp(julian_date_to_timestamp(jd_utc))
    }

    /// Julian Date of this instant read on `scale`.
    pub fn julian_date(&self, scale: Scale) -> f64 {
        let jd_utc = timestamp_to_julian_date(self.timestamp());
        let correction = match scale {
            Scale::Utc => return jd_utc,
            Scale::Tai => tai_minus_utc_from_jd(Days::new(jd_utc)),
            Scale::Tt => tt_minus_utc_from_jd(Days::new(jd_utc)),
        };
        jd_utc + correction.to::<Day>().value()
    }

    /// This instant as a typed Julian Date.
    #[inline]
    pub fn to_time<S: TimeScale>(&self) -> Time<S> {
        Time::<UTC>::new(timestamp_to_julian_date(self.timestamp())).to::<S>()
    }

    /// Mars Sol Date.
    pub fn mars_sol_date(&self) -> f64 {
        Time::<TT>::new(self.julian_date(Scale::Tt)).mars_sol_date()
    }

    /// Coordinated Mars Time as a fraction of a sol (0 = midnight, 0.5 = noon).
    pub fn mtc(&self) -> f64 {
        Time::<TT>::new(self.julian_date(Scale::Tt)).coordinated_mars_time()
    }

    /// Mean solar time at the prime meridian, in millisols.
    pub fn mean_solar_time(&self) -> f64 {
        Time::<TT>::new(self.julian_date(Scale::Tt)).mean_solar_time()
    }

    /// Approximate moment of the northern vernal equinox of `mir`, from a
    /// linear fit to tabulated equinoxes.
    pub fn northern_vernal_equinox(mir: i64) -> Self {
        Self::from_julian_date(686.971_032_958 * mir as f64 + 2_308_806.296_06)
    }

    /// Calendar view of this instant in `zone`.
    ///
    /// The count is rounded to the nearest microsol, then shifted by the
    /// zone offset; millisols keep whole microsols, truncated.
    pub fn to_date_time(&self, zone: TimeZone) -> MarsDateTime {
        let sols = (self.sols * 1e6).round() / 1e6 + zone.offset_sols();
        let whole = sols.floor();
        let (mir, month, sol) = cache::sol_date(whole as i64, decompose_sols);
        let millisols = ((sols - whole) * 1e6).floor() / 1e3;
        MarsDateTime {
            mir,
            month,
            sol,
            millisols,
            time_zone: zone,
        }
    }

    /// Instant named by a calendar date.
    pub fn from_date_time(dt: &MarsDateTime) -> Self {
        let sols = sols_before_mir(dt.mir) as f64
            + (dt.sol_of_mir() - 1) as f64
            + dt.millisols / 1000.0
            - dt.time_zone.offset_sols();
        Self::from_sols(sols)
    }
}

impl fmt::Display for MarsTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_date_time(TimeZone::MTC))
    }
}

/// `(mir, month, sol)` of the sol that starts `whole` sols after the epoch.
fn decompose_sols(whole: i64) -> SolDate {
    let kilomirs = whole.div_euclid(SOLS_PER_KILOMIR);
    let mut rem = whole - kilomirs * SOLS_PER_KILOMIR;

    // The long/short pattern repeats every 1000 mirs, so offsets inside the
    // block can be taken from mir 0.
    let mut mirs = (rem as f64 / SOLS_PER_CALENDAR_MIR).floor() as i64;
    rem -= sols_before_mir(mirs);
    if rem < 0 {
        mirs -= 1;
        rem += sols_in_mir(mirs);
    } else if rem >= sols_in_mir(mirs) {
        rem -= sols_in_mir(mirs);
        mirs += 1;
    }
    let mir = kilomirs * 1000 + mirs;

    let rem = rem as u32;
    // Sol 669 of a long mir sits at the end of the fourth quarter.
    let quarter = (rem / SOLS_PER_SHORT_QUARTER).min(3);
    let rem = rem - quarter * SOLS_PER_SHORT_QUARTER;
    let month_in_quarter = rem / SOLS_PER_LONG_MONTH;
    let month = 1 + quarter * calendar::MONTHS_PER_QUARTER + month_in_quarter;
    let sol = rem - month_in_quarter * SOLS_PER_LONG_MONTH + 1;
    (mir, month, sol)
}

// ── Time<TT> Mars clocks ──────────────────────────────────────────────────

impl Time<TT> {
    /// Mars Sol Date of this JD(TT).
    #[inline]
    pub fn mars_sol_date(&self) -> f64 {
        (self.value() - MSD_EPOCH_JD_TT) / DAYS_PER_SOL
    }

    /// Coordinated Mars Time, the fractional part of the MSD.
    #[inline]
    pub fn coordinated_mars_time(&self) -> f64 {
        let msd = self.mars_sol_date();
        msd - msd.floor()
    }

    /// Prime-meridian mean solar time in millisols (Allison 1997).
    #[inline]
    pub fn mean_solar_time(&self) -> f64 {
        let t = (self.value() - MEAN_SOLAR_TIME_EPOCH_JD) / DAYS_PER_SOL;
        (t - t.floor()) * 1000.0
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// MarsDateTime
// ═══════════════════════════════════════════════════════════════════════════

/// A Utopian calendar date and time of sol in one time zone.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawMarsDateTime"))]
pub struct MarsDateTime {
    mir: i64,
    month: u32,
    sol: u32,
    millisols: f64,
    time_zone: TimeZone,
}

/// Unchecked wire form of [`MarsDateTime`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawMarsDateTime {
    mir: i64,
    month: u32,
    sol: u32,
    millisols: f64,
    time_zone: TimeZone,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMarsDateTime> for MarsDateTime {
    type Error = CalendarError;

    fn try_from(raw: RawMarsDateTime) -> CalendarResult<Self> {
        Self::new(raw.mir, raw.month, raw.sol, raw.millisols, raw.time_zone)
    }
}

impl MarsDateTime {
    /// Largest mir magnitude accepted by [`MarsDateTime::new`]. Sol counts
    /// of every accepted mir stay well inside `i64`.
    pub const MAX_MIR: i64 = 1_000_000_000_000;

    /// Validated constructor. Mirs beyond ±[`MAX_MIR`](Self::MAX_MIR) are
    /// [`CalendarError::OutOfRange`].
    pub fn new(
        mir: i64,
        month: u32,
        sol: u32,
        millisols: f64,
        time_zone: TimeZone,
    ) -> CalendarResult<Self> {
        if mir.unsigned_abs() > Self::MAX_MIR as u64 {
            return Err(CalendarError::OutOfRange);
        }
        let invalid = |field| CalendarError::InvalidMarsDate {
            mir,
            month,
            sol,
            field,
        };
        if !(1..=calendar::MONTHS_PER_MIR).contains(&month) {
            return Err(invalid(MarsField::Month));
        }
        if sol < 1 || sol > sols_in_month(mir, month) {
            return Err(invalid(MarsField::Sol));
        }
        if !(0.0..1000.0).contains(&millisols) {
            return Err(invalid(MarsField::Millisols));
        }
        Ok(Self {
            mir,
            month,
            sol,
            millisols,
            time_zone,
        })
    }

    /// Calendar date of a Unix timestamp in `zone`.
    #[inline]
    pub fn from_timestamp(timestamp: f64, zone: TimeZone) -> Self {
        MarsTime::from_timestamp(timestamp).to_date_time(zone)
    }

    /// Calendar date of the current moment in `zone`.
    pub fn now(zone: TimeZone) -> Self {
        MarsTime::now().to_date_time(zone)
    }

    /// Unix timestamp of this date.
    #[inline]
    pub fn timestamp(&self) -> f64 {
        self.mars_time().timestamp()
    }

    /// The continuous instant.
    #[inline]
    pub fn mars_time(&self) -> MarsTime {
        MarsTime::from_date_time(self)
    }

    /// The same instant read in another zone.
    pub fn in_time_zone(&self, zone: TimeZone) -> Self {
        self.mars_time().to_date_time(zone)
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Mir (Mars year), 0 at the epoch.
    #[inline]
    pub const fn mir(&self) -> i64 {
        self.mir
    }

    /// Month of the mir, 1..=24.
    #[inline]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Sol of the month, 1..=28.
    #[inline]
    pub const fn sol(&self) -> u32 {
        self.sol
    }

    /// Time of sol in millisols, 0 ≤ t < 1000.
    #[inline]
    pub const fn millisols(&self) -> f64 {
        self.millisols
    }

    /// Zone the fields are read in.
    #[inline]
    pub const fn time_zone(&self) -> TimeZone {
        self.time_zone
    }

    /// Sol of the mir, 1..=669.
    #[inline]
    pub const fn sol_of_mir(&self) -> u32 {
        calendar::sol_of_mir(self.month, self.sol)
    }

    /// Sol of the week, 1 (Lunasol) ..= 7 (Sunsol). Every month starts a
    /// fresh week.
    #[inline]
    pub const fn sol_of_week(&self) -> u32 {
        (self.sol - 1) % SOLS_PER_LONG_WEEK + 1
    }

    /// Name record of the month.
    pub fn month_name(&self) -> &'static MonthName {
        // `month` is validated to 1..=24 on every construction path.
        &calendar::MONTH_NAMES[(self.month - 1) as usize]
    }

    /// Name of the sol of the week.
    pub fn sol_name(&self) -> &'static str {
        calendar::SOL_NAMES[(self.sol_of_week() - 1) as usize]
    }

    /// Three-letter sol name: `Lun`, `Ear`, ... `Sun`.
    pub fn sol_abbreviation(&self) -> &'static str {
        &self.sol_name()[..3]
    }

    /// `MTC`, `MTC+3`, `MTC-2`.
    pub fn time_zone_string(&self) -> String {
        self.time_zone.to_string()
    }

    /// Whether the mir of this date is long.
    #[inline]
    pub const fn is_long_mir(&self) -> bool {
        calendar::is_long_mir(self.mir)
    }

    // ── field setters ─────────────────────────────────────────────────

    /// Same date in another mir.
    pub fn with_mir(&self, mir: i64) -> CalendarResult<Self> {
        Self::new(mir, self.month, self.sol, self.millisols, self.time_zone)
    }

    /// Same sol and time in another month.
    pub fn with_month(&self, month: u32) -> CalendarResult<Self> {
        Self::new(self.mir, month, self.sol, self.millisols, self.time_zone)
    }

    /// Another sol of the same month.
    pub fn with_sol(&self, sol: u32) -> CalendarResult<Self> {
        Self::new(self.mir, self.month, sol, self.millisols, self.time_zone)
    }

    /// Another time of the same sol.
    pub fn with_millisols(&self, millisols: f64) -> CalendarResult<Self> {
        Self::new(self.mir, self.month, self.sol, millisols, self.time_zone)
    }

    /// Same fields, labelled with another zone. This names a different
    /// instant; see [`in_time_zone`](Self::in_time_zone) to keep the instant.
    pub fn with_time_zone(&self, zone: TimeZone) -> Self {
        Self {
            time_zone: zone,
            ..*self
        }
    }
}

impl Default for MarsDateTime {
    fn default() -> Self {
        MarsTime::EPOCH.to_date_time(TimeZone::MTC)
    }
}

/// `M217/04/01:886.888+000`
impl fmt::Display for MarsDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format::format_date_time(
            self,
            &crate::format::FormatOptions::default(),
        ))
    }
}
