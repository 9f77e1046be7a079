// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Earth civil time.
//!
//! [`EarthTime`] is an immutable moment on the proleptic Gregorian calendar
//! read at a fixed UTC offset, backed by `chrono::DateTime<FixedOffset>`.
//! It bridges the civil fields of [`CivilDateTime`] and the Julian Date
//! routines of [`julian`](crate::julian), and knows the offsets between the
//! UTC, TAI and TT readings of the same moment:
//!
//! ```text
//! TAI − UTC = 10 s + leap seconds in effect        (from 1972)
//! TT  − UTC = see delta_t                          (three eras)
//! ```
//!
//! Field setters and calendar arithmetic follow "set the field, let the
//! calendar normalise" semantics: setting month 13 rolls into January of the
//! next year, and adding one month to January 31 lands on March 2 or 3.

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta,
    Timelike, Utc,
};
use qtty::{Days, Seconds};
use std::fmt;

use crate::civil::CivilDateTime;
use crate::delta_t;
use crate::error::{CalendarError, CalendarResult};
use crate::instant::{Time, TimeScale};
use crate::julian::{gregorian_to_julian_date, julian_date_to_gregorian, SECONDS_PER_DAY};
use crate::leap_seconds;
use crate::scales::{Scale, TT, UTC};

/// Nanosecond values at or above this mark an inserted leap second in chrono.
const LEAP_NANOS: u32 = 1_000_000_000;

/// A civil moment at a fixed UTC offset.
///
/// Equality and ordering compare the instant, not the offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EarthTime {
    datetime: DateTime<FixedOffset>,
}

impl EarthTime {
    // ── constructors ──────────────────────────────────────────────────

    /// The current moment, read in UTC.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now().fixed_offset())
    }

    /// Midnight UTC of the current day.
    pub fn today() -> Self {
        let midnight = Utc::now().date_naive().and_time(NaiveTime::MIN);
        Self::from_datetime(midnight.and_utc().fixed_offset())
    }

    /// Wrap a chrono date-time.
    #[inline]
    pub const fn from_datetime(datetime: DateTime<FixedOffset>) -> Self {
        Self { datetime }
    }

    /// Build from validated civil fields.
    pub fn from_civil(civil: &CivilDateTime) -> CalendarResult<Self> {
        let date = NaiveDate::from_ymd_opt(civil.year(), civil.month(), civil.day())
            .ok_or(CalendarError::OutOfRange)?;
        // chrono spells 23:59:60.x as 23:59:59 plus a second of nanos.
        let time = if civil.second() == 60 {
            NaiveTime::from_hms_micro_opt(
                civil.hour(),
                civil.minute(),
                59,
                1_000_000 + civil.microsecond(),
            )
        } else {
            NaiveTime::from_hms_micro_opt(
                civil.hour(),
                civil.minute(),
                civil.second(),
                civil.microsecond(),
            )
        }
        .ok_or(CalendarError::OutOfRange)?;
        let offset = civil.offset().unwrap_or(Self::utc_offset());
        Self::localize(date.and_time(time), offset)
    }

    /// Moment of a Unix timestamp in seconds, kept to the microsecond.
    pub fn from_timestamp(timestamp: f64) -> CalendarResult<Self> {
        if !timestamp.is_finite() {
            return Err(CalendarError::OutOfRange);
        }
        let mut seconds = timestamp.floor();
        let mut micros = ((timestamp - seconds) * 1e6).round();
        if micros >= 1e6 {
            seconds += 1.0;
            micros -= 1e6;
        }
        if seconds.abs() >= i64::MAX as f64 {
            return Err(CalendarError::OutOfRange);
        }
        DateTime::<Utc>::from_timestamp(seconds as i64, micros as u32 * 1_000)
            .map(|utc| Self::from_datetime(utc.fixed_offset()))
            .ok_or(CalendarError::OutOfRange)
    }

    /// Moment of a Julian Date read on `scale`.
    ///
    /// The civil fields are decoded with
    /// [`julian_date_to_gregorian`], so the result is always in UTC.
    /// TAI and TT readings are first brought back to UTC by a three-step
    /// fixed point on the date-dependent offset.
    pub fn from_julian_date(jd: f64, scale: Scale) -> CalendarResult<Self> {
        let jd_utc = match scale {
            Scale::Utc => jd,
            Scale::Tai => delta_t::utc_from_tai(Days::new(jd)).value(),
            Scale::Tt => Time::<TT>::new(jd).to::<UTC>().value(),
        };
        Self::from_civil(&julian_date_to_gregorian(jd_utc)?)
    }

    /// Moment of a typed Julian Date.
    pub fn from_time<S: TimeScale>(time: Time<S>) -> CalendarResult<Self> {
        Self::from_civil(&julian_date_to_gregorian(time.to::<UTC>().value())?)
    }

    fn utc_offset() -> FixedOffset {
        Utc.fix()
    }

    fn localize(naive: NaiveDateTime, offset: FixedOffset) -> CalendarResult<Self> {
        naive
            .and_local_timezone(offset)
            .single()
            .map(Self::from_datetime)
            .ok_or(CalendarError::OutOfRange)
    }

    // ── views ─────────────────────────────────────────────────────────

    /// The underlying chrono date-time.
    #[inline]
    pub const fn datetime(&self) -> DateTime<FixedOffset> {
        self.datetime
    }

    /// Civil fields as read at this moment's offset. A zero offset reads
    /// back as UTC (`offset() == None`).
    pub fn civil(&self) -> CivilDateTime {
        Self::fields_of(&self.datetime.naive_local(), self.offset_seconds())
    }

    /// Civil fields as read in UTC.
    pub fn utc_civil(&self) -> CivilDateTime {
        Self::fields_of(&self.datetime.naive_utc(), 0)
    }

    fn fields_of(naive: &NaiveDateTime, offset: i32) -> CivilDateTime {
        let nanos = naive.nanosecond();
        let (second, nanos) = if nanos >= LEAP_NANOS {
            (60, nanos - LEAP_NANOS)
        } else {
            (naive.second(), nanos)
        };
        CivilDateTime::from_parts(
            naive.year(),
            naive.month(),
            naive.day(),
            naive.hour(),
            naive.minute(),
            second,
            nanos / 1_000,
            (offset != 0).then_some(offset),
        )
    }

    /// Same instant, read at another offset.
    #[inline]
    pub fn with_offset(&self, offset: FixedOffset) -> Self {
        Self::from_datetime(self.datetime.with_timezone(&offset))
    }

    /// The UTC offset of this reading.
    #[inline]
    pub fn offset(&self) -> FixedOffset {
        *self.datetime.offset()
    }

    #[inline]
    fn offset_seconds(&self) -> i32 {
        self.offset().local_minus_utc()
    }

    // ── Julian Date and time scales ───────────────────────────────────

    /// Unix timestamp in seconds, with microsecond resolution.
    pub fn timestamp(&self) -> f64 {
        self.datetime.timestamp() as f64 + self.datetime.timestamp_subsec_micros() as f64 / 1e6
    }

    /// Julian Date of this moment read on `scale`.
    ///
    /// ```text
    /// JD(UTC) = gregorian_to_julian_date(fields)
    /// JD(TAI) = JD(UTC) + (TAI − UTC) / 86400
    /// JD(TT)  = JD(UTC) + (TT − UTC) / 86400
    /// ```
    pub fn to_julian_date(&self, scale: Scale) -> f64 {
        let jd_utc = gregorian_to_julian_date(&self.civil());
        match scale {
            Scale::Utc => jd_utc,
            Scale::Tai => jd_utc + self.tai_minus_utc().value() / SECONDS_PER_DAY,
            Scale::Tt => jd_utc + self.tt_minus_utc().value() / SECONDS_PER_DAY,
        }
    }

    /// This moment as a typed UTC Julian Date, converted to `S`.
    #[inline]
    pub fn to_time<S: TimeScale>(&self) -> Time<S> {
        Time::<UTC>::new(self.to_julian_date(Scale::Utc)).to::<S>()
    }

    /// Leap seconds inserted before the UTC month of this moment.
    pub fn leap_second_count(&self) -> u32 {
        let utc = self.datetime.naive_utc();
        leap_seconds::leap_seconds_before(utc.year(), utc.month())
    }

    /// TAI − UTC.
    pub fn tai_minus_utc(&self) -> Seconds {
        Seconds::new(leap_seconds::INITIAL_TAI_MINUS_UTC + self.leap_second_count() as f64)
    }

    /// TT − UTC for the era of this moment.
    pub fn tt_minus_utc(&self) -> Seconds {
        let utc = self.datetime.naive_utc();
        let jd_utc = Days::new(gregorian_to_julian_date(&self.civil()));
        delta_t::tt_minus_utc(utc.year(), utc.month(), jd_utc)
    }

    // ── field getters (local reading) ─────────────────────────────────

    #[inline]
    pub fn year(&self) -> i32 {
        self.datetime.year()
    }

    #[inline]
    pub fn month(&self) -> u32 {
        self.datetime.month()
    }

    #[inline]
    pub fn day(&self) -> u32 {
        self.datetime.day()
    }

    #[inline]
    pub fn hour(&self) -> u32 {
        self.datetime.hour()
    }

    #[inline]
    pub fn minute(&self) -> u32 {
        self.datetime.minute()
    }

    /// Second of the minute; 60 during an inserted leap second.
    #[inline]
    pub fn second(&self) -> u32 {
        self.civil().second()
    }

    #[inline]
    pub fn microsecond(&self) -> u32 {
        self.civil().microsecond()
    }

    /// Day of the year, 1..=366.
    #[inline]
    pub fn day_of_year(&self) -> u32 {
        self.datetime.ordinal()
    }

    /// ISO day of the week, 1 = Monday .. 7 = Sunday.
    #[inline]
    pub fn day_of_week(&self) -> u32 {
        self.datetime.weekday().number_from_monday()
    }

    /// ISO 8601 week number, 1..=53.
    #[inline]
    pub fn iso_week(&self) -> u32 {
        self.datetime.iso_week().week()
    }

    // ── field setters ─────────────────────────────────────────────────

    /// Rebuild from possibly out-of-range local fields, letting each one
    /// overflow into the next larger unit.
    #[allow(clippy::too_many_arguments)]
    fn normalized(
        &self,
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
        microsecond: i64,
    ) -> CalendarResult<Self> {
        let months = year
            .checked_mul(12)
            .and_then(|m| m.checked_add(month - 1))
            .ok_or(CalendarError::OutOfRange)?;
        let year = i32::try_from(months.div_euclid(12)).map_err(|_| CalendarError::OutOfRange)?;
        let month = months.rem_euclid(12) as u32 + 1;
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::OutOfRange)?;

        let offset = [
            TimeDelta::try_days(day - 1),
            TimeDelta::try_hours(hour),
            TimeDelta::try_minutes(minute),
            TimeDelta::try_seconds(second),
            Some(TimeDelta::microseconds(microsecond)),
        ]
        .into_iter()
        .try_fold(TimeDelta::zero(), |acc, delta| acc.checked_add(&delta?))
        .ok_or(CalendarError::OutOfRange)?;

        let naive = first
            .and_time(NaiveTime::MIN)
            .checked_add_signed(offset)
            .ok_or(CalendarError::OutOfRange)?;
        Self::localize(naive, self.offset())
    }

    fn fields(&self) -> [i64; 7] {
        let c = self.civil();
        [
            c.year() as i64,
            c.month() as i64,
            c.day() as i64,
            c.hour() as i64,
            c.minute() as i64,
            c.second() as i64,
            c.microsecond() as i64,
        ]
    }

    fn with_field(&self, index: usize, value: i64) -> CalendarResult<Self> {
        let mut f = self.fields();
        f[index] = value;
        self.normalized(f[0], f[1], f[2], f[3], f[4], f[5], f[6])
    }

    pub fn set_year(&self, year: i64) -> CalendarResult<Self> {
        self.with_field(0, year)
    }

    pub fn set_month(&self, month: i64) -> CalendarResult<Self> {
        self.with_field(1, month)
    }

    pub fn set_day(&self, day: i64) -> CalendarResult<Self> {
        self.with_field(2, day)
    }

    pub fn set_hour(&self, hour: i64) -> CalendarResult<Self> {
        self.with_field(3, hour)
    }

    pub fn set_minute(&self, minute: i64) -> CalendarResult<Self> {
        self.with_field(4, minute)
    }

    pub fn set_second(&self, second: i64) -> CalendarResult<Self> {
        self.with_field(5, second)
    }

    pub fn set_microsecond(&self, microsecond: i64) -> CalendarResult<Self> {
        self.with_field(6, microsecond)
    }

    // ── arithmetic ────────────────────────────────────────────────────

    fn shifted(&self, index: usize, amount: i64) -> CalendarResult<Self> {
        let value = self.fields()[index]
            .checked_add(amount)
            .ok_or(CalendarError::OutOfRange)?;
        self.with_field(index, value)
    }

    fn negated(amount: i64) -> CalendarResult<i64> {
        amount.checked_neg().ok_or(CalendarError::OutOfRange)
    }

    pub fn add_years(&self, years: i64) -> CalendarResult<Self> {
        self.shifted(0, years)
    }

    pub fn add_months(&self, months: i64) -> CalendarResult<Self> {
        self.shifted(1, months)
    }

    pub fn add_weeks(&self, weeks: i64) -> CalendarResult<Self> {
        self.add_days(weeks.checked_mul(7).ok_or(CalendarError::OutOfRange)?)
    }

    pub fn add_days(&self, days: i64) -> CalendarResult<Self> {
        self.shifted(2, days)
    }

    pub fn add_hours(&self, hours: i64) -> CalendarResult<Self> {
        self.shifted(3, hours)
    }

    pub fn add_minutes(&self, minutes: i64) -> CalendarResult<Self> {
        self.shifted(4, minutes)
    }

    pub fn add_seconds(&self, seconds: i64) -> CalendarResult<Self> {
        self.shifted(5, seconds)
    }

    pub fn add_microseconds(&self, microseconds: i64) -> CalendarResult<Self> {
        self.shifted(6, microseconds)
    }

    pub fn sub_years(&self, years: i64) -> CalendarResult<Self> {
        self.add_years(Self::negated(years)?)
    }

    pub fn sub_months(&self, months: i64) -> CalendarResult<Self> {
        self.add_months(Self::negated(months)?)
    }

    pub fn sub_weeks(&self, weeks: i64) -> CalendarResult<Self> {
        self.add_weeks(Self::negated(weeks)?)
    }

    pub fn sub_days(&self, days: i64) -> CalendarResult<Self> {
        self.add_days(Self::negated(days)?)
    }

    pub fn sub_hours(&self, hours: i64) -> CalendarResult<Self> {
        self.add_hours(Self::negated(hours)?)
    }

    pub fn sub_minutes(&self, minutes: i64) -> CalendarResult<Self> {
        self.add_minutes(Self::negated(minutes)?)
    }

    pub fn sub_seconds(&self, seconds: i64) -> CalendarResult<Self> {
        self.add_seconds(Self::negated(seconds)?)
    }

    pub fn sub_microseconds(&self, microseconds: i64) -> CalendarResult<Self> {
        self.add_microseconds(Self::negated(microseconds)?)
    }

    /// `self − other` in seconds; the magnitude only when `absolute`.
    pub fn diff_seconds(&self, other: &EarthTime, absolute: bool) -> f64 {
        let diff = self.timestamp() - other.timestamp();
        if absolute {
            diff.abs()
        } else {
            diff
        }
    }
}

impl From<DateTime<FixedOffset>> for EarthTime {
    fn from(datetime: DateTime<FixedOffset>) -> Self {
        Self::from_datetime(datetime)
    }
}

impl From<DateTime<Utc>> for EarthTime {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::from_datetime(datetime.fixed_offset())
    }
}

impl fmt::Display for EarthTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.datetime.format("%Y-%m-%d %H:%M:%S %:z"))
    }
}
