// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Utopian calendar rules
//!
//! Integer arithmetic of the Mars calendar: which mirs are long, how many
//! sols each month has, and how many sols a run of mirs spans.
//!
//! A mir is split into four quarters of six months. Every month has 28 sols
//! except the last month of each quarter (months 6, 12, 18, 24), which has
//! 27. A **long mir** adds one intercalary sol to month 24 (Tucana), giving
//! 669 sols instead of 668.
//!
//! ## Intercalation
//!
//! ```text
//! long  ⇔  odd  ∨  divisible by 1000  ∨  (divisible by 10 ∧ not by 100)
//! ```
//!
//! Over 1000 mirs that gives 500 + 100 − 10 + 1 = 591 long mirs, so the
//! calendar mir averages 668.591 sols. The pattern is symmetric under
//! `mir → −mir`, which the range sums below rely on.

use std::fmt;

/// Sols in a short (6-sol) week: the last week of a 27-sol month.
pub const SOLS_PER_SHORT_WEEK: u32 = 6;
/// Sols in a full week.
pub const SOLS_PER_LONG_WEEK: u32 = 7;
/// Sols in months 6, 12, 18 and in month 24 of a short mir.
pub const SOLS_PER_SHORT_MONTH: u32 = 27;
/// Sols in every other month.
pub const SOLS_PER_LONG_MONTH: u32 = 28;
/// Sols in a quarter ending with a 27-sol month.
pub const SOLS_PER_SHORT_QUARTER: u32 = 167;
/// Sols in the last quarter of a long mir.
pub const SOLS_PER_LONG_QUARTER: u32 = 168;
/// Sols in a short mir.
pub const SOLS_PER_SHORT_MIR: u32 = 668;
/// Sols in a long mir.
pub const SOLS_PER_LONG_MIR: u32 = 669;
/// Weeks in a month.
pub const WEEKS_PER_MONTH: u32 = 4;
/// Weeks in a quarter.
pub const WEEKS_PER_QUARTER: u32 = 24;
/// Weeks in a mir.
pub const WEEKS_PER_MIR: u32 = 96;
/// Months in a quarter.
pub const MONTHS_PER_QUARTER: u32 = 6;
/// Months in a mir.
pub const MONTHS_PER_MIR: u32 = 24;
/// Mean calendar mir, in sols.
pub const SOLS_PER_CALENDAR_MIR: f64 = 668.591;
/// Mean tropical mir (vernal equinox to vernal equinox), in sols.
pub const SOLS_PER_TROPICAL_MIR: f64 = 668.5907;
/// Exact sols in any 1000-mir block that starts on a multiple of 1000.
pub const SOLS_PER_KILOMIR: i64 = 668_591;

/// A month of the Utopian calendar, named after a southern or equatorial
/// constellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthName {
    /// IAU three-letter abbreviation.
    pub abbreviation: &'static str,
    /// Latin constellation name, used as the month name.
    pub name: &'static str,
    /// English meaning of the Latin name.
    pub meaning: &'static str,
    /// Right ascension of the constellation centre, `"hh mm.mm"`.
    pub right_ascension: &'static str,
}

const fn month(
    abbreviation: &'static str,
    name: &'static str,
    meaning: &'static str,
    right_ascension: &'static str,
) -> MonthName {
    MonthName {
        abbreviation,
        name,
        meaning,
        right_ascension,
    }
}

/// The 24 months, in calendar order (index 0 is month 1).
pub const MONTH_NAMES: [MonthName; 24] = [
    month("Phe", "Phoenix", "Phoenix", "00 55.91"),
    month("Cet", "Cetus", "Whale", "01 40.10"),
    month("Dor", "Dorado", "Dolphinfish", "05 14.51"),
    month("Lep", "Lepus", "Hare", "05 33.95"),
    month("Col", "Columba", "Dove", "05 51.76"),
    month("Mon", "Monoceros", "Unicorn", "07 03.63"),
    month("Vol", "Volans", "Flying Fish", "07 47.73"),
    month("Lyn", "Lynx", "Lynx", "07 59.53"),
    month("Cam", "Camelopardalis", "Giraffe", "08 51.37"),
    month("Cha", "Chamaeleon", "Chameleon", "10 41.53"),
    month("Hya", "Hydra", "Sea Serpent", "11 36.73"),
    month("Crv", "Corvus", "Raven", "12 26.52"),
    month("Cen", "Centaurus", "Centaur", "13 04.27"),
    month("Dra", "Draco", "Dragon", "15 08.64"),
    month("Lup", "Lupus", "Wolf", "15 13.21"),
    month("Aps", "Apus", "Bird of Paradise", "16 08.65"),
    month("Pav", "Pavo", "Peacock", "19 36.71"),
    month("Aql", "Aquila", "Eagle", "19 40.02"),
    month("Vul", "Vulpecula", "Fox", "20 13.88"),
    month("Cyg", "Cygnus", "Swan", "20 35.28"),
    month("Del", "Delphinus", "Dolphin", "20 41.61"),
    month("Gru", "Grus", "Crane", "22 27.39"),
    month("Peg", "Pegasus", "Pegasus", "22 41.84"),
    month("Tuc", "Tucana", "Toucan", "23 46.64"),
];

/// Sols of the week, Lunasol (1) to Sunsol (7). The week starts on
/// Lunasol, as ISO 8601 weeks start on Monday.
pub const SOL_NAMES: [&str; 7] = [
    "Lunasol",
    "Earthsol",
    "Venusol",
    "Mercurisol",
    "Jupitersol",
    "Saturnsol",
    "Sunsol",
];

impl fmt::Display for MonthName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Name record of `month` (1..=24), or `None` outside that range.
#[inline]
pub fn month_name(month: u32) -> Option<&'static MonthName> {
    MONTH_NAMES.get((month as usize).checked_sub(1)?)
}

/// Name of sol-of-week `sol` (1..=7), or `None` outside that range.
#[inline]
pub fn sol_name(sol: u32) -> Option<&'static str> {
    SOL_NAMES.get((sol as usize).checked_sub(1)?).copied()
}

/// Whether `mir` has 669 sols.
#[inline]
pub const fn is_long_mir(mir: i64) -> bool {
    mir % 2 != 0 || mir % 1000 == 0 || (mir % 100 != 0 && mir % 10 == 0)
}

/// Sols in `mir`: 669 for a long mir, 668 otherwise.
#[inline]
pub const fn sols_in_mir(mir: i64) -> i64 {
    if is_long_mir(mir) {
        SOLS_PER_LONG_MIR as i64
    } else {
        SOLS_PER_SHORT_MIR as i64
    }
}

/// Sols in `month` (1..=24) of `mir`.
///
/// Month 24 has 28 sols in a long mir and 27 in a short one; months 6, 12
/// and 18 always have 27; everything else has 28. Months outside 1..=24
/// have 0 sols.
#[inline]
pub const fn sols_in_month(mir: i64, month: u32) -> u32 {
    match month {
        24 if is_long_mir(mir) => SOLS_PER_LONG_MONTH,
        6 | 12 | 18 | 24 => SOLS_PER_SHORT_MONTH,
        1..=23 => SOLS_PER_LONG_MONTH,
        _ => 0,
    }
}

/// Position (1-based) of `(month, sol)` within its mir. `month` must be
/// in 1..=24.
#[inline]
pub const fn sol_of_mir(month: u32, sol: u32) -> u32 {
    let quarter = (month - 1) / MONTHS_PER_QUARTER;
    let month_in_quarter = month - quarter * MONTHS_PER_QUARTER - 1;
    quarter * SOLS_PER_SHORT_QUARTER + month_in_quarter * SOLS_PER_LONG_MONTH + sol
}

/// Sols in mirs `1..=mirs`, in closed form. Zero mirs span zero sols.
/// Saturates at `i64::MAX`.
#[inline]
pub const fn sols_in_mirs_from_1(mirs: u64) -> i64 {
    let n = mirs as i128;
    let sols = n * SOLS_PER_SHORT_MIR as i128 + (n + 1) / 2 + n / 10 - n / 100 + n / 1000;
    if sols > i64::MAX as i128 {
        i64::MAX
    } else {
        sols as i64
    }
}

/// Sols in the positive mirs `lo..=hi`, with `1 <= lo <= hi`.
fn sols_in_positive_mirs(lo: u64, hi: u64) -> i64 {
    sols_in_mirs_from_1(hi).saturating_sub(sols_in_mirs_from_1(lo - 1))
}

/// Sols in the inclusive mir range `min..=max` (bounds may come in either
/// order and either sign). Saturates at `i64::MAX`.
pub fn sols_in_mirs(min: i64, max: i64) -> i64 {
    let (min, max) = if min > max { (max, min) } else { (min, max) };

    if min == max {
        return sols_in_mir(min);
    }

    // Wholly negative: mirror onto the positive side.
    if max < 0 {
        return sols_in_positive_mirs(max.unsigned_abs(), min.unsigned_abs());
    }

    // Straddling zero: negative side, mir 0, positive side.
    if min < 0 {
        return sols_in_mirs_from_1(min.unsigned_abs())
            .saturating_add(sols_in_mir(0))
            .saturating_add(sols_in_mirs_from_1(max as u64));
    }

    match min {
        0 => sols_in_mir(0).saturating_add(sols_in_mirs_from_1(max as u64)),
        _ => sols_in_positive_mirs(min as u64, max as u64),
    }
}

/// Sols from the start of mir 0 to the start of `mir`; negative for
/// negative mirs.
pub fn sols_before_mir(mir: i64) -> i64 {
    match mir {
        0 => 0,
        m if m > 0 => sols_in_mirs(0, m - 1),
        m => -sols_in_mirs(m, -1),
    }
}
