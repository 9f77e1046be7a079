// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Shared whole-sol memo.
//!
//! Decomposing a sol count into `(mir, month, sol)` costs a handful of
//! divisions and range sums; the fractional millisols are cheap. Moments
//! that share a whole sol therefore share one cache entry, keyed by the
//! floor of sols since the epoch.
//!
//! The cache is process-wide, bounded, and safe to use from many threads.
//! Disabling it (see [`set_enabled`]) only costs time: every lookup then
//! recomputes, and the results are identical.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, RwLock};

/// Calendar date of a whole sol: `(mir, month, sol)`.
pub type SolDate = (i64, u32, u32);

/// Entries kept before the map is flushed.
const CAPACITY: usize = 4096;

static ENABLED: AtomicBool = AtomicBool::new(true);

static CACHE: LazyLock<RwLock<HashMap<i64, SolDate>>> =
    LazyLock::new(|| RwLock::new(HashMap::with_capacity(CAPACITY)));

/// Turn the memo on or off for the whole process.
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

/// Whether lookups currently go through the memo.
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Drop every entry.
pub fn clear() {
    if let Ok(mut map) = CACHE.write() {
        map.clear();
    }
}

/// Number of entries currently held.
pub fn len() -> usize {
    CACHE.read().map(|map| map.len()).unwrap_or(0)
}

/// Cached date of `whole_sols`, computing and storing it on a miss.
///
/// A poisoned lock is treated like a disabled cache.
pub(crate) fn sol_date(whole_sols: i64, compute: impl FnOnce(i64) -> SolDate) -> SolDate {
    if !is_enabled() {
        return compute(whole_sols);
    }
    if let Some(date) = CACHE
        .read()
        .ok()
        .and_then(|map| map.get(&whole_sols).copied())
    {
        return date;
    }
    let date = compute(whole_sols);
    if let Ok(mut map) = CACHE.write() {
        if map.len() >= CAPACITY {
            map.clear();
        }
        map.insert(whole_sols, date);
    }
    date
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    // One test so the enable flag is never toggled under a sibling test.
    #[test]
    fn memo_hits_misses_and_bypass() {
        let calls = Cell::new(0);
        let compute = |whole: i64| {
            calls.set(calls.get() + 1);
            (whole, 1, 1)
        };

        // Keys far below any sol count a real conversion produces.
        let key = i64::MIN + 2 * CAPACITY as i64;
        assert_eq!(sol_date(key, compute), (key, 1, 1));
        assert_eq!(sol_date(key, compute), (key, 1, 1));
        assert!(calls.get() <= 2);
        assert!(len() >= 1 || !is_enabled());

        set_enabled(false);
        let before = calls.get();
        assert_eq!(sol_date(key, compute), (key, 1, 1));
        assert_eq!(calls.get(), before + 1);
        set_enabled(true);
        assert!(is_enabled());

        for n in 0..(CAPACITY as i64 + 10) {
            sol_date(i64::MIN + n, |w| (w, 2, 2));
        }
        assert!(len() <= CAPACITY);

        clear();
        let before = calls.get();
        sol_date(key, compute);
        assert_eq!(calls.get(), before + 1);
    }
}
