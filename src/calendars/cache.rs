use std::fmt;
use std::sync::atomic::{AtomicI32, Ordering};

use tracing::trace;

use crate::consts::{
    YEAR_CACHE_ENTRY_VALIDATOR_BITS, YEAR_CACHE_ENTRY_VALIDATOR_MASK, YEAR_CACHE_INDEX_MASK,
    YEAR_CACHE_INVALID_ENTRY_YEAR, YEAR_CACHE_SIZE, YEAR_CACHE_SIZE_SHIFT,
};

/// A cached start-of-year value packed into one `i32`.
///
/// The low bits hold a validator taken from the bits of the year that the
/// cache index discards, so a slot can tell which of the colliding years it
/// currently describes. The remaining bits hold the value itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct YearStartCacheEntry(i32);

impl YearStartCacheEntry {
    /// An entry that is never valid for a supported year.
    pub(crate) const INVALID: Self = Self::new(YEAR_CACHE_INVALID_ENTRY_YEAR, 0);

    pub(crate) const fn new(year: i32, start_of_year_days: i32) -> Self {
        Self((start_of_year_days << YEAR_CACHE_ENTRY_VALIDATOR_BITS) | Self::validator(year))
    }

    const fn validator(year: i32) -> i32 {
        (year >> YEAR_CACHE_SIZE_SHIFT) & YEAR_CACHE_ENTRY_VALIDATOR_MASK
    }

    pub(crate) const fn cache_index(year: i32) -> usize {
        (year & YEAR_CACHE_INDEX_MASK) as usize
    }

    pub(crate) const fn is_valid_for_year(self, year: i32) -> bool {
        Self::validator(year) == (self.0 & YEAR_CACHE_ENTRY_VALIDATOR_MASK)
    }

    pub(crate) const fn start_of_year_days(self) -> i32 {
        self.0 >> YEAR_CACHE_ENTRY_VALIDATOR_BITS
    }
}

const INVALID_RAW: i32 = YearStartCacheEntry::INVALID.0;

/// Fixed-size, lock-free cache of start-of-year values.
///
/// Each slot is read and written as a whole entry, so a racing reader sees
/// either the old entry or the new one. A lost update only costs a recompute.
pub(crate) struct YearStartCache {
    entries: [AtomicI32; YEAR_CACHE_SIZE],
}

impl YearStartCache {
    pub(crate) const fn new() -> Self {
        Self {
            entries: [const { AtomicI32::new(INVALID_RAW) }; YEAR_CACHE_SIZE],
        }
    }

    fn slot(&self, year: i32) -> &AtomicI32 {
        &self.entries[YearStartCacheEntry::cache_index(year)]
    }

    pub(crate) fn get(&self, year: i32) -> Option<i32> {
        let entry = YearStartCacheEntry(self.slot(year).load(Ordering::Relaxed));
        entry.is_valid_for_year(year).then(|| entry.start_of_year_days())
    }

    pub(crate) fn insert(&self, year: i32, value: i32) {
        self.slot(year)
            .store(YearStartCacheEntry::new(year, value).0, Ordering::Relaxed);
    }

    pub(crate) fn get_or_compute(&self, year: i32, compute: impl FnOnce(i32) -> i32) -> i32 {
        if let Some(value) = self.get(year) {
            return value;
        }
        let value = compute(year);
        trace!(year, value, "year start cache miss");
        self.insert(year, value);
        value
    }
}

impl fmt::Debug for YearStartCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YearStartCache")
            .field("size", &self.entries.len())
            .finish_non_exhaustive()
    }
}
