//! Shared transposition table of alpha-beta score bounds.
//!
//! Lower bounds (from fail-high cutoffs) and upper bounds (from fail-lows)
//! are kept in separate maps keyed by position fingerprint, each tagged with
//! the depth that produced it. The maps are split across mutex-guarded
//! shards so root workers contend only when they touch the same shard.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Score sentinel larger than any evaluation or mate score.
pub const SCORE_INFINITY: i32 = 1_000_000;

const DEFAULT_SHARDS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Lower,
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub depth: u8,
    pub score: i32,
}

/// Bounds usable at a requested depth; absent bounds are the infinities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub lower: i32,
    pub upper: i32,
}

impl Bounds {
    pub const UNKNOWN: Bounds = Bounds {
        lower: -SCORE_INFINITY,
        upper: SCORE_INFINITY,
    };
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

#[derive(Debug, Default)]
struct Shard {
    lower: HashMap<u64, TTEntry>,
    upper: HashMap<u64, TTEntry>,
}

impl Shard {
    fn store_mut(&mut self, bound: Bound) -> &mut HashMap<u64, TTEntry> {
        match bound {
            Bound::Lower => &mut self.lower,
            Bound::Upper => &mut self.upper,
        }
    }
}

#[derive(Debug)]
pub struct TranspositionTable {
    shards: Vec<Mutex<Shard>>,
    probes: AtomicU64,
    hits: AtomicU64,
    stores: AtomicU64,
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(DEFAULT_SHARDS)
    }
}

impl TranspositionTable {
    pub fn new(shards: usize) -> Self {
        Self {
            shards: (0..shards.max(1)).map(|_| Mutex::new(Shard::default())).collect(),
            probes: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            stores: AtomicU64::new(0),
        }
    }

    #[inline]
    fn shard(&self, fingerprint: u64) -> &Mutex<Shard> {
        &self.shards[(fingerprint % self.shards.len() as u64) as usize]
    }

    /// Bounds recorded at `depth` or deeper; shallower entries are ignored.
    pub fn lookup(&self, fingerprint: u64, depth: u8) -> Bounds {
        self.probes.fetch_add(1, Ordering::Relaxed);
        let Ok(shard) = self.shard(fingerprint).lock() else {
            return Bounds::UNKNOWN;
        };

        let usable = |entry: Option<&TTEntry>| entry.filter(|e| e.depth >= depth).map(|e| e.score);
        let lower = usable(shard.lower.get(&fingerprint));
        let upper = usable(shard.upper.get(&fingerprint));
        if lower.is_some() || upper.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }

        Bounds {
            lower: lower.unwrap_or(-SCORE_INFINITY),
            upper: upper.unwrap_or(SCORE_INFINITY),
        }
    }

    #[inline]
    pub fn record_lower(&self, fingerprint: u64, depth: u8, score: i32) {
        self.record(Bound::Lower, fingerprint, depth, score);
    }

    #[inline]
    pub fn record_upper(&self, fingerprint: u64, depth: u8, score: i32) {
        self.record(Bound::Upper, fingerprint, depth, score);
    }

    /// Store unless an entry of equal or greater depth already exists.
    pub fn record(&self, bound: Bound, fingerprint: u64, depth: u8, score: i32) {
        let Ok(mut shard) = self.shard(fingerprint).lock() else {
            return;
        };
        let store = shard.store_mut(bound);
        if store.get(&fingerprint).is_some_and(|existing| existing.depth >= depth) {
            return;
        }
        store.insert(fingerprint, TTEntry { depth, score });
        self.stores.fetch_add(1, Ordering::Relaxed);
    }

    pub fn clear(&self) {
        for shard in &self.shards {
            if let Ok(mut guard) = shard.lock() {
                guard.lower.clear();
                guard.upper.clear();
            }
        }
        self.probes.store(0, Ordering::Relaxed);
        self.hits.store(0, Ordering::Relaxed);
        self.stores.store(0, Ordering::Relaxed);
    }

    /// Number of stored bounds (lower and upper counted separately).
    pub fn len(&self) -> usize {
        self.shards
            .iter()
            .filter_map(|shard| shard.lock().ok().map(|g| g.lower.len() + g.upper.len()))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> TTStats {
        TTStats {
            probes: self.probes.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            stores: self.stores.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn missing_entries_read_as_infinities() {
        let tt = TranspositionTable::default();
        assert_eq!(tt.lookup(42, 1), Bounds::UNKNOWN);
    }

    #[test]
    fn shallow_entries_are_ignored_for_deeper_requests() {
        let tt = TranspositionTable::default();
        tt.record_lower(7, 2, 35);
        assert_eq!(tt.lookup(7, 2).lower, 35);
        assert_eq!(tt.lookup(7, 1).lower, 35);
        assert_eq!(tt.lookup(7, 3).lower, -SCORE_INFINITY);
    }

    #[test]
    fn deeper_entries_are_never_downgraded() {
        let tt = TranspositionTable::default();
        tt.record_upper(9, 4, 100);
        tt.record_upper(9, 2, -50);
        tt.record_upper(9, 4, -60);
        assert_eq!(tt.lookup(9, 1).upper, 100);

        tt.record_upper(9, 5, 80);
        assert_eq!(tt.lookup(9, 5).upper, 80);
    }

    #[test]
    fn lower_and_upper_are_independent() {
        let tt = TranspositionTable::default();
        tt.record_lower(3, 1, -10);
        tt.record_upper(3, 1, 25);
        assert_eq!(tt.lookup(3, 1), Bounds { lower: -10, upper: 25 });
        assert_eq!(tt.len(), 2);

        tt.clear();
        assert!(tt.is_empty());
        assert_eq!(tt.stats(), TTStats::default());
    }

    #[test]
    fn concurrent_writers_do_not_lose_the_deepest_entry() {
        let tt = TranspositionTable::new(4);
        thread::scope(|scope| {
            for depth in 1..=8u8 {
                let tt = &tt;
                scope.spawn(move || {
                    for key in 0..200u64 {
                        tt.record_lower(key, depth, i32::from(depth));
                    }
                });
            }
        });
        for key in 0..200u64 {
            assert_eq!(tt.lookup(key, 8).lower, 8);
        }
    }
}
