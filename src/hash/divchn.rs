//! HT-DIVCHN — division hashing with chained buckets. Component E.
//!
//! Ported from spec.md §4.E. Buckets are [`crate::collections::dll::Dll`]
//! arena chains rather than individually-allocated DLL nodes (spec.md §9's
//! sanctioned arena substitution); growth walks the prime table in
//! [`crate::config::PRIMES`] instead of recomputing primes at runtime.

use crate::collections::dll::Dll;
use crate::config::{DEFAULT_ALPHA, PRIMES};
use crate::hash::key::HashKey;

/// Division-hashing chained hash table.
///
/// `K` must implement [`HashKey`] (reducible to one machine word) and
/// `PartialEq` (bucket-uniqueness checks use direct comparison, standing in
/// for spec.md's raw memory compare on key bytes).
pub struct HtDivChn<K, E> {
    buckets: Vec<Option<usize>>,
    arena: Dll<K, E>,
    count_ix: usize,
    num_elts: usize,
    alpha: f64,
    /// Optional destructor run on a value displaced by `insert` (replacing
    /// an existing key) or discarded by `delete`. Mirrors spec.md's
    /// `free_elt`, used when `E` is an out-of-band handle that owns
    /// resources the table itself cannot see (e.g. an index into another
    /// arena). When `None`, Rust's own `Drop` for `E` is sufficient.
    free_elt: Option<Box<dyn FnMut(E)>>,
    saturated_logged: bool,
}

impl<K, E> HtDivChn<K, E>
where
    K: HashKey,
{
    /// Creates a new table.
    ///
    /// `min_num`, if nonzero, pre-advances `count_ix` past primes smaller
    /// than `ceil(min_num / alpha)` so the table doesn't rehash during an
    /// initial bulk load (spec.md §4.E). `alpha` must be positive; a
    /// nonpositive value is replaced with [`DEFAULT_ALPHA`].
    pub fn new(min_num: u64, alpha: f64, free_elt: Option<Box<dyn FnMut(E)>>) -> Self {
        let alpha = if alpha > 0.0 { alpha } else { DEFAULT_ALPHA };
        let min_count = if min_num == 0 {
            0.0
        } else {
            (min_num as f64 / alpha).ceil()
        };
        let count_ix = PRIMES
            .iter()
            .position(|&p| p as f64 >= min_count)
            .unwrap_or(PRIMES.len() - 1);
        let count = PRIMES[count_ix] as usize;
        HtDivChn {
            buckets: vec![None; count],
            arena: Dll::new(),
            count_ix,
            num_elts: 0,
            alpha,
            free_elt,
            saturated_logged: false,
        }
    }

    /// Number of slots currently allocated (the active table prime).
    pub fn count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of elements currently stored.
    pub fn num_elts(&self) -> usize {
        self.num_elts
    }

    fn bucket_of(&self, key: &K) -> usize {
        (key.hash_word() % self.buckets.len() as u64) as usize
    }

    /// Inserts `(key, elt)`. If `key` is already present, the old element
    /// is replaced — running `free_elt` on it first if one was supplied —
    /// and the table's size does not change.
    pub fn insert(&mut self, key: K, elt: E)
    where
        K: Clone,
    {
        let b = self.bucket_of(&key);
        if let Some(slot) = self.arena.find(self.buckets[b], &key) {
            let old = std::mem::replace(self.arena.elt_mut(slot), elt);
            if let Some(f) = self.free_elt.as_mut() {
                f(old);
            }
            return;
        }
        self.arena.push_front(&mut self.buckets[b], key, elt);
        self.num_elts += 1;
        self.maybe_grow();
    }

    /// Inserts `(key, elt)`, combining with any existing value for `key`
    /// via `reduce(old, new)` instead of replacing it outright. Used by
    /// [`crate::hash::concurrent::ConcurrentHtDivChn`] to implement its
    /// optional `rdc_elt` reduction (spec.md §4.L).
    pub fn insert_with_reduce(&mut self, key: K, elt: E, reduce: &dyn Fn(E, E) -> E)
    where
        K: Clone,
        E: Default,
    {
        let b = self.bucket_of(&key);
        if let Some(slot) = self.arena.find(self.buckets[b], &key) {
            let old = std::mem::take(self.arena.elt_mut(slot));
            *self.arena.elt_mut(slot) = reduce(old, elt);
            return;
        }
        self.arena.push_front(&mut self.buckets[b], key, elt);
        self.num_elts += 1;
        self.maybe_grow();
    }

    /// Drains every `(key, elt)` pair out of the table, leaving it empty.
    /// Used by [`crate::hash::concurrent::ConcurrentHtDivChn`] to move
    /// entries into a grown shard layout without a deep copy.
    pub fn drain(&mut self) -> Vec<(K, E)> {
        let mut out = Vec::with_capacity(self.num_elts);
        for head in self.buckets.iter_mut() {
            while let Some(slot) = *head {
                out.push(self.arena.remove(head, slot));
            }
        }
        self.num_elts = 0;
        out
    }

    /// Returns a reference to the element stored under `key`, or `None`.
    pub fn search(&self, key: &K) -> Option<&E> {
        let b = self.bucket_of(key);
        self.arena.find(self.buckets[b], key).map(|s| self.arena.elt(s))
    }

    /// Removes `key` and returns its element, or `None` if absent.
    pub fn remove(&mut self, key: &K) -> Option<E> {
        let b = self.bucket_of(key);
        let slot = self.arena.find(self.buckets[b], key)?;
        let (_, elt) = self.arena.remove(&mut self.buckets[b], slot);
        self.num_elts -= 1;
        Some(elt)
    }

    /// Removes `key`, running `free_elt` on its element (if one was
    /// supplied) instead of returning it.
    pub fn delete(&mut self, key: &K) {
        if let Some(elt) = self.remove(key) {
            if let Some(f) = self.free_elt.as_mut() {
                f(elt);
            }
        }
    }

    fn maybe_grow(&mut self) {
        if self.count_ix + 1 >= PRIMES.len() {
            if !self.saturated_logged {
                log::warn!(
                    "HtDivChn reached the final prime ({}); alpha is no longer bounded",
                    PRIMES[self.count_ix]
                );
                self.saturated_logged = true;
            }
            return;
        }
        if self.num_elts as f64 / self.buckets.len() as f64 > self.alpha {
            self.grow();
        }
    }

    fn grow(&mut self) {
        let old_count = self.buckets.len();
        self.count_ix += 1;
        let new_count = PRIMES[self.count_ix] as usize;
        log::debug!("HtDivChn growing from {old_count} to {new_count} buckets");
        let mut new_buckets: Vec<Option<usize>> = vec![None; new_count];
        for old_idx in 0..old_count {
            while let Some(head_slot) = self.buckets[old_idx] {
                let (key, elt) = self.arena.remove(&mut self.buckets[old_idx], head_slot);
                let new_b = (key.hash_word() % new_count as u64) as usize;
                self.arena.push_front(&mut new_buckets[new_b], key, elt);
            }
        }
        self.buckets = new_buckets;
    }
}

impl<K, E> Drop for HtDivChn<K, E> {
    fn drop(&mut self) {
        // Rust's own Drop for `Dll<K, E>` already frees every (key, elt);
        // `free_elt`, if present, is for out-of-band handles and is not
        // re-invoked here to avoid double-freeing resources it already
        // released on `insert`/`delete` — see spec.md §4.E's destructor note.
    }
}
