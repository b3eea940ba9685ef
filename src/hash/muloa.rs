//! HT-MULOA — multiplicative hashing with open addressing and double
//! probing, placeholder tombstones. Component F.
//!
//! Ported from spec.md §4.F. Each occupied slot stores its key's two
//! precomputed hash values alongside the key/element, so a grow only ever
//! needs a bit shift against the stored hash rather than recomputing the
//! multiplicative hash from scratch (spec.md: "This lets a rehash on grow
//! avoid recomputing the multiplicative hash (shift only)"). `log_count`
//! is sized with [`crate::util::bits::precision`], the component-A helper
//! for "smallest k with 2^k >= n".

use crate::config::{DEFAULT_ALPHA, MULOA_FIRST_PRIME, MULOA_MIN_LOG_COUNT, MULOA_SECOND_PRIME};
use crate::hash::key::HashKey;
use crate::util::bits::{is_power_of_two, precision};

const WORD_BITS: u32 = 64;

enum Slot<K, E> {
    Empty,
    Occupied { key: K, elt: E, h1: u64, h2: u64 },
    Placeholder,
}

/// Multiplicative-hashing open-addressed hash table with double probing.
pub struct HtMuloa<K, E> {
    slots: Vec<Slot<K, E>>,
    log_count: u32,
    num_elts: usize,
    num_placeholders: usize,
    alpha: f64,
    max_num_probes: usize,
    free_elt: Option<Box<dyn FnMut(E)>>,
    /// Optional key-reduction callback used in place of [`HashKey::hash_word`]
    /// (spec.md §4.F: "optional key-reduction callback used when `key_size
    /// > word_bits`").
    reduce_key: Option<Box<dyn Fn(&K) -> u64>>,
}

impl<K, E> HtMuloa<K, E>
where
    K: HashKey,
{
    /// Creates a new table. `min_num` pre-sizes `log_count` so the table
    /// holds at least `min_num` elements at load factor `alpha` without an
    /// immediate grow.
    pub fn new(
        min_num: u64,
        alpha: f64,
        free_elt: Option<Box<dyn FnMut(E)>>,
        reduce_key: Option<Box<dyn Fn(&K) -> u64>>,
    ) -> Self {
        let alpha = if alpha > 0.0 { alpha } else { DEFAULT_ALPHA };
        let min_count = if min_num == 0 {
            0.0
        } else {
            (min_num as f64 / alpha).ceil()
        };
        let log_count = precision(min_count as u64).max(MULOA_MIN_LOG_COUNT);
        let count = 1usize << log_count;
        debug_assert!(is_power_of_two(count as u64));
        HtMuloa {
            slots: (0..count).map(|_| Slot::Empty).collect(),
            log_count,
            num_elts: 0,
            num_placeholders: 0,
            alpha,
            max_num_probes: 0,
            free_elt,
            reduce_key,
        }
    }

    /// Current table size (`2^log_count`).
    pub fn count(&self) -> usize {
        self.slots.len()
    }

    /// Number of elements currently stored (placeholders do not count).
    pub fn num_elts(&self) -> usize {
        self.num_elts
    }

    /// Worst-case probe length observed so far.
    pub fn max_num_probes(&self) -> usize {
        self.max_num_probes
    }

    fn std_key(&self, key: &K) -> u64 {
        match &self.reduce_key {
            Some(f) => f(key),
            None => key.hash_word(),
        }
    }

    fn hashes(&self, key: &K) -> (u64, u64) {
        let sk = self.std_key(key);
        (
            MULOA_FIRST_PRIME.wrapping_mul(sk),
            MULOA_SECOND_PRIME.wrapping_mul(sk),
        )
    }

    fn start_probe(h1: u64, h2: u64, log_count: u32) -> (usize, u64) {
        let shift = WORD_BITS - log_count;
        let index = (h1 >> shift) as usize;
        let odd_step = (h2 >> shift) | 1;
        (index, odd_step)
    }

    /// Inserts `(key, elt)`, replacing the existing element (running
    /// `free_elt` on the displaced value) if `key` is already present.
    pub fn insert(&mut self, key: K, elt: E)
    where
        K: Clone,
    {
        let (h1, h2) = self.hashes(&key);
        let (mut idx, odd_step) = Self::start_probe(h1, h2, self.log_count);
        let count = self.slots.len() as u64;
        let mut first_placeholder: Option<usize> = None;
        let mut probes = 0usize;

        loop {
            probes += 1;
            match &mut self.slots[idx] {
                Slot::Occupied { key: k2, elt: e2, .. } if *k2 == key => {
                    let old = std::mem::replace(e2, elt);
                    if let Some(f) = self.free_elt.as_mut() {
                        f(old);
                    }
                    self.bump_probes(probes);
                    return;
                }
                Slot::Empty => {
                    let target = first_placeholder.unwrap_or(idx);
                    if first_placeholder.is_some() {
                        self.num_placeholders -= 1;
                    }
                    self.slots[target] = Slot::Occupied { key, elt, h1, h2 };
                    self.num_elts += 1;
                    self.bump_probes(probes);
                    self.maybe_resize();
                    return;
                }
                Slot::Placeholder => {
                    if first_placeholder.is_none() {
                        first_placeholder = Some(idx);
                    }
                }
                Slot::Occupied { .. } => {}
            }
            idx = ((idx as u64 + odd_step) % count) as usize;
        }
    }

    fn bump_probes(&mut self, probes: usize) {
        if probes > self.max_num_probes {
            self.max_num_probes = probes;
        }
    }

    /// Returns a reference to the element stored under `key`, or `None`.
    pub fn search(&self, key: &K) -> Option<&E> {
        let slot = self.find_slot(key)?;
        match &self.slots[slot] {
            Slot::Occupied { elt, .. } => Some(elt),
            _ => None,
        }
    }

    fn find_slot(&self, key: &K) -> Option<usize> {
        let (h1, h2) = self.hashes(key);
        let (mut idx, odd_step) = Self::start_probe(h1, h2, self.log_count);
        let count = self.slots.len() as u64;
        for _ in 0..self.slots.len() {
            match &self.slots[idx] {
                Slot::Occupied { key: k2, .. } if k2 == key => return Some(idx),
                Slot::Empty => return None,
                _ => {}
            }
            idx = ((idx as u64 + odd_step) % count) as usize;
        }
        None
    }

    /// Removes `key`, leaving a placeholder tombstone, and returns its
    /// element, or `None` if absent.
    pub fn remove(&mut self, key: &K) -> Option<E> {
        let slot = self.find_slot(key)?;
        let old = std::mem::replace(&mut self.slots[slot], Slot::Placeholder);
        let elt = match old {
            Slot::Occupied { elt, .. } => elt,
            _ => unreachable!(),
        };
        self.num_elts -= 1;
        self.num_placeholders += 1;
        self.maybe_resize();
        Some(elt)
    }

    /// Removes `key`, running `free_elt` on its element instead of
    /// returning it.
    pub fn delete(&mut self, key: &K) {
        if let Some(elt) = self.remove(key) {
            if let Some(f) = self.free_elt.as_mut() {
                f(elt);
            }
        }
    }

    fn maybe_resize(&mut self) {
        let load = (self.num_elts + self.num_placeholders) as f64 / self.slots.len() as f64;
        if load <= self.alpha {
            return;
        }
        if self.num_elts < self.num_placeholders {
            log::debug!("HtMuloa cleaning {} placeholders", self.num_placeholders);
            self.rehash(self.log_count);
        } else {
            log::debug!("HtMuloa growing from log_count {}", self.log_count);
            self.rehash(self.log_count + 1);
        }
    }

    /// Rebuilds the table at `new_log_count`, reusing each occupied slot's
    /// stored `(h1, h2)` — no multiplication is repeated.
    fn rehash(&mut self, new_log_count: u32) {
        let new_count = 1usize << new_log_count;
        let mut new_slots: Vec<Slot<K, E>> = (0..new_count).map(|_| Slot::Empty).collect();
        let old_slots = std::mem::replace(&mut self.slots, Vec::new());
        for slot in old_slots {
            if let Slot::Occupied { key, elt, h1, h2 } = slot {
                let (mut idx, odd_step) = Self::start_probe(h1, h2, new_log_count);
                loop {
                    if matches!(new_slots[idx], Slot::Empty) {
                        new_slots[idx] = Slot::Occupied { key, elt, h1, h2 };
                        break;
                    }
                    idx = ((idx as u64 + odd_step) % new_count as u64) as usize;
                }
            }
        }
        self.slots = new_slots;
        self.log_count = new_log_count;
        self.num_placeholders = 0;
    }
}
