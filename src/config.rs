//! Compile-time configuration constants shared across the kernel.
//!
//! Mirrors the role of the teacher crate's `config.rs` (named, documented
//! constants gathered in one place rather than scattered magic numbers),
//! adapted from LZ4's build-time knobs to this crate's load-factor,
//! concurrency, and sort tuning knobs.

/// Default load-factor bound (α) for HT-DIVCHN and HT-MULOA when the
/// caller doesn't supply one.
pub const DEFAULT_ALPHA: f64 = 0.75;

/// Ascending prime table used by HT-DIVCHN's grow sequence (component E).
/// Each successive entry is roughly double the previous one, which keeps
/// amortized grow cost logarithmic. The table saturates at its last entry:
/// once `count_ix` reaches `PRIMES.len() - 1`, further growth is skipped
/// and α is no longer bounded (spec.md §4.E's `PrecisionSaturation`).
pub const PRIMES: &[u64] = &[
    11,
    23,
    47,
    97,
    197,
    397,
    797,
    1_597,
    3_203,
    6_421,
    12_853,
    25_717,
    51_437,
    102_877,
    205_759,
    411_527,
    823_117,
    1_646_237,
    3_292_489,
    6_584_983,
    13_169_977,
    26_339_969,
    52_679_969,
    105_359_939,
    210_719_881,
    421_439_783,
    842_879_579,
    1_685_759_167,
];

/// Odd constant just below `2^64`, used as HT-MULOA's first multiplicative
/// hash constant (spec.md §4.F: "each a fixed constant at or just below
/// `2^word_bits`").
pub const MULOA_FIRST_PRIME: u64 = 0xFFFF_FFFF_FFFF_FFC5;

/// Second odd constant for HT-MULOA's double-hash step.
pub const MULOA_SECOND_PRIME: u64 = 0xFFFF_FFFF_FFFF_FFAB;

/// Minimum `log_count` (so `count` never starts smaller than 8 slots).
pub const MULOA_MIN_LOG_COUNT: u32 = 3;

/// Recursion-depth cap before [`crate::sort::mergesort_parallel`] stops
/// spawning new parallel `rayon::join` branches and falls back to serial
/// recursion. Mirrors `MAX_ONTHREAD_REC` from spec.md §5.
pub const MAX_ONTHREAD_REC: u32 = 20;

/// Below this slice length, [`crate::sort::mergesort_parallel`] sorts
/// serially with `sort_unstable` instead of recursing (spec.md's
/// `sbase_count`).
pub const MERGESORT_SERIAL_BASE: usize = 1 << 12;

/// Below this combined length, a merge step runs sequentially instead of
/// via parallel binary-search merge (spec.md's `mbase_count`).
pub const MERGESORT_MERGE_BASE: usize = 1 << 13;

/// Target average element count per shard for
/// [`crate::hash::concurrent::ConcurrentHtDivChn`]. Each shard is itself a
/// self-growing [`crate::hash::divchn::HtDivChn`] that already keeps its own
/// `num_elts / count` at or below α, so an aggregate load factor across
/// shards can never exceed α either — growing the *shard count* needs its
/// own, independent trigger, and this is it.
pub const CONCURRENT_SHARD_TARGET_ELTS: usize = 1024;
