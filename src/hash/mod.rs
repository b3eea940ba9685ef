//! Hash tables — components E, F, and L of the design.
//!
//! - [`divchn`] — HT-DIVCHN, division hashing with chained buckets.
//! - [`muloa`] — HT-MULOA, multiplicative hashing with open addressing.
//! - [`concurrent`] — a thread-safe batched variant of HT-DIVCHN.
//! - [`key`] — the [`key::HashKey`] trait both single-threaded tables key on.

pub mod concurrent;
pub mod divchn;
pub mod key;
pub mod muloa;

pub use concurrent::ConcurrentHtDivChn;
pub use divchn::HtDivChn;
pub use key::HashKey;
pub use muloa::HtMuloa;
