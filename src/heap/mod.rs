//! Generic min-heap with a pluggable membership index — component G.
//!
//! - [`index`] — the [`index::MembershipIndex`] trait and its [`index::DenseIndex`]
//!   default, plus hash-table-backed implementations for sparse element universes.
//! - [`heap`] — the [`heap::Heap`] itself.

pub mod heap;
pub mod index;

pub use heap::Heap;
pub use index::{DenseIndex, MembershipIndex};
