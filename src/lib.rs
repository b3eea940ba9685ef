//! A generic hash-table, heap, and graph-algorithm kernel.
//!
//! - [`hash`] — HT-DIVCHN (division hashing, chained buckets), HT-MULOA
//!   (multiplicative hashing, open addressing), and a thread-safe batched
//!   variant of HT-DIVCHN.
//! - [`heap`] — a binary min-heap with a pluggable membership index, the
//!   piece that makes decrease-key-based algorithms practical.
//! - [`graph`] — an adjacency-list graph representation.
//! - [`algo`] — BFS, Dijkstra, Prim, and an exact Held-Karp TSP solver
//!   built on `hash`, `heap`, and `graph`.
//! - [`sort`] — a depth-capped, fork-join parallel mergesort.
//! - [`collections`] — generic stack, queue, and arena-backed
//!   doubly-linked-list building blocks shared by the above.
//! - [`random`] — the `RandomSource` seam used by the graph builders'
//!   Bernoulli-random edge generation.
//! - [`config`] — named tuning constants (load factors, prime tables,
//!   recursion/base-case thresholds) gathered in one place.
//! - [`util`] — small bit-twiddling helpers shared across modules.

pub mod algo;
pub mod collections;
pub mod config;
pub mod graph;
pub mod hash;
pub mod heap;
pub mod random;
pub mod sort;
pub mod util;

pub use algo::{bfs, dijkstra, prim, tsp, BfsResult, DijkstraResult, PrimResult, TspError, TspOutcome};
pub use graph::{AdjacencyList, Vertex};
pub use hash::{ConcurrentHtDivChn, HashKey, HtDivChn, HtMuloa};
pub use heap::{DenseIndex, Heap, MembershipIndex};
pub use random::{RandomSource, SplitMix64};
pub use sort::mergesort_parallel;
