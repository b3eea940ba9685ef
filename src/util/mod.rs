//! Cross-cutting utilities shared by the hash tables, heap, and graph
//! algorithms.
//!
//! Submodules:
//! - [`bits`] — power-of-two tests, overflow-free modular arithmetic, and
//!   bit-precision helpers (component A of the design).

pub mod bits;
