//! Adjacency-list graph representation — component D.

pub mod adjacency;

pub use adjacency::{AdjacencyList, Vertex};
