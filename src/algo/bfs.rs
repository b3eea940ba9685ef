//! Breadth-first search. Component H.
//!
//! Ported from spec.md §4.H. Distances are edge counts from `source`,
//! unreached vertices are `None` — the Rust reading of the C original's
//! "unreached" sentinel distance.

use crate::collections::queue::Queue;
use crate::graph::{AdjacencyList, Vertex};

/// Result of a breadth-first traversal from a single source.
pub struct BfsResult {
    /// `dist[v]` is the number of edges on a shortest path from the
    /// source to `v`, or `None` if `v` is unreachable.
    pub dist: Vec<Option<u64>>,
    /// `pred[v]` is `v`'s predecessor on a shortest path from the source,
    /// or `None` for the source itself and unreachable vertices.
    pub pred: Vec<Option<Vertex>>,
}

/// Runs BFS from `source` over `graph`, ignoring edge weights.
pub fn bfs<W>(graph: &AdjacencyList<W>, source: Vertex) -> BfsResult {
    let n = graph.num_vertices();
    let mut dist = vec![None; n];
    let mut pred = vec![None; n];
    dist[source] = Some(0);

    let mut frontier = Queue::new();
    frontier.enqueue(source);

    while let Some(u) = frontier.dequeue() {
        let du = dist[u].unwrap();
        for &(v, _) in graph.neighbors(u) {
            if dist[v].is_none() {
                dist[v] = Some(du + 1);
                pred[v] = Some(u);
                frontier.enqueue(v);
            }
        }
    }

    BfsResult { dist, pred }
}
