//! Held-Karp dynamic-programming exact solver for the travelling-salesman
//! problem. Component K.
//!
//! Ported from spec.md §4.K. States are `(subset, last)` pairs — `subset`
//! a bitmask over the non-start vertices, `last` the most recently visited
//! one — memoized in this crate's own [`crate::hash::divchn::HtDivChn`]
//! rather than a dense `2^(n-1) * n` array, since most of that array would
//! sit empty for the graphs this is practical on (spec.md: "pluggable
//! subset-hash table" in place of a dense DP table).
//!
//! spec.md §9 leaves subset width greater than the host word size as an
//! open question; this port resolves it by failing fast with
//! [`TspError::SubsetTooWide`] rather than leaving the behavior undefined.
//! The bound is 57, not 64: [`dp_key`] packs `mask << 7 | last` into one
//! `u64`, so the mask only has 57 bits to live in before it collides with
//! the 7 reserved for `last`.

use std::fmt;

use crate::algo::weight::Weight;
use crate::graph::{AdjacencyList, Vertex};
use crate::hash::divchn::HtDivChn;

/// The outcome of a Held-Karp TSP search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TspOutcome<W> {
    /// A minimum-weight tour was found, starting and ending at the
    /// original `start` vertex.
    Tour { weight: W, order: Vec<Vertex> },
    /// No Hamiltonian tour exists (the graph is missing edges the tour
    /// would need).
    NoTourExists,
}

/// Error returned instead of attempting a search the subset bitmask can't
/// represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TspError {
    /// `n - 1` non-start vertices exceed the 64-bit subset bitmask width.
    SubsetTooWide { n: usize },
}

impl fmt::Display for TspError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TspError::SubsetTooWide { n } => write!(
                f,
                "graph has {n} vertices; Held-Karp subset masks need n - 1 <= {MAX_NON_START_VERTICES}"
            ),
        }
    }
}

impl std::error::Error for TspError {}

const MAX_NON_START_VERTICES: usize = 57;

#[derive(Clone, Copy)]
struct DpEntry<W> {
    weight: W,
    prev: Option<usize>,
}

fn dp_key(mask: u64, last: usize) -> u64 {
    (mask << 7) | last as u64
}

/// Solves the travelling-salesman problem exactly via Held-Karp DP, over
/// the complete set of edges present in `graph` (treated as directed;
/// build `graph` with [`AdjacencyList::build_undir`] for a symmetric
/// instance). Returns [`TspError::SubsetTooWide`] if `graph` has more than
/// `MAX_NON_START_VERTICES + 1` vertices.
pub fn tsp<W: Weight>(graph: &AdjacencyList<W>, start: Vertex) -> Result<TspOutcome<W>, TspError> {
    let n = graph.num_vertices();
    let others: Vec<Vertex> = (0..n).filter(|&v| v != start).collect();
    let m = others.len();
    if m > MAX_NON_START_VERTICES {
        return Err(TspError::SubsetTooWide { n });
    }
    if m == 0 {
        return Ok(TspOutcome::Tour {
            weight: W::ZERO,
            order: vec![start],
        });
    }

    // Dense weight lookup, built once from the adjacency lists.
    let mut weight_of: Vec<Vec<Option<W>>> = vec![vec![None; n]; n];
    for u in 0..n {
        for &(v, w) in graph.neighbors(u) {
            weight_of[u][v] = Some(w);
        }
    }

    let mut dp: HtDivChn<u64, DpEntry<W>> = HtDivChn::new(0, 0.75, None);

    for i in 0..m {
        if let Some(w) = weight_of[start][others[i]] {
            let mask = 1u64 << i;
            dp.insert(dp_key(mask, i), DpEntry { weight: w, prev: None });
        }
    }

    let full_mask = (1u64 << m) - 1;
    let mut mask = 1u64;
    while mask <= full_mask {
        if mask.count_ones() >= 2 {
            for i in 0..m {
                if mask & (1 << i) == 0 {
                    continue;
                }
                let prev_mask = mask & !(1 << i);
                let mut best: Option<DpEntry<W>> = None;
                for k in 0..m {
                    if k == i || prev_mask & (1 << k) == 0 {
                        continue;
                    }
                    let Some(prev_entry) = dp.search(&dp_key(prev_mask, k)) else {
                        continue;
                    };
                    let Some(edge_w) = weight_of[others[k]][others[i]] else {
                        continue;
                    };
                    let cand = prev_entry.weight + edge_w;
                    if best.map_or(true, |b| cand < b.weight) {
                        best = Some(DpEntry { weight: cand, prev: Some(k) });
                    }
                }
                if let Some(entry) = best {
                    dp.insert(dp_key(mask, i), entry);
                }
            }
        }
        mask += 1;
    }

    let mut best_last: Option<(usize, W)> = None;
    for i in 0..m {
        let Some(entry) = dp.search(&dp_key(full_mask, i)) else {
            continue;
        };
        let Some(closing_w) = weight_of[others[i]][start] else {
            continue;
        };
        let total = entry.weight + closing_w;
        if best_last.map_or(true, |(_, w)| total < w) {
            best_last = Some((i, total));
        }
    }

    let Some((mut last, total_weight)) = best_last else {
        return Ok(TspOutcome::NoTourExists);
    };

    let mut mask = full_mask;
    let mut rev_order = vec![others[last]];
    loop {
        let entry = *dp.search(&dp_key(mask, last)).expect("dp entry must exist along the reconstructed path");
        match entry.prev {
            Some(prev_last) => {
                mask &= !(1 << last);
                last = prev_last;
                rev_order.push(others[last]);
            }
            None => break,
        }
    }
    rev_order.push(start);
    rev_order.reverse();
    rev_order.push(start);

    Ok(TspOutcome::Tour {
        weight: total_weight,
        order: rev_order,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_graph_4() -> AdjacencyList<u32> {
        // A small asymmetric-weight complete digraph with a known optimum.
        let edges = vec![
            (0, 1, 10), (0, 2, 15), (0, 3, 20),
            (1, 0, 10), (1, 2, 35), (1, 3, 25),
            (2, 0, 15), (2, 1, 35), (2, 3, 30),
            (3, 0, 20), (3, 1, 25), (3, 2, 30),
        ];
        AdjacencyList::build_dir(4, edges)
    }

    #[test]
    fn finds_the_optimal_tour_on_a_small_complete_graph() {
        let g = complete_graph_4();
        let outcome = tsp(&g, 0).unwrap();
        match outcome {
            TspOutcome::Tour { weight, order } => {
                assert_eq!(weight, 80);
                assert_eq!(order.len(), 5);
                assert_eq!(order.first(), Some(&0));
                assert_eq!(order.last(), Some(&0));
            }
            TspOutcome::NoTourExists => panic!("expected a tour"),
        }
    }

    #[test]
    fn reports_no_tour_when_edges_are_missing() {
        let g: AdjacencyList<u32> = AdjacencyList::build_dir(4, vec![(0, 1, 1), (1, 2, 1)]);
        let outcome = tsp(&g, 0).unwrap();
        assert_eq!(outcome, TspOutcome::NoTourExists);
    }

    #[test]
    fn single_vertex_graph_has_a_trivial_zero_weight_tour() {
        let g: AdjacencyList<u32> = AdjacencyList::new(1);
        let outcome = tsp(&g, 0).unwrap();
        assert_eq!(
            outcome,
            TspOutcome::Tour { weight: 0, order: vec![0] }
        );
    }

    #[test]
    fn too_many_vertices_reports_subset_too_wide() {
        let g: AdjacencyList<u32> = AdjacencyList::new(66);
        assert_eq!(tsp(&g, 0), Err(TspError::SubsetTooWide { n: 66 }));
    }
}
