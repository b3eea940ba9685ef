//! Dijkstra's shortest-path algorithm. Component I.
//!
//! Ported from spec.md §4.I, built directly on [`crate::heap::Heap`] with
//! the dense membership index: decrease-key on relaxation is what makes
//! this an O((V+E) log V) algorithm rather than an O(V^2) one.

use crate::algo::weight::Weight;
use crate::graph::{AdjacencyList, Vertex};
use crate::heap::{DenseIndex, Heap};

/// Result of a single-source shortest-path run.
pub struct DijkstraResult<W> {
    /// `dist[v]` is the shortest-path weight from the source to `v`, or
    /// `None` if `v` is unreachable.
    pub dist: Vec<Option<W>>,
    /// `pred[v]` is `v`'s predecessor on a shortest path from the source.
    pub pred: Vec<Option<Vertex>>,
}

/// Runs Dijkstra's algorithm from `source`. Edge weights must be
/// non-negative; this is a precondition, not checked at runtime (spec.md
/// §4.I leaves negative weights as undefined behavior rather than a
/// recoverable error, matching the original's documented assumption).
pub fn dijkstra<W: Weight>(graph: &AdjacencyList<W>, source: Vertex) -> DijkstraResult<W> {
    let n = graph.num_vertices();
    let mut dist: Vec<Option<W>> = vec![None; n];
    let mut pred: Vec<Option<Vertex>> = vec![None; n];
    let mut settled = vec![false; n];

    let mut heap: Heap<W, Vertex, DenseIndex> = Heap::with_capacity(n, DenseIndex::new(n));
    dist[source] = Some(W::ZERO);
    heap.push(W::ZERO, source);

    while let Some((du, u)) = heap.pop() {
        if settled[u] {
            continue;
        }
        settled[u] = true;
        for &(v, w) in graph.neighbors(u) {
            if settled[v] {
                continue;
            }
            let cand = du + w;
            let better = match dist[v] {
                None => true,
                Some(dv) => cand < dv,
            };
            if better {
                dist[v] = Some(cand);
                pred[v] = Some(u);
                if heap.contains(&v) {
                    heap.update(&v, cand);
                } else {
                    heap.push(cand, v);
                }
            }
        }
    }

    DijkstraResult { dist, pred }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> AdjacencyList<u32> {
        // Classic 5-vertex example.
        AdjacencyList::build_dir(
            5,
            vec![
                (0, 1, 10),
                (0, 3, 5),
                (1, 2, 1),
                (3, 1, 3),
                (3, 2, 9),
                (3, 4, 2),
                (2, 4, 4),
                (4, 2, 6),
                (4, 0, 7),
            ],
        )
    }

    #[test]
    fn shortest_paths_from_vertex_zero() {
        let g = sample_graph();
        let r = dijkstra(&g, 0);
        assert_eq!(r.dist[0], Some(0));
        assert_eq!(r.dist[1], Some(8));
        assert_eq!(r.dist[2], Some(9));
        assert_eq!(r.dist[3], Some(5));
        assert_eq!(r.dist[4], Some(7));
    }

    #[test]
    fn unreachable_vertex_has_no_distance() {
        let g: AdjacencyList<u32> = AdjacencyList::build_dir(3, vec![(0, 1, 1)]);
        let r = dijkstra(&g, 0);
        assert_eq!(r.dist[2], None);
    }

    #[test]
    fn predecessors_trace_back_a_shortest_path() {
        let g = sample_graph();
        let r = dijkstra(&g, 0);
        let mut v = 2;
        let mut path = vec![v];
        while let Some(p) = r.pred[v] {
            path.push(p);
            v = p;
        }
        path.reverse();
        assert_eq!(path.first(), Some(&0));
        assert_eq!(path.last(), Some(&2));
    }
}
