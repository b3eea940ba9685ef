//! Prim's minimum spanning tree algorithm. Component J.
//!
//! Ported from spec.md §4.J: Dijkstra-shaped, but keyed on "cheapest known
//! edge into the tree" rather than "shortest known path from the source",
//! so it shares [`crate::heap::Heap`]'s decrease-key machinery with
//! [`crate::algo::dijkstra`] wholesale.

use crate::algo::weight::Weight;
use crate::graph::{AdjacencyList, Vertex};
use crate::heap::{DenseIndex, Heap};

/// Result of running Prim's algorithm from an arbitrary root.
pub struct PrimResult<W> {
    /// `parent[v]` is `v`'s edge into the tree, or `None` for the root and
    /// for vertices unreachable from it (a disconnected graph yields a
    /// minimum spanning forest, one tree per call needed per component).
    pub parent: Vec<Option<Vertex>>,
    /// `key[v]` is the weight of `v`'s tree edge, or `None` for the root
    /// and unreached vertices.
    pub key: Vec<Option<W>>,
}

/// Runs Prim's algorithm starting from `root` over an undirected,
/// non-negatively weighted graph.
pub fn prim<W: Weight>(graph: &AdjacencyList<W>, root: Vertex) -> PrimResult<W> {
    let n = graph.num_vertices();
    let mut parent: Vec<Option<Vertex>> = vec![None; n];
    let mut key: Vec<Option<W>> = vec![None; n];
    let mut in_tree = vec![false; n];

    let mut heap: Heap<W, Vertex, DenseIndex> = Heap::with_capacity(n, DenseIndex::new(n));
    key[root] = Some(W::ZERO);
    heap.push(W::ZERO, root);

    while let Some((_, u)) = heap.pop() {
        if in_tree[u] {
            continue;
        }
        in_tree[u] = true;
        for &(v, w) in graph.neighbors(u) {
            if in_tree[v] {
                continue;
            }
            let better = match key[v] {
                None => true,
                Some(kv) => w < kv,
            };
            if better {
                key[v] = Some(w);
                parent[v] = Some(u);
                if heap.contains(&v) {
                    heap.update(&v, w);
                } else {
                    heap.push(w, v);
                }
            }
        }
    }

    PrimResult { parent, key }
}

/// Total weight of the spanning tree `result` describes.
pub fn total_weight<W: Weight>(result: &PrimResult<W>) -> W {
    result
        .key
        .iter()
        .flatten()
        .fold(W::ZERO, |acc, &w| acc + w)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> AdjacencyList<u32> {
        AdjacencyList::build_undir(
            5,
            vec![
                (0, 1, 10),
                (0, 3, 5),
                (1, 2, 1),
                (3, 1, 3),
                (3, 2, 9),
                (3, 4, 2),
                (2, 4, 4),
            ],
        )
    }

    #[test]
    fn minimum_spanning_tree_total_weight() {
        let g = sample_graph();
        let r = prim(&g, 0);
        // 0-3 (5) + 3-1 (3) + 1-2 (1) + 3-4 (2) = 11
        assert_eq!(total_weight(&r), 11);
        assert_eq!(r.parent[0], None);
    }

    #[test]
    fn disconnected_component_leaves_parent_absent() {
        let g: AdjacencyList<u32> = AdjacencyList::build_undir(4, vec![(0, 1, 1)]);
        let r = prim(&g, 0);
        assert_eq!(r.parent[2], None);
        assert_eq!(r.key[2], None);
        assert_eq!(r.parent[3], None);
    }
}
