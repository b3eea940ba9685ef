//! Adjacency-list graph representation. Component D.
//!
//! Ported from spec.md §4.D. Rust's type layout already guarantees each
//! `(Vertex, W)` pair is packed without padding games, so the C original's
//! manual `pair_size`/`wt_offset` cache-alignment bookkeeping has no
//! counterpart here (spec.md §9) — a plain `Vec<(Vertex, W)>` per vertex is
//! the whole representation.

use crate::random::RandomSource;

/// A graph vertex, numbered `0..num_vertices`.
pub type Vertex = usize;

/// An adjacency-list graph over `num_vertices` vertices with edge weights
/// `W`. Built once directed or undirected; `add_undir_edge` mirrors each
/// edge into both endpoints' lists so callers never have to special-case
/// direction when walking [`AdjacencyList::neighbors`].
#[derive(Debug, Clone)]
pub struct AdjacencyList<W> {
    adj: Vec<Vec<(Vertex, W)>>,
    num_es: usize,
}

impl<W> AdjacencyList<W> {
    /// Creates an empty graph over `num_vertices` vertices.
    pub fn new(num_vertices: usize) -> Self {
        AdjacencyList {
            adj: (0..num_vertices).map(|_| Vec::new()).collect(),
            num_es: 0,
        }
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.adj.len()
    }

    /// Number of edges added (an undirected edge counts once, matching
    /// spec.md's edge-count convention).
    pub fn num_es(&self) -> usize {
        self.num_es
    }

    /// `u`'s outgoing edges as `(neighbor, weight)` pairs.
    pub fn neighbors(&self, u: Vertex) -> &[(Vertex, W)] {
        &self.adj[u]
    }

    /// Adds a directed edge `u -> v` with weight `w`.
    pub fn add_dir_edge(&mut self, u: Vertex, v: Vertex, w: W) {
        self.adj[u].push((v, w));
        self.num_es += 1;
    }

    /// Builds a directed graph over `num_vertices` vertices from `edges`.
    pub fn build_dir(num_vertices: usize, edges: impl IntoIterator<Item = (Vertex, Vertex, W)>) -> Self {
        let mut g = Self::new(num_vertices);
        for (u, v, w) in edges {
            g.add_dir_edge(u, v, w);
        }
        g
    }
}

impl<W: Clone> AdjacencyList<W> {
    /// Adds an undirected edge `{u, v}` with weight `w`, mirrored into both
    /// endpoints' adjacency lists. Counts as a single edge.
    pub fn add_undir_edge(&mut self, u: Vertex, v: Vertex, w: W) {
        self.adj[u].push((v, w.clone()));
        if u != v {
            self.adj[v].push((u, w));
        }
        self.num_es += 1;
    }

    /// Builds an undirected graph over `num_vertices` vertices from `edges`.
    pub fn build_undir(num_vertices: usize, edges: impl IntoIterator<Item = (Vertex, Vertex, W)>) -> Self {
        let mut g = Self::new(num_vertices);
        for (u, v, w) in edges {
            g.add_undir_edge(u, v, w);
        }
        g
    }

    /// Adds the directed edge `u -> v` with probability `p`, drawn from
    /// `rng` (spec.md §4.D's Bernoulli random-graph builder).
    pub fn add_dir_edge_bernoulli<R: RandomSource>(&mut self, u: Vertex, v: Vertex, w: W, p: f64, rng: &mut R) {
        if rng.bernoulli(p) {
            self.add_dir_edge(u, v, w);
        }
    }

    /// Adds the undirected edge `{u, v}` with probability `p`, drawn from
    /// `rng`.
    pub fn add_undir_edge_bernoulli<R: RandomSource>(&mut self, u: Vertex, v: Vertex, w: W, p: f64, rng: &mut R) {
        if rng.bernoulli(p) {
            self.add_undir_edge(u, v, w);
        }
    }

    /// Builds a random directed graph: every ordered pair `(u, v)` with
    /// `u != v` gets an edge independently with probability `p`, weighted
    /// by `weight_fn(u, v)`.
    pub fn rand_dir<R: RandomSource>(
        num_vertices: usize,
        p: f64,
        mut weight_fn: impl FnMut(Vertex, Vertex) -> W,
        rng: &mut R,
    ) -> Self {
        let mut g = Self::new(num_vertices);
        for u in 0..num_vertices {
            for v in 0..num_vertices {
                if u == v {
                    continue;
                }
                g.add_dir_edge_bernoulli(u, v, weight_fn(u, v), p, rng);
            }
        }
        g
    }

    /// Builds a random undirected graph: every unordered pair `{u, v}`
    /// with `u != v` gets an edge independently with probability `p`.
    pub fn rand_undir<R: RandomSource>(
        num_vertices: usize,
        p: f64,
        mut weight_fn: impl FnMut(Vertex, Vertex) -> W,
        rng: &mut R,
    ) -> Self {
        let mut g = Self::new(num_vertices);
        for u in 0..num_vertices {
            for v in (u + 1)..num_vertices {
                g.add_undir_edge_bernoulli(u, v, weight_fn(u, v), p, rng);
            }
        }
        g
    }
}
