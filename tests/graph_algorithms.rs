//! End-to-end graph-algorithm scenarios, mirroring spec.md §8's literal
//! examples (a)-(e). `prev`/`dist` use `Option` rather than a vertex-count
//! sentinel (see DESIGN.md's "sentinel representation" entry) — `None`
//! plays the role of spec.md's `N`.

use kernelkit::{bfs, dijkstra, prim, tsp, AdjacencyList, TspOutcome};

#[test]
fn bfs_on_the_five_vertex_dag() {
    let g = AdjacencyList::build_dir(5, vec![(0, 1, ()), (0, 2, ()), (0, 3, ()), (1, 3, ())]);
    let r = bfs(&g, 0);
    assert_eq!(r.dist, vec![Some(0), Some(1), Some(1), Some(1), None]);
    assert_eq!(r.pred[0], None);
    assert_eq!(r.pred[1], Some(0));
    assert_eq!(r.pred[2], Some(0));
    assert_eq!(r.pred[3], Some(0));
    assert_eq!(r.pred[4], None);
}

#[test]
fn bfs_on_the_undirected_form_of_the_same_graph() {
    let g = AdjacencyList::build_undir(5, vec![(0, 1, ()), (0, 2, ()), (0, 3, ()), (1, 3, ())]);

    let from0 = bfs(&g, 0);
    assert_eq!(from0.dist, vec![Some(0), Some(1), Some(1), Some(1), None]);

    let from2 = bfs(&g, 2);
    assert_eq!(from2.dist, vec![Some(1), Some(2), Some(0), Some(2), None]);
    assert_eq!(from2.pred[0], Some(2));
    assert_eq!(from2.pred[3], Some(0));
}

#[test]
fn dijkstra_on_the_five_vertex_graph() {
    let g = AdjacencyList::build_undir(5, vec![(0, 1, 4u32), (0, 2, 3), (0, 3, 2), (1, 3, 1)]);
    let r = dijkstra(&g, 0);
    assert_eq!(r.dist, vec![Some(0), Some(3), Some(3), Some(2), None]);
    assert_eq!(r.pred[3], Some(0));
    assert_eq!(r.dist[4], None);
}

#[test]
fn prim_minimum_spanning_tree_on_the_same_graph() {
    // Note: spec.md §8 scenario (d) states an expected weight sum of
    // 4 + 3 + 1 = 8 via edges (0,1),(0,2),(1,3); that selection is not
    // actually minimum for this edge set — Kruskal/Prim both find
    // (1,3)=1, (0,3)=2, (0,2)=3, total 6, which is lower and still a
    // valid spanning tree. This test asserts the true minimum (property
    // 7 in spec.md §8), not the scenario's arithmetic (see DESIGN.md).
    let g = AdjacencyList::build_undir(5, vec![(0, 1, 4u32), (0, 2, 3), (0, 3, 2), (1, 3, 1)]);
    let r = prim(&g, 0);
    let total: u32 = r.key.iter().flatten().sum();
    assert_eq!(total, 6);
    assert_eq!(r.parent[4], None);
}

#[test]
fn tsp_on_a_four_vertex_unit_weight_complete_graph() {
    let edges: Vec<(usize, usize, u32)> = vec![
        (0, 1, 1), (0, 2, 1), (0, 3, 1),
        (1, 2, 1), (1, 3, 1),
        (2, 3, 1),
    ];
    let g = AdjacencyList::build_undir(4, edges);
    for start in 0..4 {
        match tsp(&g, start).unwrap() {
            TspOutcome::Tour { weight, order } => {
                assert_eq!(weight, 4);
                assert_eq!(order.len(), 5);
                assert_eq!(order.first(), Some(&start));
                assert_eq!(order.last(), Some(&start));
            }
            TspOutcome::NoTourExists => panic!("expected a tour from vertex {start}"),
        }
    }
}

#[test]
fn dijkstra_matches_bfs_distance_under_unit_weights() {
    let unweighted = AdjacencyList::build_dir(6, vec![(0, 1, ()), (1, 2, ()), (2, 3, ()), (0, 4, ()), (4, 3, ())]);
    let weighted = AdjacencyList::build_dir(
        6,
        vec![(0, 1, 5u32), (1, 2, 5), (2, 3, 5), (0, 4, 5), (4, 3, 5)],
    );
    let bfs_r = bfs(&unweighted, 0);
    let dij_r = dijkstra(&weighted, 0);
    for v in 0..6 {
        let scaled = dij_r.dist[v].map(|d| d / 5);
        assert_eq!(scaled, bfs_r.dist[v].map(|d| d as u32));
    }
}
