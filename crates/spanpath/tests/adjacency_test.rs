use spanpath::{AdjacencyMap, Edge, GraphDescriptor, GraphKind, ParseOptions};

fn build(text: &str) -> AdjacencyMap {
    let d = GraphDescriptor::parse(text, ParseOptions::default()).unwrap();
    AdjacencyMap::from_descriptor(&d)
}

#[test]
fn directed_edges_keep_direction() {
    let g = build("3 2 D\nA B 1\nB C 2\n");
    assert_eq!(g.kind(), GraphKind::Directed);
    assert_eq!(g.weight("A", "B"), Some(1));
    assert_eq!(g.weight("B", "A"), None);
    assert_eq!(g.arc_count(), 2);
}

#[test]
fn every_endpoint_has_an_entry() {
    let g = build("3 2 D\nA B 1\nA C 2\n");
    assert_eq!(g.len(), 3);
    assert!(g.contains("B"));
    assert!(g.neighbors("C").is_some_and(|n| n.is_empty()));
}

#[test]
fn duplicate_edge_last_write_wins() {
    let g = build("2 2 D\nA B 5\nA B 2\n");
    assert_eq!(g.weight("A", "B"), Some(2));
    assert_eq!(g.arc_count(), 1);
}

#[test]
fn undirected_edges_are_symmetric() {
    let g = build("4 4 U\nA B 1\nB C 7\nC D 3\nD A 2\n");
    for (a, b, w) in [("A", "B", 1), ("B", "C", 7), ("C", "D", 3), ("D", "A", 2)] {
        assert_eq!(g.weight(a, b), Some(w));
        assert_eq!(g.weight(b, a), Some(w));
    }
    assert_eq!(g.arc_count(), 8);
}

#[test]
fn vertices_keep_first_seen_order() {
    let g = build("4 3 D\nq r 1\nb q 1\na r 1\n");
    assert_eq!(g.vertices().collect::<Vec<_>>(), vec!["q", "r", "b", "a"]);
}

#[test]
fn self_loops_pass_through_as_ordinary_edges() {
    let g = AdjacencyMap::from_edges(GraphKind::Undirected, &[Edge::new("a", "a", 3)]);
    assert_eq!(g.len(), 1);
    assert_eq!(g.weight("a", "a"), Some(3));
}

#[test]
fn serializes_as_nested_map() {
    let g = build("2 1 U\nA B 4\n");
    let json = serde_json::to_value(&g).unwrap();
    assert_eq!(json, serde_json::json!({ "A": { "B": 4 }, "B": { "A": 4 } }));
}
