use spanpath::{Edge, Error, GraphDescriptor, GraphKind, ParseOptions};

fn parse(text: &str) -> Result<GraphDescriptor, Error> {
    GraphDescriptor::parse(text, ParseOptions::default())
}

#[test]
fn parses_header_edges_and_source() {
    let d = parse("3 3 D\nA B 1\nB C 2\nA C 5\nA\n").unwrap();
    assert_eq!(d.vertex_count, 3);
    assert_eq!(d.edge_count, 3);
    assert_eq!(d.kind, GraphKind::Directed);
    assert_eq!(d.source.as_deref(), Some("A"));
    assert_eq!(
        d.edges,
        vec![
            Edge::new("A", "B", 1),
            Edge::new("B", "C", 2),
            Edge::new("A", "C", 5),
        ]
    );
}

#[test]
fn source_line_is_optional() {
    let d = parse("2 1 U\nx y 4").unwrap();
    assert_eq!(d.kind, GraphKind::Undirected);
    assert_eq!(d.source, None);
}

#[test]
fn from_str_is_lenient() {
    let d: GraphDescriptor = "9 1 D\na b 1\n".parse().unwrap();
    assert_eq!(d.vertex_count, 9);
    assert_eq!(d.observed_vertex_count(), 2);
}

#[test]
fn header_must_have_three_tokens() {
    assert_eq!(
        parse("3 2\nA B 1\n").unwrap_err(),
        Error::MalformedHeader { line: 1, found: 2 }
    );
    assert_eq!(
        parse("").unwrap_err(),
        Error::MalformedHeader { line: 1, found: 0 }
    );
}

#[test]
fn counts_must_be_integers() {
    assert_eq!(
        parse("three 1 D\nA B 1\n").unwrap_err(),
        Error::InvalidInteger {
            line: 1,
            field: "vertex count",
            token: "three".to_string(),
        }
    );
}

#[test]
fn negative_counts_are_reported_as_such() {
    let err = parse("2 -1 D\n").unwrap_err();
    assert_eq!(
        err,
        Error::NegativeCount {
            line: 1,
            field: "edge count",
            token: "-1".to_string(),
        }
    );
    assert!(err.is_malformed_input());
    assert_eq!(
        err.to_string(),
        "line 1: edge count must be a non-negative integer, got `-1`"
    );
}

#[test]
fn graph_type_must_be_d_or_u() {
    assert_eq!(
        parse("2 1 X\nA B 1\n").unwrap_err(),
        Error::UnknownGraphKind {
            line: 1,
            token: "X".to_string(),
        }
    );
}

#[test]
fn edge_lines_need_three_tokens() {
    assert_eq!(
        parse("3 2 D\nA B 1\nB C 2 7\n").unwrap_err(),
        Error::MalformedEdge { line: 3, found: 4 }
    );
}

#[test]
fn weights_must_be_integers() {
    assert_eq!(
        parse("2 1 D\nA B 1.5\n").unwrap_err(),
        Error::InvalidInteger {
            line: 2,
            field: "weight",
            token: "1.5".to_string(),
        }
    );
}

#[test]
fn weights_up_to_u64_max_are_accepted() {
    let d = parse("2 1 D\nA B 18446744073709551615\nA\n").unwrap();
    assert_eq!(d.edges, vec![Edge::new("A", "B", u64::MAX)]);
}

#[test]
fn negative_weights_are_rejected() {
    let err = parse("2 1 D\nA B -3\n").unwrap_err();
    assert_eq!(err, Error::NegativeWeight { line: 2, weight: -3 });
    assert!(err.is_malformed_input());
}

#[test]
fn fewer_edge_lines_than_declared() {
    assert_eq!(
        parse("3 3 D\nA B 1\nB C 2\n").unwrap_err(),
        Error::MissingEdges {
            expected: 3,
            found: 2,
        }
    );
}

#[test]
fn extra_edge_lines_are_trailing_input() {
    assert_eq!(
        parse("3 1 D\nA B 1\nB C 2\n").unwrap_err(),
        Error::TrailingInput { line: 3 }
    );
    assert_eq!(
        parse("3 1 D\nA B 1\nA\nB\n").unwrap_err(),
        Error::TrailingInput { line: 3 }
    );
}

#[test]
fn blank_lines_are_ignored() {
    let d = parse("\n2 1 D\n\nA B 1\n\nA\n\n").unwrap();
    assert_eq!(d.edges.len(), 1);
    assert_eq!(d.source.as_deref(), Some("A"));
}

#[test]
fn declared_vertex_count_is_not_validated_by_default() {
    let d = parse("10 1 D\nA B 1\n").unwrap();
    assert_eq!(d.vertex_count, 10);
}

#[test]
fn strict_parsing_checks_vertex_count() {
    let err = GraphDescriptor::parse("10 1 D\nA B 1\n", ParseOptions::strict()).unwrap_err();
    assert_eq!(
        err,
        Error::VertexCountMismatch {
            declared: 10,
            observed: 2,
        }
    );
    assert!(GraphDescriptor::parse("2 1 D\nA B 1\n", ParseOptions::strict()).is_ok());
}

#[test]
fn error_messages_name_the_line() {
    let err = parse("2 1 D\nA B x\n").unwrap_err();
    assert_eq!(err.to_string(), "line 2: weight must be an integer, got `x`");
}
