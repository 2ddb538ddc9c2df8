#![forbid(unsafe_code)]

//! Weighted edge-list graphs: parsing, adjacency construction, Dijkstra shortest paths and Prim
//! minimum spanning trees.
//!
//! The pipeline is `text -> GraphDescriptor -> AdjacencyMap -> {ShortestPaths, SpanningTree}`.
//! Both engines borrow the same adjacency map and never mutate it.

pub mod adjacency;
pub mod alg;
pub mod descriptor;
pub mod error;

pub use adjacency::{AdjacencyMap, Neighbors, SourceSelection};
pub use alg::dijkstra::{Distance, Parent, PathEntry, ShortestPaths, shortest_paths};
pub use alg::prim::{SpanningTree, TreeEdge, minimum_spanning_tree};
pub use descriptor::{Edge, GraphDescriptor, GraphKind, TokenLine, tokenize};
pub use error::{Error, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub strict: bool,
}

impl ParseOptions {
    /// Reject a header whose vertex count disagrees with the labels seen in the edge list.
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Accept header counts as declared; mismatches are only logged.
    pub fn lenient() -> Self {
        Self { strict: false }
    }
}

/// Everything computed for one input graph.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub descriptor: GraphDescriptor,
    pub adjacency: AdjacencyMap,
    pub source: SourceSelection,
    pub shortest_paths: ShortestPaths,
    pub spanning_tree: SpanningTree,
}

/// Runs the whole pipeline over edge-list `text`.
///
/// `source_override` takes precedence over a source line in the input. When neither is given the
/// first vertex of the adjacency map is used and [`SourceSelection::Fallback`] is reported.
pub fn analyze(
    text: &str,
    options: ParseOptions,
    source_override: Option<&str>,
) -> Result<Analysis> {
    let descriptor = GraphDescriptor::parse(text, options)?;
    let adjacency = AdjacencyMap::from_descriptor(&descriptor);
    let declared = source_override.or(descriptor.source.as_deref());
    let source = adjacency.resolve_source(declared)?;

    let shortest_paths = adjacency.shortest_paths(source.vertex())?;
    let spanning_tree = adjacency.minimum_spanning_tree(source.vertex())?;

    Ok(Analysis {
        descriptor,
        adjacency,
        source,
        shortest_paths,
        spanning_tree,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_runs_both_engines_from_the_declared_source() {
        let analysis = analyze("3 3 D\nA B 1\nB C 2\nA C 5\nA\n", ParseOptions::strict(), None)
            .unwrap();
        assert_eq!(analysis.source, SourceSelection::Declared("A".to_string()));
        assert_eq!(analysis.shortest_paths.distance("C"), Some(Distance::Finite(3)));
        assert_eq!(analysis.spanning_tree.total_weight(), 3);
    }

    #[test]
    fn source_override_wins_over_input() {
        let analysis = analyze("3 2 U\nA B 1\nB C 2\nA\n", ParseOptions::default(), Some("C"))
            .unwrap();
        assert_eq!(analysis.source.vertex(), "C");
        assert_eq!(analysis.shortest_paths.distance("A"), Some(Distance::Finite(3)));
    }

    #[test]
    fn unknown_override_is_an_error() {
        let err = analyze("2 1 D\nA B 1\n", ParseOptions::default(), Some("Z")).unwrap_err();
        assert_eq!(
            err,
            Error::UnknownVertex {
                vertex: "Z".to_string()
            }
        );
    }
}
