//! Minimum spanning tree (Prim) of the component reachable from a source vertex.

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap};

use serde::Serialize;

use crate::adjacency::{AdjacencyMap, FxIndexMap};
use crate::error::{Error, Result};

/// A tree edge as seen from its parent endpoint.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TreeEdge {
    pub weight: u64,
    pub child: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpanningTree {
    source: String,
    /// Visit order; the source comes first.
    covered: Vec<String>,
    children: FxIndexMap<String, BTreeSet<TreeEdge>>,
}

impl SpanningTree {
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether `v` is part of the tree (reachable from the source).
    pub fn covers(&self, v: &str) -> bool {
        self.covered.iter().any(|c| c == v)
    }

    pub fn covered(&self) -> impl Iterator<Item = &str> {
        self.covered.iter().map(String::as_str)
    }

    /// Outgoing tree edges recorded under `v`, if any.
    pub fn children(&self, v: &str) -> Option<&BTreeSet<TreeEdge>> {
        self.children.get(v)
    }

    /// Parents in the order they first received a tree edge.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<TreeEdge>)> {
        self.children.iter().map(|(v, c)| (v.as_str(), c))
    }

    /// Parents sorted by vertex label.
    pub fn sorted(&self) -> Vec<(&str, &BTreeSet<TreeEdge>)> {
        let mut out: Vec<_> = self.iter().collect();
        out.sort_by(|a, b| a.0.cmp(b.0));
        out
    }

    /// Every tree edge as `(parent, edge)`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &TreeEdge)> {
        self.iter()
            .flat_map(|(parent, children)| children.iter().map(move |e| (parent, e)))
    }

    pub fn edge_count(&self) -> usize {
        self.children.values().map(BTreeSet::len).sum()
    }

    pub fn total_weight(&self) -> u64 {
        self.edges().map(|(_, e)| e.weight).sum()
    }
}

/// Grows a minimum spanning tree outward from `source`.
///
/// Candidate edges are `(weight, from, to)` with vertices as adjacency indices. A vertex may sit
/// in the heap several times; only its first extraction while still unvisited adds a tree edge.
/// Vertices not reachable from `source` are left out.
pub fn minimum_spanning_tree(graph: &AdjacencyMap, source: &str) -> Result<SpanningTree> {
    let Some(source_ix) = graph.index_of(source) else {
        return Err(Error::UnknownVertex {
            vertex: source.to_string(),
        });
    };

    let mut visited = vec![false; graph.len()];
    visited[source_ix] = true;
    let mut covered: Vec<usize> = vec![source_ix];
    let mut tree: Vec<(usize, u64, usize)> = Vec::new();

    let mut heap: BinaryHeap<Reverse<(u64, usize, usize)>> = BinaryHeap::new();
    push_candidates(graph, source_ix, &visited, &mut heap);

    let mut discarded = 0usize;
    while let Some(Reverse((weight, from, to))) = heap.pop() {
        if visited[to] {
            discarded += 1;
            continue;
        }
        visited[to] = true;
        covered.push(to);
        tree.push((from, weight, to));
        push_candidates(graph, to, &visited, &mut heap);
    }

    let name = |ix: usize| {
        graph
            .entry_at(ix)
            .map(|(v, _)| v.to_string())
            .unwrap_or_default()
    };

    let mut children: FxIndexMap<String, BTreeSet<TreeEdge>> = FxIndexMap::default();
    for &(from, weight, to) in &tree {
        children.entry(name(from)).or_default().insert(TreeEdge {
            weight,
            child: name(to),
        });
    }

    let result = SpanningTree {
        source: source.to_string(),
        covered: covered.into_iter().map(name).collect(),
        children,
    };
    tracing::debug!(
        source,
        covered = result.covered.len(),
        vertices = graph.len(),
        total_weight = result.total_weight(),
        discarded,
        "prim finished"
    );
    Ok(result)
}

fn push_candidates(
    graph: &AdjacencyMap,
    from: usize,
    visited: &[bool],
    heap: &mut BinaryHeap<Reverse<(u64, usize, usize)>>,
) {
    let Some((_, neighbors)) = graph.entry_at(from) else {
        return;
    };
    for (w, &weight) in neighbors {
        let Some(to) = graph.index_of(w) else {
            debug_assert!(false, "neighbour {w} missing from adjacency map");
            continue;
        };
        if !visited[to] {
            heap.push(Reverse((weight, from, to)));
        }
    }
}
