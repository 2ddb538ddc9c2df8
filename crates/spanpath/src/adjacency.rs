//! Adjacency map construction.
//!
//! Vertices and neighbours keep first-insertion order, so iteration (and therefore the fallback
//! source choice) is deterministic for a given input text.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::{Serialize, Serializer};

use crate::descriptor::{Edge, GraphDescriptor, GraphKind};
use crate::error::{Error, Result};

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

pub type Neighbors = FxIndexMap<String, u64>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMap {
    kind: GraphKind,
    vertices: FxIndexMap<String, Neighbors>,
}

impl AdjacencyMap {
    pub fn from_descriptor(descriptor: &GraphDescriptor) -> Self {
        Self::from_edges(descriptor.kind, &descriptor.edges)
    }

    /// Builds the map from `edges`.
    ///
    /// A repeated `(from, to)` pair overwrites the earlier weight. Undirected graphs get their
    /// mirrored arcs in a second pass over the input, after every forward arc is in place.
    pub fn from_edges(kind: GraphKind, edges: &[Edge]) -> Self {
        let mut vertices: FxIndexMap<String, Neighbors> = FxIndexMap::default();

        for e in edges {
            vertices
                .entry(e.from.clone())
                .or_default()
                .insert(e.to.clone(), e.weight);
            vertices.entry(e.to.clone()).or_default();
        }

        if !kind.is_directed() {
            for e in edges {
                // Both endpoints were inserted by the forward pass.
                if let Some(neighbors) = vertices.get_mut(&e.to) {
                    neighbors.insert(e.from.clone(), e.weight);
                }
            }
        }

        tracing::debug!(
            kind = kind.as_str(),
            vertices = vertices.len(),
            input_edges = edges.len(),
            "built adjacency map"
        );

        Self { kind, vertices }
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, v: &str) -> bool {
        self.vertices.contains_key(v)
    }

    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.vertices.keys().map(String::as_str)
    }

    pub fn neighbors(&self, v: &str) -> Option<&Neighbors> {
        self.vertices.get(v)
    }

    pub fn weight(&self, from: &str, to: &str) -> Option<u64> {
        self.vertices.get(from)?.get(to).copied()
    }

    /// Number of stored arcs; an undirected edge counts once per direction.
    pub fn arc_count(&self) -> usize {
        self.vertices.values().map(IndexMap::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Neighbors)> {
        self.vertices.iter().map(|(v, n)| (v.as_str(), n))
    }

    pub(crate) fn index_of(&self, v: &str) -> Option<usize> {
        self.vertices.get_index_of(v)
    }

    pub(crate) fn entry_at(&self, ix: usize) -> Option<(&str, &Neighbors)> {
        self.vertices
            .get_index(ix)
            .map(|(v, n)| (v.as_str(), n))
    }

    /// Picks the vertex both engines start from.
    ///
    /// A declared vertex must exist. Without one, the first vertex in insertion order is used;
    /// that choice is deterministic but carries no graph-theoretic meaning.
    pub fn resolve_source(&self, declared: Option<&str>) -> Result<SourceSelection> {
        if let Some(v) = declared {
            if !self.contains(v) {
                return Err(Error::UnknownVertex {
                    vertex: v.to_string(),
                });
            }
            return Ok(SourceSelection::Declared(v.to_string()));
        }

        let Some(first) = self.vertices().next() else {
            return Err(Error::EmptyGraph);
        };
        tracing::debug!(
            fallback = first,
            "no source vertex declared; falling back to the first vertex"
        );
        Ok(SourceSelection::Fallback(first.to_string()))
    }

    pub fn shortest_paths(&self, source: &str) -> Result<crate::ShortestPaths> {
        crate::alg::dijkstra::shortest_paths(self, source)
    }

    pub fn minimum_spanning_tree(&self, source: &str) -> Result<crate::SpanningTree> {
        crate::alg::prim::minimum_spanning_tree(self, source)
    }
}

impl Serialize for AdjacencyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.vertices.serialize(serializer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "vertex", rename_all = "lowercase")]
pub enum SourceSelection {
    Declared(String),
    Fallback(String),
}

impl SourceSelection {
    pub fn vertex(&self) -> &str {
        match self {
            SourceSelection::Declared(v) | SourceSelection::Fallback(v) => v,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, SourceSelection::Fallback(_))
    }
}
