//! Single-source shortest paths (Dijkstra, label setting).
//!
//! Every vertex is pushed with its initial distance. A relaxation pushes a fresh entry instead
//! of decreasing a key; entries whose distance no longer matches the distance table are stale
//! and skipped. Edge weights are unsigned, which is what makes a popped distance final.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::adjacency::{AdjacencyMap, FxIndexMap};
use crate::error::{Error, Result};

/// Tentative or final distance from the source. `Finite` sorts before `Infinite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distance {
    Finite(u64),
    Infinite,
}

impl Distance {
    pub fn is_finite(self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    pub fn finite(self) -> Option<u64> {
        match self {
            Distance::Finite(d) => Some(d),
            Distance::Infinite => None,
        }
    }

    /// Overflow past `u64::MAX` is treated as unreachable.
    fn plus(self, weight: u64) -> Distance {
        match self {
            Distance::Finite(d) => d.checked_add(weight).map_or(Distance::Infinite, Distance::Finite),
            Distance::Infinite => Distance::Infinite,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{d}"),
            Distance::Infinite => f.write_str("inf"),
        }
    }
}

// JSON has no infinity; unreachable distances become `null`.
impl Serialize for Distance {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.finite().serialize(serializer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Parent {
    /// The source itself.
    Root,
    Unreached,
    Vertex(String),
}

impl Parent {
    pub fn vertex(&self) -> Option<&str> {
        match self {
            Parent::Vertex(v) => Some(v),
            Parent::Root | Parent::Unreached => None,
        }
    }
}

impl fmt::Display for Parent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parent::Root => f.write_str("-"),
            Parent::Unreached => Ok(()),
            Parent::Vertex(v) => f.write_str(v),
        }
    }
}

impl Serialize for Parent {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.vertex().serialize(serializer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathEntry {
    pub distance: Distance,
    pub parent: Parent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortestPaths {
    source: String,
    vertices: FxIndexMap<String, PathEntry>,
}

impl ShortestPaths {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn get(&self, v: &str) -> Option<&PathEntry> {
        self.vertices.get(v)
    }

    pub fn distance(&self, v: &str) -> Option<Distance> {
        self.get(v).map(|e| e.distance)
    }

    pub fn parent(&self, v: &str) -> Option<&Parent> {
        self.get(v).map(|e| &e.parent)
    }

    /// Entries in adjacency-map order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PathEntry)> {
        self.vertices.iter().map(|(v, e)| (v.as_str(), e))
    }

    /// Entries sorted by vertex label.
    pub fn sorted(&self) -> Vec<(&str, &PathEntry)> {
        let mut out: Vec<_> = self.iter().collect();
        out.sort_by(|a, b| a.0.cmp(b.0));
        out
    }

    pub fn reachable_count(&self) -> usize {
        self.vertices
            .values()
            .filter(|e| e.distance.is_finite())
            .count()
    }

    /// Vertices from the source to `v`, inclusive. `None` if `v` is unknown or unreached.
    pub fn path_to(&self, v: &str) -> Option<Vec<&str>> {
        let (mut current, _, entry) = self.vertices.get_full(v)?;
        if !entry.distance.is_finite() {
            return None;
        }

        let mut path: Vec<&str> = Vec::new();
        // A parent chain visits each vertex at most once.
        for _ in 0..self.vertices.len() {
            let (name, entry) = self.vertices.get_index(current)?;
            path.push(name);
            match &entry.parent {
                Parent::Root => {
                    path.reverse();
                    return Some(path);
                }
                Parent::Vertex(p) => current = self.vertices.get_index_of(p.as_str())?,
                Parent::Unreached => return None,
            }
        }
        debug_assert!(false, "parent chain does not terminate at the source");
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueueEntry {
    distance: Distance,
    vertex: usize,
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: `BinaryHeap` is a max-heap and we want the smallest distance first.
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

/// Shortest distances and parents from `source` to every vertex of `graph`.
pub fn shortest_paths(graph: &AdjacencyMap, source: &str) -> Result<ShortestPaths> {
    let Some(source_ix) = graph.index_of(source) else {
        return Err(Error::UnknownVertex {
            vertex: source.to_string(),
        });
    };

    let n = graph.len();
    let mut dist = vec![Distance::Infinite; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    dist[source_ix] = Distance::Finite(0);

    let mut heap: BinaryHeap<QueueEntry> = dist
        .iter()
        .enumerate()
        .map(|(vertex, &distance)| QueueEntry { distance, vertex })
        .collect();

    let mut stale = 0usize;
    while let Some(QueueEntry { distance, vertex }) = heap.pop() {
        if distance != dist[vertex] {
            stale += 1;
            continue;
        }
        if !distance.is_finite() {
            continue;
        }
        let Some((_, neighbors)) = graph.entry_at(vertex) else {
            continue;
        };

        for (w, &weight) in neighbors {
            let Some(w_ix) = graph.index_of(w) else {
                debug_assert!(false, "neighbour {w} missing from adjacency map");
                continue;
            };
            let candidate = distance.plus(weight);
            if candidate < dist[w_ix] {
                dist[w_ix] = candidate;
                parent[w_ix] = Some(vertex);
                heap.push(QueueEntry {
                    distance: candidate,
                    vertex: w_ix,
                });
            }
        }
    }

    let mut vertices: FxIndexMap<String, PathEntry> = FxIndexMap::default();
    vertices.reserve(n);
    for (ix, (v, _)) in graph.iter().enumerate() {
        let parent = match parent[ix] {
            Some(p) => graph
                .entry_at(p)
                .map_or(Parent::Unreached, |(p, _)| Parent::Vertex(p.to_string())),
            None if ix == source_ix => Parent::Root,
            None => Parent::Unreached,
        };
        vertices.insert(
            v.to_string(),
            PathEntry {
                distance: dist[ix],
                parent,
            },
        );
    }

    let result = ShortestPaths {
        source: source.to_string(),
        vertices,
    };
    tracing::debug!(
        source,
        reached = result.reachable_count(),
        vertices = n,
        stale,
        "dijkstra finished"
    );
    Ok(result)
}
