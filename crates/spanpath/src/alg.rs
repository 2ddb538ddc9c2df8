//! Priority-queue driven traversals over an [`AdjacencyMap`](crate::AdjacencyMap).
//!
//! Both engines use a binary heap with lazy deletion: superseded entries stay in the heap and
//! are recognised and dropped when popped.

pub mod dijkstra;
pub mod prim;
