pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("line {line}: expected header `<vertices> <edges> <D|U>`, found {found} token(s)")]
    MalformedHeader { line: usize, found: usize },

    #[error("line {line}: expected edge `<from> <to> <weight>`, found {found} token(s)")]
    MalformedEdge { line: usize, found: usize },

    #[error("line {line}: {field} must be an integer, got `{token}`")]
    InvalidInteger {
        line: usize,
        field: &'static str,
        token: String,
    },

    #[error("line {line}: {field} must be a non-negative integer, got `{token}`")]
    NegativeCount {
        line: usize,
        field: &'static str,
        token: String,
    },

    #[error("line {line}: unknown graph type `{token}` (expected `D` or `U`)")]
    UnknownGraphKind { line: usize, token: String },

    #[error("line {line}: negative edge weight {weight} is not supported")]
    NegativeWeight { line: usize, weight: i64 },

    #[error("header declares {expected} edge(s) but only {found} edge line(s) follow")]
    MissingEdges { expected: usize, found: usize },

    #[error("line {line}: unexpected input after the edge list (only a single source vertex may follow)")]
    TrailingInput { line: usize },

    #[error("header declares {declared} vertices but the edges reference {observed}")]
    VertexCountMismatch { declared: usize, observed: usize },

    #[error("vertex `{vertex}` does not appear in the graph")]
    UnknownVertex { vertex: String },

    #[error("graph has no vertices")]
    EmptyGraph,
}

impl Error {
    /// Input-format errors abort the run before any algorithm executes.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Error::MalformedHeader { .. }
                | Error::MalformedEdge { .. }
                | Error::InvalidInteger { .. }
                | Error::NegativeCount { .. }
                | Error::UnknownGraphKind { .. }
                | Error::NegativeWeight { .. }
                | Error::MissingEdges { .. }
                | Error::TrailingInput { .. }
                | Error::VertexCountMismatch { .. }
        )
    }
}
