//! Edge-list descriptor parsing.
//!
//! Input is line oriented:
//!
//! ```text
//! <vertexCount> <edgeCount> <D|U>
//! <from> <to> <weight>      (edgeCount times)
//! [<source>]
//! ```
//!
//! Tokens are whitespace separated. Blank lines carry no tokens and are skipped, so line numbers
//! reported in errors always refer to the input text.

use std::str::FromStr;

use rustc_hash::FxBuildHasher;
use serde::Serialize;

use crate::ParseOptions;
use crate::error::{Error, Result};

type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

/// One non-blank input line split on whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenLine<'a> {
    /// 1-based line number in the source text.
    pub number: usize,
    pub tokens: Vec<&'a str>,
}

impl<'a> TokenLine<'a> {
    pub fn new(number: usize, tokens: Vec<&'a str>) -> Self {
        Self { number, tokens }
    }
}

/// Splits `text` into whitespace-tokenized lines, dropping lines without tokens.
pub fn tokenize(text: &str) -> Vec<TokenLine<'_>> {
    text.lines()
        .enumerate()
        .filter_map(|(ix, line)| {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            (!tokens.is_empty()).then(|| TokenLine::new(ix + 1, tokens))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GraphKind {
    Directed,
    Undirected,
}

impl GraphKind {
    pub fn is_directed(self) -> bool {
        matches!(self, GraphKind::Directed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GraphKind::Directed => "D",
            GraphKind::Undirected => "U",
        }
    }
}

impl FromStr for GraphKind {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "D" => Ok(GraphKind::Directed),
            "U" => Ok(GraphKind::Undirected),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub weight: u64,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: u64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }
}

/// Structured form of the edge-list text, before any adjacency is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphDescriptor {
    /// Declared in the header; only cross-checked under [`ParseOptions::strict`].
    pub vertex_count: usize,
    pub edge_count: usize,
    pub kind: GraphKind,
    pub source: Option<String>,
    pub edges: Vec<Edge>,
}

impl GraphDescriptor {
    /// Tokenizes and parses `text`.
    pub fn parse(text: &str, options: ParseOptions) -> Result<Self> {
        Self::from_lines(&tokenize(text), options)
    }

    pub fn from_lines(lines: &[TokenLine<'_>], options: ParseOptions) -> Result<Self> {
        let Some((header, rest)) = lines.split_first() else {
            return Err(Error::MalformedHeader { line: 1, found: 0 });
        };

        let [vertices, edges, kind] = header.tokens[..] else {
            return Err(Error::MalformedHeader {
                line: header.number,
                found: header.tokens.len(),
            });
        };
        let vertex_count = parse_count(header.number, "vertex count", vertices)?;
        let edge_count = parse_count(header.number, "edge count", edges)?;
        let kind = kind.parse::<GraphKind>().map_err(|_| Error::UnknownGraphKind {
            line: header.number,
            token: kind.to_string(),
        })?;

        if rest.len() < edge_count {
            return Err(Error::MissingEdges {
                expected: edge_count,
                found: rest.len(),
            });
        }
        let (edge_lines, trailing) = rest.split_at(edge_count);

        let edges = edge_lines
            .iter()
            .map(parse_edge)
            .collect::<Result<Vec<_>>>()?;

        let source = match trailing {
            [] => None,
            [line] if line.tokens.len() == 1 => Some(line.tokens[0].to_string()),
            [line, ..] => return Err(Error::TrailingInput { line: line.number }),
        };

        let descriptor = Self {
            vertex_count,
            edge_count,
            kind,
            source,
            edges,
        };
        descriptor.check_vertex_count(options)?;
        Ok(descriptor)
    }

    /// Number of distinct labels referenced by the edge list.
    pub fn observed_vertex_count(&self) -> usize {
        let mut seen: HashSet<&str> = HashSet::default();
        for e in &self.edges {
            seen.insert(e.from.as_str());
            seen.insert(e.to.as_str());
        }
        seen.len()
    }

    fn check_vertex_count(&self, options: ParseOptions) -> Result<()> {
        let observed = self.observed_vertex_count();
        if observed == self.vertex_count {
            return Ok(());
        }
        if options.strict {
            return Err(Error::VertexCountMismatch {
                declared: self.vertex_count,
                observed,
            });
        }
        tracing::warn!(
            declared = self.vertex_count,
            observed,
            "declared vertex count does not match the edge list"
        );
        Ok(())
    }
}

impl FromStr for GraphDescriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, ParseOptions::default())
    }
}

fn parse_count(line: usize, field: &'static str, token: &str) -> Result<usize> {
    if let Ok(count) = token.parse::<usize>() {
        return Ok(count);
    }
    if token.parse::<i64>().is_ok_and(|n| n < 0) {
        return Err(Error::NegativeCount {
            line,
            field,
            token: token.to_string(),
        });
    }
    Err(Error::InvalidInteger {
        line,
        field,
        token: token.to_string(),
    })
}

fn parse_edge(line: &TokenLine<'_>) -> Result<Edge> {
    let [from, to, weight] = line.tokens[..] else {
        return Err(Error::MalformedEdge {
            line: line.number,
            found: line.tokens.len(),
        });
    };
    if let Ok(weight) = weight.parse::<u64>() {
        return Ok(Edge::new(from, to, weight));
    }
    match weight.parse::<i64>() {
        Ok(parsed) if parsed < 0 => Err(Error::NegativeWeight {
            line: line.number,
            weight: parsed,
        }),
        _ => Err(Error::InvalidInteger {
            line: line.number,
            field: "weight",
            token: weight.to_string(),
        }),
    }
}
