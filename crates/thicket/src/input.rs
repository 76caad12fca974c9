//! Input resolution
//!
//! Normalizes the accepted input shapes into an initial node sequence.

use std::fmt;

use serde::Serialize;

use crate::{Host, Selection};

/// Anything a selection can be built from
///
/// The variants are tried in declaration order by the `From` conversions:
/// a single handle, text, a node collection, nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Input<N> {
    /// Exactly one node, including the document handle
    Node(N),
    /// Markup (`<...>`) or a query pattern
    Text(String),
    /// Pre-existing nodes, copied in order
    Nodes(Vec<N>),
    /// No input; yields an empty selection
    #[default]
    Empty,
}

impl<N> From<&str> for Input<N> {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl<N> From<String> for Input<N> {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl<N> From<Vec<N>> for Input<N> {
    fn from(nodes: Vec<N>) -> Self {
        Self::Nodes(nodes)
    }
}

impl<N: Copy> From<&[N]> for Input<N> {
    fn from(nodes: &[N]) -> Self {
        Self::Nodes(nodes.to_vec())
    }
}

impl<'h, H: Host> From<&Selection<'h, H>> for Input<H::Node> {
    fn from(selection: &Selection<'h, H>) -> Self {
        Self::Nodes(selection.to_vec())
    }
}

/// How a selection was produced; diagnostics only
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Built from a text input (query pattern or markup)
    Expression(String),
    /// Built from handles or by a traversal
    Programmatic,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression(text) => f.write_str(text),
            Self::Programmatic => f.write_str("(programmatic)"),
        }
    }
}

/// Resolve `input` against `host` into an initial node sequence.
///
/// Host failures (an invalid pattern, unreadable markup) are returned as-is.
pub(crate) fn resolve<H: Host>(
    host: &H,
    input: Input<H::Node>,
) -> Result<(Vec<H::Node>, Origin), H::Error> {
    match input {
        Input::Node(node) => Ok((vec![node], Origin::Programmatic)),
        Input::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok((Vec::new(), Origin::Programmatic));
            }
            let nodes = if is_markup(trimmed) {
                let nodes = host.fragment(trimmed)?;
                tracing::debug!(nodes = nodes.len(), "Resolved markup fragment");
                nodes
            } else {
                let nodes = host.query_all(host.document(), trimmed)?;
                tracing::debug!(pattern = trimmed, nodes = nodes.len(), "Resolved query pattern");
                nodes
            };
            Ok((nodes, Origin::Expression(trimmed.to_string())))
        }
        Input::Nodes(nodes) => Ok((nodes, Origin::Programmatic)),
        Input::Empty => Ok((Vec::new(), Origin::Programmatic)),
    }
}

#[inline]
fn is_markup(text: &str) -> bool {
    text.starts_with('<') && text.ends_with('>')
}
