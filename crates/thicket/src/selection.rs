//! Selection container
//!
//! An ordered, immutable list of node handles bound to a host. Every
//! selection produced from another one shares its [`Context`], so the
//! configuration and the extensions registered on a [`Query`](crate::Query)
//! stay reachable however long the chain grows.

use std::collections::HashSet;
use std::fmt;
use std::ops::{Index, RangeBounds};
use std::rc::Rc;

use serde::{Serialize, Serializer};

use crate::input::{self, Input, Origin};
use crate::{Config, Extension, ExtensionSet, Host};

/// State shared by every selection derived from the same query
#[derive(Debug, Default)]
pub(crate) struct Context {
    pub(crate) config: Config,
    pub(crate) extensions: ExtensionSet,
}

/// Ordered, chainable set of nodes
pub struct Selection<'h, H: Host> {
    host: &'h H,
    nodes: Vec<H::Node>,
    origin: Origin,
    context: Rc<Context>,
}

impl<'h, H: Host> Selection<'h, H> {
    pub(crate) fn resolve(
        host: &'h H,
        context: Rc<Context>,
        input: Input<H::Node>,
    ) -> Result<Self, H::Error> {
        let (nodes, origin) = input::resolve(host, input)?;
        Ok(Self {
            host,
            nodes,
            origin,
            context,
        })
    }

    /// Build a sibling selection through this one's host and context
    pub(crate) fn derive(&self, nodes: Vec<H::Node>) -> Self {
        Self {
            host: self.host,
            nodes,
            origin: Origin::Programmatic,
            context: Rc::clone(&self.context),
        }
    }

    /// Build a selection from `nodes`, dropping repeated handles
    pub(crate) fn derive_unique(&self, nodes: Vec<H::Node>) -> Self {
        self.derive(dedupe(nodes))
    }

    /// Resolve fresh input with this selection's host and context
    pub fn select(&self, input: impl Into<Input<H::Node>>) -> Result<Self, H::Error> {
        Self::resolve(self.host, Rc::clone(&self.context), input.into())
    }

    /// The host this selection reads from
    pub fn host(&self) -> &'h H {
        self.host
    }

    /// How this selection was produced
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Configuration shared along the chain
    pub fn config(&self) -> &Config {
        &self.context.config
    }

    /// Extensions shared along the chain
    pub fn extensions(&self) -> &ExtensionSet {
        &self.context.extensions
    }

    /// Look up a registered extension by type
    pub fn extension<E: Extension>(&self) -> Option<&E> {
        self.context.extensions.get::<E>()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<H::Node> {
        self.nodes.get(index).copied()
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, H::Node>> {
        self.nodes.iter().copied()
    }

    pub fn as_slice(&self) -> &[H::Node] {
        &self.nodes
    }

    pub fn to_vec(&self) -> Vec<H::Node> {
        self.nodes.clone()
    }

    pub fn contains(&self, node: H::Node) -> bool {
        self.nodes.contains(&node)
    }

    /// Sub-range of this selection; out-of-range bounds are clamped
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Self {
        use std::ops::Bound;

        let len = self.nodes.len();
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(len);
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        }
        .clamp(start, len);
        self.derive(self.nodes[start..end].to_vec())
    }

    /// Bounded description for logs and generic printers
    pub fn summary(&self) -> Summary {
        Summary {
            length: self.nodes.len(),
            entries: self
                .nodes
                .iter()
                .take(self.context.config.summary_limit)
                .map(|&node| self.host.describe(node))
                .collect(),
            origin: self.origin.clone(),
        }
    }
}

/// Keep the first occurrence of every handle
pub(crate) fn dedupe<N: Copy + Eq + std::hash::Hash>(nodes: Vec<N>) -> Vec<N> {
    let mut seen = HashSet::with_capacity(nodes.len());
    nodes.into_iter().filter(|node| seen.insert(*node)).collect()
}

impl<H: Host> Clone for Selection<'_, H> {
    fn clone(&self) -> Self {
        Self {
            host: self.host,
            nodes: self.nodes.clone(),
            origin: self.origin.clone(),
            context: Rc::clone(&self.context),
        }
    }
}

impl<H: Host> Index<usize> for Selection<'_, H> {
    type Output = H::Node;

    fn index(&self, index: usize) -> &H::Node {
        &self.nodes[index]
    }
}

impl<'a, H: Host> IntoIterator for &'a Selection<'_, H> {
    type Item = H::Node;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, H::Node>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<H: Host> fmt::Debug for Selection<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.summary();
        f.debug_struct("Selection")
            .field("length", &summary.length)
            .field("entries", &summary.entries)
            .field("origin", &summary.origin)
            .finish()
    }
}

impl<H: Host> Serialize for Selection<'_, H> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.summary().serialize(serializer)
    }
}

/// Bounded, acyclic projection of a selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Total number of nodes
    pub length: usize,
    /// Tags of the leading nodes
    pub entries: Vec<String>,
    pub origin: Origin,
}
