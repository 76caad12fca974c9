//! Host tree capability
//!
//! The selection engine never owns nodes. Everything it knows about the tree
//! comes through [`Host`], so any arena, reference-counted or foreign tree
//! can be traversed as long as its handles compare by identity.

use std::fmt::Debug;
use std::hash::Hash;

/// Read access to a hierarchical node structure.
///
/// Navigation is element-level: `parent`, `children` and the sibling methods
/// only ever return nodes for which [`Host::supports_traversal`] holds.
pub trait Host {
    /// Opaque node handle. Two handles are the same node iff they are equal.
    type Node: Copy + Eq + Hash + Debug;
    /// Failure reported by pattern matching or fragment construction
    type Error: std::error::Error;

    /// Document-level singleton; the root of every query pattern
    fn document(&self) -> Self::Node;

    /// Whether `node` can be navigated and matched.
    ///
    /// False for text, comments and stale handles. Traversal skips such
    /// members instead of failing.
    fn supports_traversal(&self, node: Self::Node) -> bool;

    /// Parent element, or none at the root or for detached top-level nodes
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Element children in document order
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Following element sibling
    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    /// Preceding element sibling
    fn prev_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    /// Test `node` against `pattern`
    fn matches(&self, node: Self::Node, pattern: &str) -> Result<bool, Self::Error>;

    /// Pattern every traversable node matches
    fn universal_pattern(&self) -> &str {
        "*"
    }

    /// Proper descendants of `root` matching `pattern`, in document order
    fn query_all(&self, root: Self::Node, pattern: &str) -> Result<Vec<Self::Node>, Self::Error>;

    /// Materialize markup into detached nodes; returns the top-level nodes
    /// in document order
    fn fragment(&self, markup: &str) -> Result<Vec<Self::Node>, Self::Error>;

    /// Short diagnostic tag for `node`
    fn describe(&self, node: Self::Node) -> String;
}

/// Optional read access to node content, used by content extensions
pub trait HostContent: Host {
    /// Attribute value, if `node` is an element carrying `name`
    fn attribute(&self, node: Self::Node, name: &str) -> Option<String>;

    /// Concatenated text of `node` and its descendants
    fn text_content(&self, node: Self::Node) -> String;
}
