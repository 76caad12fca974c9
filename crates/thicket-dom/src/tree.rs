//! DOM Tree (arena-based allocation)

use crate::{ElementData, Node, NodeData, NodeId};

/// Tree mutation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// Id does not address a node in this arena
    #[error("node {0:?} does not exist")]
    InvalidNode(NodeId),
    /// Child already has a parent
    #[error("node {0:?} is already attached")]
    AlreadyAttached(NodeId),
    /// Insertion would create a cycle, or the parent cannot hold children
    #[error("hierarchy request error")]
    HierarchyRequest,
}

/// Arena-based DOM tree for memory efficiency
///
/// Node 0 is always the document node.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Element data for `id`, if it is an element
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (only ever true for a corrupted arena)
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(data));
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push(NodeData::Element(ElementData::new(name)))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(NodeData::Text(content.to_string()))
    }

    /// Create a detached comment
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(NodeData::Comment(content.to_string()))
    }

    /// Create a detached doctype
    pub fn create_doctype(&mut self, name: &str) -> NodeId {
        self.push(NodeData::Doctype {
            name: name.to_string(),
        })
    }

    /// Create a detached fragment container
    pub fn create_fragment(&mut self) -> NodeId {
        self.push(NodeData::Fragment)
    }

    /// Set an attribute on an element; non-elements are left untouched
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), TreeError> {
        let node = self.get_mut(id).ok_or(TreeError::InvalidNode(id))?;
        match node.as_element_mut() {
            Some(elem) => {
                elem.set_attr(name, value);
                Ok(())
            }
            None => Err(TreeError::HierarchyRequest),
        }
    }

    /// Append a detached `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let parent_node = self.get(parent).ok_or(TreeError::InvalidNode(parent))?;
        if !(parent_node.is_element() || parent_node.is_container()) {
            return Err(TreeError::HierarchyRequest);
        }
        let child_node = self.get(child).ok_or(TreeError::InvalidNode(child))?;
        if child_node.parent.is_valid() {
            return Err(TreeError::AlreadyAttached(child));
        }
        if child == parent || self.ancestors(parent).any(|a| a == child) {
            return Err(TreeError::HierarchyRequest);
        }

        let last = self.nodes[parent.index()].last_child;
        {
            let child_node = &mut self.nodes[child.index()];
            child_node.parent = parent;
            child_node.prev_sibling = last;
            child_node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
        Ok(())
    }

    /// Parent of `id`
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent.some())
    }

    /// Next sibling of `id`
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling.some())
    }

    /// Previous sibling of `id`
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling.some())
    }

    /// Direct children of `id`, in document order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Direct element children of `id`, in document order
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .filter(|(_, node)| node.is_element())
            .map(|(child, _)| child)
    }

    /// Proper descendants of `id` in preorder (document order)
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root: id,
            next: self.get(id).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Ancestors of `id`, nearest first, up to and including the document
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.get(id).map_or(NodeId::NONE, |n| n.parent),
        }
    }

    /// Concatenated text of `id` and its descendants
    pub fn text_content(&self, id: NodeId) -> String {
        match self.get(id) {
            Some(node) if node.is_text() => node.as_text().unwrap_or_default().to_string(),
            Some(_) => self
                .descendants(id)
                .filter_map(|d| self.get(d).and_then(Node::as_text))
                .collect(),
            None => String::new(),
        }
    }

    /// Diagnostic tag for `id`
    pub fn describe(&self, id: NodeId) -> String {
        self.get(id).map_or_else(|| "#invalid".to_string(), Node::describe)
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.some()?;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Preorder iterator over a subtree, excluding its root
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next.some()?;
        let node = self.tree.get(current)?;

        self.next = if node.first_child.is_valid() {
            node.first_child
        } else {
            // Climb until a following sibling exists, never leaving the subtree
            let mut cursor = current;
            loop {
                if cursor == self.root {
                    break NodeId::NONE;
                }
                let Some(cursor_node) = self.tree.get(cursor) else {
                    break NodeId::NONE;
                };
                if cursor_node.next_sibling.is_valid() {
                    break cursor_node.next_sibling;
                }
                cursor = cursor_node.parent;
                if !cursor.is_valid() {
                    break NodeId::NONE;
                }
            }
        };
        Some(current)
    }
}

/// Iterator over ancestors, nearest first
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next.some()?;
        self.next = self.tree.get(current).map_or(NodeId::NONE, |n| n.parent);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // document > div > (p > "hi", span), plus a detached comment
    fn sample() -> (DomTree, NodeId, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let p = tree.create_element("p");
        let text = tree.create_text("hi");
        let span = tree.create_element("span");
        tree.append_child(tree.root(), div).unwrap();
        tree.append_child(div, p).unwrap();
        tree.append_child(p, text).unwrap();
        tree.append_child(div, span).unwrap();
        (tree, div, p, text, span)
    }

    #[test]
    fn test_links() {
        let (tree, div, p, _, span) = sample();
        assert_eq!(tree.parent(p), Some(div));
        assert_eq!(tree.next_sibling(p), Some(span));
        assert_eq!(tree.prev_sibling(span), Some(p));
        assert_eq!(tree.prev_sibling(p), None);
        assert_eq!(tree.parent(tree.root()), None);
    }

    #[test]
    fn test_descendants_preorder() {
        let (tree, div, p, text, span) = sample();
        let all: Vec<_> = tree.descendants(tree.root()).collect();
        assert_eq!(all, vec![div, p, text, span]);

        let under_p: Vec<_> = tree.descendants(p).collect();
        assert_eq!(under_p, vec![text]);
        assert_eq!(tree.descendants(span).count(), 0);
    }

    #[test]
    fn test_element_children_skip_text() {
        let (mut tree, div, p, _, span) = sample();
        let stray = tree.create_text("  ");
        tree.append_child(div, stray).unwrap();
        let kids: Vec<_> = tree.element_children(div).collect();
        assert_eq!(kids, vec![p, span]);
    }

    #[test]
    fn test_ancestors() {
        let (tree, div, p, text, _) = sample();
        let up: Vec<_> = tree.ancestors(text).collect();
        assert_eq!(up, vec![p, div, tree.root()]);
    }

    #[test]
    fn test_append_rejects_cycles_and_reattach() {
        let (mut tree, div, p, text, _) = sample();
        assert_eq!(tree.append_child(p, div), Err(TreeError::AlreadyAttached(div)));

        let detached = tree.create_element("ul");
        assert_eq!(tree.append_child(text, detached), Err(TreeError::HierarchyRequest));
        assert_eq!(tree.append_child(detached, detached), Err(TreeError::HierarchyRequest));

        let bogus = NodeId(999);
        assert_eq!(tree.append_child(bogus, detached), Err(TreeError::InvalidNode(bogus)));
    }

    #[test]
    fn test_text_content() {
        let (tree, div, _, _, _) = sample();
        assert_eq!(tree.text_content(div), "hi");
    }
}
