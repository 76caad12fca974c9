//! Document - High-level document API

use crate::{DomTree, NodeId};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a document with an empty html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut document = Self::empty(url);
        let tree = &mut document.tree;

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Freshly created nodes under a valid root cannot violate the hierarchy
        let linked = tree
            .append_child(tree.root(), html)
            .and_then(|()| tree.append_child(html, head))
            .and_then(|()| tree.append_child(html, body));
        debug_assert!(linked.is_ok());

        document.finalize();
        document
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate and cache the html, head and body elements
    pub fn finalize(&mut self) {
        self.html_element = self.find_child_element(self.tree.root(), "html");
        self.head_element = self.find_child_element(self.html_element, "head");
        self.body_element = self.find_child_element(self.html_element, "body");
        tracing::trace!(
            html = self.html_element.is_valid(),
            head = self.head_element.is_valid(),
            body = self.body_element.is_valid(),
            "Document finalized"
        );
    }

    fn find_child_element(&self, parent: NodeId, tag: &str) -> NodeId {
        if !parent.is_valid() {
            return NodeId::NONE;
        }
        self.tree
            .element_children(parent)
            .find(|&id| self.tree.element(id).is_some_and(|e| e.name == tag))
            .unwrap_or(NodeId::NONE)
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get document title
    pub fn title(&self) -> String {
        let title = self.find_child_element(self.head_element, "title");
        if !title.is_valid() {
            return String::new();
        }
        self.tree.text_content(title).trim().to_string()
    }

    /// Get <html> element
    pub fn document_element(&self) -> Option<NodeId> {
        self.html_element.some()
    }

    /// Get <head> element
    pub fn head(&self) -> Option<NodeId> {
        self.head_element.some()
    }

    /// Get <body> element
    pub fn body(&self) -> Option<NodeId> {
        self.body_element.some()
    }

    /// Get the first element in document order carrying `id`
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .find(|&node| self.tree.element(node).and_then(|e| e.id.as_deref()) == Some(id))
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
