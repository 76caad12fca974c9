//! Bundled host: arena DOM + CSS selectors + HTML5 fragments
//!
//! [`DomHost`] adapts a [`thicket_dom::Document`] to [`Host`]. The document
//! sits in a `RefCell` so fragments can be materialized through `&self`
//! while selections hold shared borrows of the host; every read borrows the
//! tree only for the duration of one call.

use std::cell::{BorrowMutError, Ref, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use thicket_css::{SelectorError, SelectorList};
use thicket_dom::DomTree;
use thicket_html::{HtmlParser, ParseError};

pub use thicket_dom::{Document, NodeId};

use crate::{Config, Host, HostContent, Input};

/// Failures reported by [`DomHost`]
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error(transparent)]
    Selector(#[from] SelectorError),

    #[error(transparent)]
    Markup(#[from] ParseError),

    /// Markup was resolved while a document guard was still held
    #[error("document is borrowed; drop tree guards before resolving markup")]
    Borrowed(#[from] BorrowMutError),
}

/// [`Host`] implementation over the bundled DOM
pub struct DomHost {
    document: RefCell<Document>,
    parser: HtmlParser,
    selectors: RefCell<SelectorCache>,
}

impl DomHost {
    pub fn new(document: Document) -> Self {
        Self::with_config(document, &Config::default())
    }

    /// Host whose selector cache holds `config.selector_cache_capacity`
    /// parsed patterns. The capacity is read here only; a [`Config`] passed
    /// to [`QueryBuilder::config`](crate::QueryBuilder::config) does not
    /// resize an existing host's cache.
    pub fn with_config(document: Document, config: &Config) -> Self {
        Self {
            document: RefCell::new(document),
            parser: HtmlParser::new(),
            selectors: RefCell::new(SelectorCache::new(config.selector_cache_capacity)),
        }
    }

    /// Parse `html` into a new host
    pub fn parse(html: &str) -> Result<Self, HostError> {
        Ok(Self::new(HtmlParser::new().parse(html)?))
    }

    /// Borrow the underlying document.
    ///
    /// While the guard is alive, resolving markup through this host fails
    /// with [`HostError::Borrowed`]. Prefer [`DomHost::with_tree`] for short
    /// reads.
    pub fn borrow_document(&self) -> Ref<'_, Document> {
        self.document.borrow()
    }

    /// Borrow the underlying tree; same caveat as [`DomHost::borrow_document`]
    pub fn tree(&self) -> Ref<'_, DomTree> {
        Ref::map(self.document.borrow(), Document::tree)
    }

    /// Run `f` against the tree without letting the borrow escape
    pub fn with_tree<R>(&self, f: impl FnOnce(&DomTree) -> R) -> R {
        f(&self.tree())
    }

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.document.borrow().get_element_by_id(id)
    }

    pub fn into_document(self) -> Document {
        self.document.into_inner()
    }

    fn selector(&self, pattern: &str) -> Result<Rc<SelectorList>, SelectorError> {
        self.selectors.borrow_mut().get_or_parse(pattern)
    }

    fn element_sibling(&self, node: NodeId, step: fn(&DomTree, NodeId) -> Option<NodeId>) -> Option<NodeId> {
        let guard = self.tree();
        let tree: &DomTree = &guard;
        std::iter::successors(step(tree, node), |&s| step(tree, s))
            .find(|&s| tree.element(s).is_some())
    }
}

impl Host for DomHost {
    type Node = NodeId;
    type Error = HostError;

    fn document(&self) -> NodeId {
        self.tree().root()
    }

    fn supports_traversal(&self, node: NodeId) -> bool {
        self.tree()
            .get(node)
            .is_some_and(|n| n.is_element() || n.is_container())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        let tree = self.tree();
        tree.parent(node).filter(|&p| tree.element(p).is_some())
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree().element_children(node).collect()
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.element_sibling(node, DomTree::next_sibling)
    }

    fn prev_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.element_sibling(node, DomTree::prev_sibling)
    }

    fn matches(&self, node: NodeId, pattern: &str) -> Result<bool, HostError> {
        let selector = self.selector(pattern)?;
        Ok(selector.matches(&self.tree(), node))
    }

    fn query_all(&self, root: NodeId, pattern: &str) -> Result<Vec<NodeId>, HostError> {
        let selector = self.selector(pattern)?;
        Ok(thicket_css::select_all(&self.tree(), root, &selector))
    }

    fn fragment(&self, markup: &str) -> Result<Vec<NodeId>, HostError> {
        let mut document = self.document.try_borrow_mut()?;
        Ok(self.parser.parse_fragment(markup, document.tree_mut())?)
    }

    fn describe(&self, node: NodeId) -> String {
        self.tree().describe(node)
    }
}

impl HostContent for DomHost {
    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.tree()
            .element(node)
            .and_then(|e| e.get_attr(name))
            .map(str::to_string)
    }

    fn text_content(&self, node: NodeId) -> String {
        self.tree().text_content(node)
    }
}

impl From<NodeId> for Input<NodeId> {
    fn from(node: NodeId) -> Self {
        Input::Node(node)
    }
}

/// Parsed selectors keyed by source text, least recently used evicted first
struct SelectorCache {
    capacity: usize,
    entries: HashMap<String, Rc<SelectorList>>,
    order: VecDeque<String>,
}

impl SelectorCache {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    fn get_or_parse(&mut self, pattern: &str) -> Result<Rc<SelectorList>, SelectorError> {
        if let Some(selector) = self.entries.get(pattern) {
            let selector = Rc::clone(selector);
            self.touch(pattern);
            return Ok(selector);
        }

        tracing::trace!(pattern, "Selector cache miss");
        let selector = Rc::new(thicket_css::parse(pattern)?);
        if self.capacity == 0 {
            return Ok(selector);
        }
        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.entries.insert(pattern.to_string(), Rc::clone(&selector));
        self.order.push_back(pattern.to_string());
        Ok(selector)
    }

    fn touch(&mut self, pattern: &str) {
        if let Some(pos) = self.order.iter().position(|p| p == pattern) {
            if let Some(key) = self.order.remove(pos) {
                self.order.push_back(key);
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
