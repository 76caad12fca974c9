//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts the result to our arena DOM.

use html5ever::{QualName, local_name, ns, parse_document, parse_fragment as parse_html_fragment};
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use thicket_dom::{Document, DomTree, NodeId};

use crate::ParseError;

/// HTML5 parser
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Result<Document, ParseError> {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a base URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Result<Document, ParseError> {
        tracing::debug!("Parsing HTML document: {}", url);

        let dom = Self::read(html)?;
        let mut document = Document::empty(url);
        let root = document.tree().root();
        self.convert_node(&dom.document, document.tree_mut(), root)?;
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        Ok(document)
    }

    /// Parse `markup` into `tree` as a detached fragment.
    ///
    /// Markup is parsed in a `<template>` context, so any content model is
    /// accepted as-is: table rows and cells, list items, head-only elements.
    /// The parsed nodes hang under a new fragment node that has no parent.
    /// Returns the fragment's top-level children in document order.
    pub fn parse_fragment(&self, markup: &str, tree: &mut DomTree) -> Result<Vec<NodeId>, ParseError> {
        let context = QualName::new(None, ns!(html), local_name!("template"));
        let dom = parse_html_fragment(RcDom::default(), Default::default(), context, Vec::new(), false)
            .from_utf8()
            .read_from(&mut markup.as_bytes())?;
        let fragment = tree.create_fragment();

        // The fragment algorithm parks its output under a synthetic <html> root
        for root in dom.document.children.borrow().iter() {
            if !is_element(root, "html") {
                continue;
            }
            for child in root.children.borrow().iter() {
                self.convert_node(child, tree, fragment)?;
            }
        }

        let top_level: Vec<NodeId> = tree.children(fragment).map(|(id, _)| id).collect();
        tracing::debug!(nodes = top_level.len(), "Parsed fragment");
        Ok(top_level)
    }

    fn read(html: &str) -> Result<RcDom, ParseError> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())?;
        Ok(dom)
    }

    /// Convert an RcDom node (and its subtree) under `parent`
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) -> Result<(), ParseError> {
        match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent)?;
                }
            }
            RcNodeData::Doctype { name, .. } => {
                let id = tree.create_doctype(name);
                tree.append_child(parent, id)?;
            }
            RcNodeData::Text { contents } => {
                let text = contents.borrow();
                if !text.trim().is_empty() {
                    let id = tree.create_text(&text);
                    tree.append_child(parent, id)?;
                }
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(contents);
                tree.append_child(parent, id)?;
            }
            RcNodeData::Element { name, attrs, .. } => {
                let id = tree.create_element(&name.local);
                for attr in attrs.borrow().iter() {
                    tree.set_attribute(id, &attr.name.local, &attr.value)?;
                }
                tree.append_child(parent, id)?;

                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, id)?;
                }
            }
            RcNodeData::ProcessingInstruction { .. } => {
                tracing::warn!("Dropping processing instruction");
            }
        }
        Ok(())
    }
}

fn is_element(handle: &Handle, tag: &str) -> bool {
    matches!(&handle.data, RcNodeData::Element { name, .. } if &*name.local == tag)
}
