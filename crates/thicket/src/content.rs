//! Built-in content extensions
//!
//! Read-only getters over a selection's members. They only need the
//! [`HostContent`] capability, so any host exposing attributes and text can
//! register them.

use std::any::Any;

use crate::{Extension, HostContent, Selection};

/// Attribute and class getters
#[derive(Debug, Clone, Copy, Default)]
pub struct Attributes;

impl Attributes {
    /// Attribute `name` of the first traversable member
    pub fn attr<H: HostContent>(&self, selection: &Selection<'_, H>, name: &str) -> Option<String> {
        let host = selection.host();
        selection
            .iter()
            .find(|&node| host.supports_traversal(node))
            .and_then(|node| host.attribute(node, name))
    }

    /// Whether any member carries `class`
    pub fn has_class<H: HostContent>(&self, selection: &Selection<'_, H>, class: &str) -> bool {
        let host = selection.host();
        selection.iter().any(|node| {
            host.attribute(node, "class")
                .is_some_and(|list| list.split_whitespace().any(|c| c == class))
        })
    }
}

impl Extension for Attributes {
    fn name(&self) -> &'static str {
        "attributes"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Text content getter
#[derive(Debug, Clone, Copy, Default)]
pub struct Text;

impl Text {
    /// Concatenated text of every member, in selection order
    pub fn text<H: HostContent>(&self, selection: &Selection<'_, H>) -> String {
        let host = selection.host();
        selection.iter().map(|node| host.text_content(node)).collect()
    }
}

impl Extension for Text {
    fn name(&self) -> &'static str {
        "text"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
