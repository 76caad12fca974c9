//! Thicket HTML Parser
//!
//! HTML5 parsing built on html5ever, converted into [`thicket_dom`] trees.
//! Inline markup can also be materialized as detached fragments inside an
//! existing tree.

mod parser;

pub use parser::HtmlParser;
pub use thicket_dom::Document;

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Result<Document, ParseError> {
    HtmlParser::new().parse(html)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The markup could not be read as UTF-8 input
    #[error("failed to read markup: {0}")]
    Io(#[from] std::io::Error),

    /// The converted nodes could not be linked into the tree
    #[error("failed to build tree: {0}")]
    Tree(#[from] thicket_dom::TreeError),
}
