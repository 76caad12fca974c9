//! Thicket CSS Selectors
//!
//! Parses a practical subset of CSS selectors and matches them against
//! [`thicket_dom::DomTree`] nodes.
//!
//! Supported: selector lists, the four combinators (descendant, `>`, `+`,
//! `~`), type/universal/id/class selectors, attribute selectors with all six
//! operators and the ` i` flag, and the tree-structural pseudo-classes plus
//! `:not()`.

mod matching;
mod parser;
mod selectors;

pub use matching::select_all;
pub use selectors::{
    AttributeMatcher, AttributeSelector, Combinator, ComplexSelector, CompoundSelector,
    NthExpression, PseudoClass, SelectorList, SimpleSelector,
};

/// Parse a selector list
pub fn parse(selector: &str) -> Result<SelectorList, SelectorError> {
    parser::SelectorParser::new(selector).parse_list()
}

/// Selector parsing error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected {found:?} at offset {offset} in selector {selector:?}")]
    UnexpectedChar {
        selector: String,
        offset: usize,
        found: char,
    },

    #[error("unexpected end of selector {selector:?}")]
    UnexpectedEnd { selector: String },

    #[error("unsupported pseudo-class :{name}")]
    UnsupportedPseudoClass { name: String },

    #[error("invalid An+B expression {0:?}")]
    InvalidNth(String),
}
