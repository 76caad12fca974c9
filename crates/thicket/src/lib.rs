//! Thicket - chainable selection engine
//!
//! Resolves heterogeneous input (a query pattern, inline markup, a node
//! handle or a list of handles) into a [`Selection`], then walks the host
//! tree from there: ancestors, descendants, siblings, bounded "until" walks,
//! filtering and indexing. Every step returns a new selection that shares
//! the query's configuration and extensions.
//!
//! The tree itself is supplied through the [`Host`] trait. With the default
//! `dom` feature, [`dom::DomHost`] binds the bundled arena DOM, CSS selector
//! matcher and HTML5 fragment parser.
//!
//! # Example
//! ```rust
//! use thicket::{Query, dom::DomHost};
//!
//! let host = DomHost::parse("<ul><li>a</li><li class=x>b</li></ul>").unwrap();
//! let query = Query::new(&host);
//! let items = query.select("li").unwrap();
//! assert_eq!(items.len(), 2);
//! assert_eq!(items.last().prev(None).unwrap().len(), 1);
//! assert_eq!(items.filter_by(".x").unwrap().len(), 1);
//! ```

mod config;
mod content;
mod extension;
mod host;
mod input;
mod query;
mod selection;
mod traversal;

#[cfg(feature = "dom")]
pub mod dom;

pub use config::Config;
pub use content::{Attributes, Text};
pub use extension::{Extension, ExtensionError, ExtensionSet};
pub use host::{Host, HostContent};
pub use input::{Input, Origin};
pub use query::{Query, QueryBuilder};
pub use selection::{Selection, Summary};
pub use traversal::Matcher;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
