//! Extension registry
//!
//! Feature modules attach to selections through an [`ExtensionSet`] fixed
//! when the [`Query`](crate::Query) is built. Every selection derived from
//! that query carries the same set, so an extension looked up after any
//! number of traversal steps is the one that was registered.
//!
//! # Example
//! ```rust,ignore
//! let query = Query::builder(&host).extension(Attributes)?.build();
//! let items = query.select("li")?.children(None)?;
//! let href = items.extension::<Attributes>().and_then(|ext| ext.attr(&items, "href"));
//! ```

use std::any::Any;
use std::fmt;

/// A capability bundle shared by every selection of a query
pub trait Extension: Any {
    /// Unique registry key
    fn name(&self) -> &'static str;

    /// The extension as `Any`, for downcasting to its concrete type
    fn as_any(&self) -> &dyn Any;
}

/// Extension registration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtensionError {
    #[error("extension already registered: {0}")]
    Duplicate(&'static str),
}

/// Ordered, read-only set of extensions
#[derive(Default)]
pub struct ExtensionSet {
    entries: Vec<Box<dyn Extension>>,
}

impl ExtensionSet {
    pub(crate) fn register(&mut self, extension: Box<dyn Extension>) -> Result<(), ExtensionError> {
        let name = extension.name();
        if self.by_name(name).is_some() {
            return Err(ExtensionError::Duplicate(name));
        }
        tracing::debug!(extension = name, "Registered extension");
        self.entries.push(extension);
        Ok(())
    }

    /// Find an extension by concrete type
    pub fn get<E: Extension>(&self) -> Option<&E> {
        self.entries
            .iter()
            .find_map(|ext| ext.as_any().downcast_ref::<E>())
    }

    /// Find an extension by name
    pub fn by_name(&self, name: &str) -> Option<&dyn Extension> {
        self.entries
            .iter()
            .map(|ext| ext.as_ref())
            .find(|ext| ext.name() == name)
    }

    /// Registered names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|ext| ext.name())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ExtensionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
