//! Query entry point

use std::rc::Rc;

use crate::selection::Context;
use crate::{Config, Extension, ExtensionError, ExtensionSet, Host, Input, Selection};

/// Factory for selections over one host
///
/// Holds the configuration and extension set that every selection it
/// produces, and every selection derived from those, will share.
pub struct Query<'h, H: Host> {
    host: &'h H,
    context: Rc<Context>,
}

impl<'h, H: Host> Query<'h, H> {
    /// Query with default configuration and no extensions
    pub fn new(host: &'h H) -> Self {
        Self {
            host,
            context: Rc::new(Context::default()),
        }
    }

    pub fn builder(host: &'h H) -> QueryBuilder<'h, H> {
        QueryBuilder {
            host,
            config: Config::default(),
            extensions: ExtensionSet::default(),
        }
    }

    /// Resolve `input` into a selection
    pub fn select(&self, input: impl Into<Input<H::Node>>) -> Result<Selection<'h, H>, H::Error> {
        Selection::resolve(self.host, Rc::clone(&self.context), input.into())
    }

    pub fn host(&self) -> &'h H {
        self.host
    }

    pub fn config(&self) -> &Config {
        &self.context.config
    }

    pub fn extensions(&self) -> &ExtensionSet {
        &self.context.extensions
    }
}

/// Builder composing a query with configuration and extensions
pub struct QueryBuilder<'h, H: Host> {
    host: &'h H,
    config: Config,
    extensions: ExtensionSet,
}

impl<'h, H: Host> QueryBuilder<'h, H> {
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Register an extension; names must be unique
    pub fn extension(mut self, extension: impl Extension) -> Result<Self, ExtensionError> {
        self.extensions.register(Box::new(extension))?;
        Ok(self)
    }

    pub fn build(self) -> Query<'h, H> {
        Query {
            host: self.host,
            context: Rc::new(Context {
                config: self.config,
                extensions: self.extensions,
            }),
        }
    }
}
