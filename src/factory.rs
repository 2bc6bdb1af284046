//! Named node creators.
//!
//! A [`NodeFactory`] maps names to closures that build fresh nodes, so
//! callers can mint subtrees by name without knowing their shape. Names
//! are arbitrary non-empty strings; registering an existing name replaces
//! the previous creator.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;
use tracing::debug;

use crease_tree::Node;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactoryError {
    /// [`NodeFactory::create`] with a name nobody registered.
    #[error("no creator registered for '{name}'")]
    UnknownName { name: String },

    /// Registration with an empty name.
    #[error("creator name cannot be empty")]
    EmptyName,
}

type Creator = Box<dyn Fn() -> Node>;

/// Registry of named node creators.
#[derive(Default)]
pub struct NodeFactory {
    creators: BTreeMap<String, Creator>,
}

impl NodeFactory {
    pub fn new() -> NodeFactory {
        NodeFactory::default()
    }

    /// Register `create` under `name`, replacing any previous creator with
    /// that name.
    pub fn register<F>(&mut self, name: &str, create: F) -> Result<(), FactoryError>
    where
        F: Fn() -> Node + 'static,
    {
        if name.is_empty() {
            return Err(FactoryError::EmptyName);
        }
        let replaced = self
            .creators
            .insert(name.to_string(), Box::new(create))
            .is_some();
        debug!(name, replaced, "registered creator");
        Ok(())
    }

    /// Build a fresh node from the creator registered under `name`.
    pub fn create(&self, name: &str) -> Result<Node, FactoryError> {
        let create = self
            .creators
            .get(name)
            .ok_or_else(|| FactoryError::UnknownName {
                name: name.to_string(),
            })?;
        Ok(create())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.creators.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.creators.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.creators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creators.is_empty()
    }
}

impl fmt::Debug for NodeFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeFactory")
            .field("names", &self.names())
            .finish()
    }
}
