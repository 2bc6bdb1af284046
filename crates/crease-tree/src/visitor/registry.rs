//! Runtime dispatch table: per-kind handlers registered by value.
//!
//! The compile-time [`Visitor`](crate::visitor::Visitor) trait covers the
//! common case; the table covers the case where the handler set is decided
//! at runtime. A node whose kind has no handler is a hard error, never a
//! silent skip.

use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

use crate::cursor::TraversalOrder;
use crate::node::{Branch, Node, NodeKind};

/// Error from table dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("no handler registered for node kind '{kind}'")]
    NoHandler { kind: NodeKind },
}

type Handler<R> = Box<dyn FnMut(&Node) -> R>;

/// Maps each [`NodeKind`] to a handler producing an `R`.
///
/// ```
/// use crease_tree::{Branch, Node, NodeKind, TraversalOrder};
/// use crease_tree::visitor::DispatchTable;
///
/// let mut table = DispatchTable::new();
/// table
///     .on(NodeKind::Int, |node| node.value().unwrap().to_string())
///     .on(NodeKind::Branch, |node| format!("[{}]", node.label().unwrap()));
///
/// let mut root = Branch::new("root");
/// root.push(Node::leaf(7i64));
/// root.push(Node::branch("inner"));
///
/// let out = table.run_over(&root, TraversalOrder::PreOrder).unwrap();
/// assert_eq!(out, ["7", "[inner]"]);
/// ```
pub struct DispatchTable<R> {
    handlers: HashMap<NodeKind, Handler<R>>,
}

impl<R> DispatchTable<R> {
    pub fn new() -> Self {
        DispatchTable {
            handlers: HashMap::new(),
        }
    }

    /// Register the handler for `kind`, replacing any previous one.
    /// Returns `&mut self` so registrations chain.
    pub fn on<F>(&mut self, kind: NodeKind, handler: F) -> &mut Self
    where
        F: FnMut(&Node) -> R + 'static,
    {
        self.handlers.insert(kind, Box::new(handler));
        self
    }

    /// Invoke the handler for this node's kind.
    ///
    /// Fails with [`DispatchError::NoHandler`] when the kind was never
    /// registered.
    pub fn dispatch(&mut self, node: &Node) -> Result<R, DispatchError> {
        let kind = node.kind();
        match self.handlers.get_mut(&kind) {
            Some(handler) => Ok(handler(node)),
            None => {
                debug!(%kind, "dispatch miss");
                Err(DispatchError::NoHandler { kind })
            }
        }
    }

    /// Dispatch every descendant of `root` in the given traversal order,
    /// collecting the handler results in visit order. Stops at the first
    /// unhandled kind.
    pub fn run_over(
        &mut self,
        root: &Branch,
        order: TraversalOrder,
    ) -> Result<Vec<R>, DispatchError> {
        let mut out = Vec::new();
        for node in root.cursor(order) {
            out.push(self.dispatch(node)?);
        }
        Ok(out)
    }

    pub fn is_registered(&self, kind: NodeKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Registered kinds, sorted by name for stable output.
    pub fn handled_kinds(&self) -> Vec<NodeKind> {
        let mut kinds: Vec<NodeKind> = self.handlers.keys().copied().collect();
        kinds.sort_by_key(|k| k.name());
        kinds
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<R> Default for DispatchTable<R> {
    fn default() -> Self {
        DispatchTable::new()
    }
}

impl<R> std::fmt::Debug for DispatchTable<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchTable")
            .field("kinds", &self.handled_kinds())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
