//! Composite trees with ordered traversal, visitors, and selectors.
//!
//! This crate is the tree core of crease: a labeled-branch/typed-leaf node
//! model and the machinery for walking it.
//!
//! # Overview
//!
//! - **Model**: [`Branch`], [`Leaf`], [`Node`], [`Value`]: ordered
//!   children over a closed value set, deep [`Clone`], serde support.
//! - **Addressing**: [`NodePath`] resolves `0/2/1`-style index paths.
//! - **Traversal**: [`TreeCursor`] enumerates descendants pre-order,
//!   post-order, or breadth-first; exhaustion is a hard error, never a
//!   sentinel.
//! - **Visitors**: the [`visitor`] module, from trait hooks to runtime
//!   dispatch tables to cursor-driven reducers.
//! - **Selection**: the [`select`] module's expression language
//!   (`kind:int and value>10`).
//! - **Building**: [`TreeBuilder`] for stack-style construction.
//!
//! # Quick Start
//!
//! ```
//! use crease_tree::{Branch, Node, TraversalOrder};
//! use crease_tree::visitor::{reduce, Sum};
//!
//! let mut root = Branch::new("totals");
//! root.push(Node::leaf(10i64));
//! root.push(Node::leaf(20i64));
//! root.push(Node::leaf(30i64));
//!
//! // Cursor-driven reduction; order is the traversal order.
//! let total = reduce(&root, TraversalOrder::PreOrder, &mut Sum::new());
//! assert_eq!(total, 60.0);
//!
//! // Plain iteration over a cursor.
//! let kinds: Vec<_> = root
//!     .cursor(TraversalOrder::BreadthFirst)
//!     .nodes()
//!     .map(|node| node.kind())
//!     .collect();
//! assert_eq!(kinds.len(), 3);
//! ```

// ============================================================================
// Public modules and re-exports
// ============================================================================

/// Node model: values, leaves, branches.
pub mod node;
pub use node::{Branch, Leaf, Node, NodeKind, Value};

/// Positional paths and their resolution.
pub mod path;
pub use path::{NodePath, PathError};

/// Traversal cursors over a tree.
pub mod cursor;
pub use cursor::{Nodes, TraversalOrder, TraverseError, TreeCursor};

/// Visitor infrastructure: trait hooks, dispatch tables, reducers.
pub mod visitor;
pub use visitor::{VisitResult, Visitor};

/// Selector expression language.
pub mod select;
pub use select::{SelectError, Selector};

/// Stack-based construction.
pub mod builder;
pub use builder::{BuildError, TreeBuilder};

mod render;
