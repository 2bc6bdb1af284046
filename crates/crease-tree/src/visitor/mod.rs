//! Visitor infrastructure: trait hooks, walk functions, runtime dispatch,
//! and reducers.
//!
//! Three layers, smallest hammer first:
//!
//! - [`Visitor`] + the `walk_*` functions: compile-time dispatch with
//!   macro-generated `visit_*`/`leave_*` hook pairs. Use this when the
//!   handler set is known at compile time.
//! - [`DispatchTable`]: runtime registration per
//!   [`NodeKind`](crate::node::NodeKind); an unhandled kind is a hard
//!   [`DispatchError::NoHandler`], never a silent skip.
//! - [`Reduce`] + the canned reducers ([`Sum`], [`Count`], [`Average`],
//!   [`CollectValues`], [`Fold`]): cursor-driven accumulation whose order
//!   is the traversal order.
//!
//! # Traversal order
//!
//! - `visit_*` hooks fire depth-first, pre-order
//! - `leave_*` hooks fire post-order
//! - Children are visited in insertion order (left-to-right)
//!
//! ```
//! use crease_tree::{Branch, Node, TraversalOrder};
//! use crease_tree::visitor::{reduce, Sum};
//!
//! let mut root = Branch::new("root");
//! root.push(Node::leaf(10i64));
//! root.push(Node::leaf(20i64));
//! root.push(Node::leaf(30i64));
//!
//! let total = reduce(&root, TraversalOrder::PreOrder, &mut Sum::new());
//! assert_eq!(total, 60.0);
//! ```

mod dispatch;
mod reduce;
mod registry;
mod traits;

pub use dispatch::{walk_branch, walk_leaf, walk_node};
pub use reduce::{reduce, Average, CollectValues, Count, Fold, MaxDepth, Reduce, Sum};
pub use registry::{DispatchError, DispatchTable};
pub use traits::{VisitResult, Visitor};
