//! Traversal cursors: ordered, resettable enumeration of a tree's nodes.
//!
//! A cursor walks the descendants of a root branch in one of three orders:
//! - `PreOrder`: depth-first, a node before its children, children
//!   left-to-right
//! - `PostOrder`: depth-first, every descendant before its parent
//! - `BreadthFirst`: all nodes at depth `d` before any node at depth `d + 1`
//!
//! As in the rest of the crate, the root branch itself is the frame of
//! reference and is not enumerated; the cursor yields its descendants.
//!
//! A cursor borrows the tree for its whole lifetime, so mutating the tree
//! while a cursor is live is rejected at compile time. For the same tree,
//! the same order enumerates the same sequence on every run.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;

use crate::node::{Branch, Node};

/// Error from cursor operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraverseError {
    /// `next()` was called with nothing left to visit. Callers are expected
    /// to consult `has_next()`; driving past the end is a hard error, not a
    /// sentinel.
    #[error("cursor exhausted: no more nodes to visit")]
    Exhausted,
}

/// The visit orders a cursor supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalOrder {
    #[default]
    PreOrder,
    PostOrder,
    BreadthFirst,
}

impl TraversalOrder {
    pub fn name(&self) -> &'static str {
        match self {
            TraversalOrder::PreOrder => "pre_order",
            TraversalOrder::PostOrder => "post_order",
            TraversalOrder::BreadthFirst => "breadth_first",
        }
    }
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Cursor
// ============================================================================

/// Stack entry for depth-first orders. `expanded` marks a branch whose
/// children have already been pushed; post-order returns a branch only when
/// it pops in the expanded state.
struct Entry<'t> {
    node: &'t Node,
    expanded: bool,
}

enum Pending<'t> {
    Depth(Vec<Entry<'t>>),
    Breadth(VecDeque<&'t Node>),
}

/// Stateful cursor over the descendants of a branch.
///
/// ```
/// use crease_tree::{Branch, Node, TraversalOrder};
///
/// let mut root = Branch::new("root");
/// root.push(Node::leaf(1i64));
/// root.push(Node::leaf(2i64));
///
/// let mut cursor = root.cursor(TraversalOrder::PreOrder);
/// while cursor.has_next() {
///     let node = cursor.next().unwrap();
///     println!("{:?}", node.kind());
/// }
/// ```
pub struct TreeCursor<'t> {
    root: &'t Branch,
    order: TraversalOrder,
    pending: Pending<'t>,
}

impl<'t> TreeCursor<'t> {
    /// Create a cursor positioned before the first node of `order`.
    pub fn new(root: &'t Branch, order: TraversalOrder) -> TreeCursor<'t> {
        let mut cursor = TreeCursor {
            root,
            order,
            pending: Pending::Depth(Vec::new()),
        };
        cursor.reset();
        cursor
    }

    /// The order this cursor visits in.
    pub fn order(&self) -> TraversalOrder {
        self.order
    }

    /// True while at least one node remains.
    pub fn has_next(&self) -> bool {
        match &self.pending {
            Pending::Depth(stack) => !stack.is_empty(),
            Pending::Breadth(queue) => !queue.is_empty(),
        }
    }

    /// Yield the next node in this cursor's order.
    ///
    /// Calling past the end fails with [`TraverseError::Exhausted`].
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<&'t Node, TraverseError> {
        match (&mut self.pending, self.order) {
            (Pending::Depth(stack), TraversalOrder::PreOrder) => {
                let entry = stack.pop().ok_or(TraverseError::Exhausted)?;
                if let Node::Branch(branch) = entry.node {
                    for child in branch.children().iter().rev() {
                        stack.push(Entry {
                            node: child,
                            expanded: false,
                        });
                    }
                }
                Ok(entry.node)
            }
            (Pending::Depth(stack), TraversalOrder::PostOrder) => {
                loop {
                    let entry = stack.pop().ok_or(TraverseError::Exhausted)?;
                    match entry.node {
                        Node::Leaf(_) => return Ok(entry.node),
                        Node::Branch(_) if entry.expanded => return Ok(entry.node),
                        Node::Branch(branch) => {
                            // First touch: re-push expanded, then the
                            // children, so every descendant pops first.
                            stack.push(Entry {
                                node: entry.node,
                                expanded: true,
                            });
                            for child in branch.children().iter().rev() {
                                stack.push(Entry {
                                    node: child,
                                    expanded: false,
                                });
                            }
                        }
                    }
                }
            }
            (Pending::Breadth(queue), _) => {
                let node = queue.pop_front().ok_or(TraverseError::Exhausted)?;
                if let Node::Branch(branch) = node {
                    queue.extend(branch.children().iter());
                }
                Ok(node)
            }
            // BreadthFirst never carries a Depth store and vice versa;
            // reset() keeps the two in sync.
            (Pending::Depth(_), TraversalOrder::BreadthFirst) => unreachable!(),
        }
    }

    /// Rewind to the first node of the current order.
    pub fn reset(&mut self) {
        self.pending = match self.order {
            TraversalOrder::PreOrder | TraversalOrder::PostOrder => {
                let mut stack = Vec::with_capacity(self.root.len());
                for child in self.root.children().iter().rev() {
                    stack.push(Entry {
                        node: child,
                        expanded: false,
                    });
                }
                Pending::Depth(stack)
            }
            TraversalOrder::BreadthFirst => {
                Pending::Breadth(self.root.children().iter().collect())
            }
        };
    }

    /// Switch orders and rewind.
    pub fn set_order(&mut self, order: TraversalOrder) {
        self.order = order;
        self.reset();
    }

    /// Consume the cursor into a plain iterator over the remaining nodes.
    /// Exhaustion becomes `None`; the error-on-overrun contract stays with
    /// [`TreeCursor::next`].
    pub fn nodes(self) -> Nodes<'t> {
        Nodes { cursor: self }
    }
}

impl fmt::Debug for TreeCursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeCursor")
            .field("order", &self.order)
            .field("root", &self.root.label())
            .field("has_next", &self.has_next())
            .finish()
    }
}

impl Branch {
    /// Cursor over this branch's descendants.
    pub fn cursor(&self, order: TraversalOrder) -> TreeCursor<'_> {
        TreeCursor::new(self, order)
    }
}

/// Iterator adapter returned by [`TreeCursor::nodes`].
pub struct Nodes<'t> {
    cursor: TreeCursor<'t>,
}

impl<'t> Iterator for Nodes<'t> {
    type Item = &'t Node;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.has_next() {
            self.cursor.next().ok()
        } else {
            None
        }
    }
}

impl<'t> IntoIterator for TreeCursor<'t> {
    type Item = &'t Node;
    type IntoIter = Nodes<'t>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes()
    }
}

// ============================================================================
// Tests
// ============================================================================
