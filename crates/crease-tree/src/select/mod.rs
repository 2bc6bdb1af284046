//! Selectors: pick nodes out of a tree with a small expression language.
//!
//! ```
//! use crease_tree::{Branch, Node, TraversalOrder};
//! use crease_tree::select::Selector;
//!
//! let mut root = Branch::new("root");
//! root.push(Node::leaf(5i64));
//! root.push(Node::leaf(50i64));
//! root.push(Node::leaf("fifty"));
//!
//! let sel = Selector::parse("kind:int and value>10").unwrap();
//! let hits = sel.find_all(&root, TraversalOrder::PreOrder);
//! assert_eq!(hits.len(), 1);
//! ```
//!
//! Grammar and operator set are documented in [`expr`](self::expr).

mod expr;
mod predicate;

pub use expr::{parse_select_expr, SelectError, SelectExpr};
pub use predicate::{CmpOp, PredError, Predicate};

use std::fmt;
use std::str::FromStr;

use crate::cursor::{Nodes, TraversalOrder, TreeCursor};
use crate::node::{Branch, Node};

/// A parsed selector: the compiled expression plus its source text.
#[derive(Debug, Clone)]
pub struct Selector {
    expr: SelectExpr,
    source: String,
}

impl Selector {
    /// Parse and validate a selector.
    ///
    /// All failure modes live here: syntax errors, unknown keys, operator
    /// mismatches, bad regexes and numbers. A `Selector` that parsed will
    /// never fail to match.
    pub fn parse(input: &str) -> Result<Selector, SelectError> {
        let expr = parse_select_expr(input)?;
        Ok(Selector {
            expr,
            source: input.trim().to_string(),
        })
    }

    /// Test a single node.
    pub fn matches(&self, node: &Node) -> bool {
        self.expr.matches(node)
    }

    /// The compiled expression tree.
    pub fn expr(&self) -> &SelectExpr {
        &self.expr
    }

    /// The source text this selector was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Every matching descendant of `root`, in traversal order.
    pub fn find_all<'t>(&self, root: &'t Branch, order: TraversalOrder) -> Vec<&'t Node> {
        root.cursor(order)
            .nodes()
            .filter(|node| self.matches(node))
            .collect()
    }

    /// First matching descendant of `root`, in traversal order.
    pub fn find_first<'t>(&self, root: &'t Branch, order: TraversalOrder) -> Option<&'t Node> {
        root.cursor(order).nodes().find(|node| self.matches(node))
    }
}

impl FromStr for Selector {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Filtering adapter returned by [`TreeCursor::selected`].
pub struct Selected<'t, 's> {
    nodes: Nodes<'t>,
    selector: &'s Selector,
}

impl<'t> Iterator for Selected<'t, '_> {
    type Item = &'t Node;

    fn next(&mut self) -> Option<Self::Item> {
        let selector = self.selector;
        self.nodes.by_ref().find(|node| selector.matches(node))
    }
}

impl<'t> TreeCursor<'t> {
    /// Consume the cursor into an iterator over matching nodes only.
    pub fn selected(self, selector: &Selector) -> Selected<'t, '_> {
        Selected {
            nodes: self.nodes(),
            selector,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
