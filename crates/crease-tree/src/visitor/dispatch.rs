//! Walk functions: drive a [`Visitor`] over a subtree.
//!
//! Hand-written dispatch, one function per shape. `Stop` propagates
//! immediately and suppresses the remaining `leave_*` hooks;
//! `SkipChildren` suppresses descent but the matching `leave_*` still runs.

use crate::node::{Branch, Leaf, Node, NodeKind};
use crate::visitor::traits::{VisitResult, Visitor};

/// Walk a full node: generic hooks around the kind-specific walk.
pub fn walk_node<V: Visitor>(visitor: &mut V, node: &Node) -> VisitResult {
    match visitor.visit_node(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            let inner = match node {
                Node::Branch(branch) => walk_branch(visitor, branch),
                Node::Leaf(leaf) => walk_leaf(visitor, leaf),
            };
            if inner == VisitResult::Stop {
                return VisitResult::Stop;
            }
        }
    }
    visitor.leave_node(node);
    VisitResult::Continue
}

/// Walk a branch: `visit_branch`, children in insertion order,
/// `leave_branch`. Children go through [`walk_node`], so the generic hooks
/// fire for each of them.
pub fn walk_branch<V: Visitor>(visitor: &mut V, branch: &Branch) -> VisitResult {
    match visitor.visit_branch(branch) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            for child in branch.children() {
                if walk_node(visitor, child) == VisitResult::Stop {
                    return VisitResult::Stop;
                }
            }
        }
    }
    visitor.leave_branch(branch);
    VisitResult::Continue
}

/// Walk a leaf: `visit_leaf`, then the typed hook pair for its value kind,
/// then `leave_leaf`.
pub fn walk_leaf<V: Visitor>(visitor: &mut V, leaf: &Leaf) -> VisitResult {
    match visitor.visit_leaf(leaf) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            let typed = match leaf.kind() {
                NodeKind::Int => visitor.visit_int_leaf(leaf),
                NodeKind::Float => visitor.visit_float_leaf(leaf),
                NodeKind::Bool => visitor.visit_bool_leaf(leaf),
                NodeKind::Text => visitor.visit_text_leaf(leaf),
                // Leaf::kind comes from the value, never Branch.
                NodeKind::Branch => unreachable!(),
            };
            if typed == VisitResult::Stop {
                return VisitResult::Stop;
            }
            match leaf.kind() {
                NodeKind::Int => visitor.leave_int_leaf(leaf),
                NodeKind::Float => visitor.leave_float_leaf(leaf),
                NodeKind::Bool => visitor.leave_bool_leaf(leaf),
                NodeKind::Text => visitor.leave_text_leaf(leaf),
                NodeKind::Branch => unreachable!(),
            }
        }
    }
    visitor.leave_leaf(leaf);
    VisitResult::Continue
}

// ============================================================================
// Tests
// ============================================================================
