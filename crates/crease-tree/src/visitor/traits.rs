//! Visitor trait with macro-generated hook pairs.
//!
//! The [`Visitor`] trait exposes a `visit_*`/`leave_*` pair per hook:
//! `visit_*` runs before descent (pre-order), `leave_*` after (post-order).
//! Defaults are `Continue`/no-op, so implementations override only the
//! hooks they care about.

use crate::node::{Branch, Leaf, Node};

/// Control flow returned by `visit_*` hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitResult {
    /// Keep going: descend into children (or typed leaf hooks).
    Continue,
    /// Skip the descent but still call the matching `leave_*` hook.
    SkipChildren,
    /// Halt the whole walk immediately; no further hooks run.
    Stop,
}

/// Generates `visit_*`/`leave_*` method pairs with default implementations.
macro_rules! visitor_methods {
    ($($(#[$meta:meta])* $base_name:ident : $node_type:ty),* $(,)?) => {
        paste::paste! {
            $(
                $(#[$meta])*
                #[allow(unused_variables)]
                fn [<visit_ $base_name>](&mut self, node: &$node_type) -> VisitResult {
                    VisitResult::Continue
                }

                #[allow(unused_variables)]
                fn [<leave_ $base_name>](&mut self, node: &$node_type) {}
            )*
        }
    };
}

/// Read-only tree visitor.
///
/// Hook order for a branch: `visit_node`, `visit_branch`, the children in
/// insertion order, `leave_branch`, `leave_node`. For a leaf: `visit_node`,
/// `visit_leaf`, the typed hook for its value kind, the typed leave,
/// `leave_leaf`, `leave_node`. Driven by the `walk_*` functions in
/// [`crate::visitor::dispatch`].
pub trait Visitor {
    visitor_methods! {
        /// Generic hook, called for every node before kind-specific hooks.
        /// `SkipChildren` here suppresses the kind-specific hooks too.
        node: Node,
        /// Interior nodes. `SkipChildren` skips the child walk.
        branch: Branch,
        /// All leaves. `SkipChildren` suppresses the typed hook pair.
        leaf: Leaf,
        /// Leaves holding an `Int` value.
        int_leaf: Leaf,
        /// Leaves holding a `Float` value.
        float_leaf: Leaf,
        /// Leaves holding a `Bool` value.
        bool_leaf: Leaf,
        /// Leaves holding a `Text` value.
        text_leaf: Leaf,
    }
}
