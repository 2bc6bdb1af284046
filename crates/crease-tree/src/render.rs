//! Rendering: human-readable outlines and JSON dumps.
//!
//! The outline form is for eyes and logs; its exact formatting is not a
//! stable interface. The JSON form is the serde model and round-trips.

use std::fmt;

use crate::node::{Branch, Node};

fn fmt_branch(f: &mut fmt::Formatter<'_>, branch: &Branch, depth: usize) -> fmt::Result {
    let pad = "  ".repeat(depth);
    if branch.is_empty() {
        return write!(f, "{}'{}' {{}}", pad, branch.label());
    }
    writeln!(f, "{}'{}' {{", pad, branch.label())?;
    for child in branch.children() {
        match child {
            Node::Leaf(leaf) => writeln!(f, "{}  {}", pad, leaf.value())?,
            Node::Branch(inner) => {
                fmt_branch(f, inner, depth + 1)?;
                writeln!(f)?;
            }
        }
    }
    write!(f, "{}}}", pad)
}

impl fmt::Display for Branch {
    /// Indented outline: branch labels quoted with `'`, leaf values on
    /// their own lines, two-space indent per level.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_branch(f, self, 0)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Leaf(leaf) => write!(f, "{}", leaf.value()),
            Node::Branch(branch) => fmt_branch(f, branch, 0),
        }
    }
}

impl Branch {
    /// Recursive outline of this subtree; each child renders itself.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Compact JSON of the serde model.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Pretty-printed JSON of the serde model.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Node {
    /// Outline of this node (single line for a leaf).
    pub fn render(&self) -> String {
        self.to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
