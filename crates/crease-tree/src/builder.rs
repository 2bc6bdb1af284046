//! Tree builder: grow a tree without hand-threading child vectors.
//!
//! The builder keeps a stack of open branches. `branch()` opens one,
//! `end()` closes the innermost, `finish()` validates that everything
//! opened was closed and hands back the root. Misuse is a hard error:
//! `end()` with nothing open fails immediately, `finish()` with open
//! branches fails with their labels.

use thiserror::Error;

use crate::node::{Branch, Node, Value};

/// Error from builder misuse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("end() called with no open branch")]
    NoOpenBranch,

    #[error("finish() with unclosed branches: {}", .open.join(", "))]
    UnclosedBranch { open: Vec<String> },
}

/// Stack-based tree builder.
///
/// ```
/// use crease_tree::TreeBuilder;
///
/// let mut b = TreeBuilder::new("root");
/// b.leaf(10i64);
/// b.branch("nested");
/// b.leaf(20i64);
/// b.end().unwrap();
/// let tree = b.finish().unwrap();
///
/// assert_eq!(tree.len(), 2);
/// assert_eq!(tree.count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    root: Branch,
    open: Vec<Branch>,
}

impl TreeBuilder {
    /// Start building under a root branch with the given label.
    pub fn new(root_label: impl Into<String>) -> TreeBuilder {
        TreeBuilder {
            root: Branch::new(root_label),
            open: Vec::new(),
        }
    }

    /// Open a nested branch; children go into it until [`TreeBuilder::end`].
    pub fn branch(&mut self, label: impl Into<String>) -> &mut Self {
        self.open.push(Branch::new(label));
        self
    }

    /// Append a leaf to the innermost open branch (or the root).
    pub fn leaf(&mut self, value: impl Into<Value>) -> &mut Self {
        self.attach(Node::leaf(value));
        self
    }

    /// Append a prebuilt subtree to the innermost open branch (or the root).
    pub fn node(&mut self, node: impl Into<Node>) -> &mut Self {
        self.attach(node.into());
        self
    }

    /// Close the innermost open branch, attaching it to its parent.
    pub fn end(&mut self) -> Result<&mut Self, BuildError> {
        let closed = self.open.pop().ok_or(BuildError::NoOpenBranch)?;
        self.attach(Node::Branch(closed));
        Ok(self)
    }

    /// Number of branches currently open (0 means only the root is live).
    pub fn open_depth(&self) -> usize {
        self.open.len()
    }

    /// Validate and return the finished tree.
    pub fn finish(self) -> Result<Branch, BuildError> {
        if !self.open.is_empty() {
            return Err(BuildError::UnclosedBranch {
                open: self
                    .open
                    .iter()
                    .map(|branch| branch.label().to_string())
                    .collect(),
            });
        }
        Ok(self.root)
    }

    fn attach(&mut self, node: Node) {
        match self.open.last_mut() {
            Some(branch) => branch.push(node),
            None => self.root.push(node),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
