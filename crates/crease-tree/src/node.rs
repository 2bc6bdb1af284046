//! Node model: values, leaves, branches over a closed kind set.
//!
//! This module implements the tree that everything else in the crate walks:
//! - `Value`: the closed set of leaf payloads (int, float, bool, text)
//! - `Leaf`: terminal node holding a single value
//! - `Branch`: labeled interior node with an ordered child list
//! - `Node`: the leaf/branch union
//!
//! Children are owned exclusively by their parent, so a tree is always a
//! tree: no sharing, no cycles, and `Clone` is a deep copy.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Values
// ============================================================================

/// Leaf payload, drawn from the closed kind set.
///
/// Equality is structural. `Float` compares as raw `f64` equality, which is
/// what the structural assertions in this crate need; callers doing numeric
/// work should compare through [`Value::as_numeric`] with their own
/// tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Value {
    /// The kind discriminant for this value.
    pub fn kind(&self) -> NodeKind {
        match self {
            Value::Int(_) => NodeKind::Int,
            Value::Float(_) => NodeKind::Float,
            Value::Bool(_) => NodeKind::Bool,
            Value::Text(_) => NodeKind::Text,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric reading: `Int` and `Float` widen to `f64`; `Bool` and `Text`
    /// are not numeric.
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(x) => Some(*x),
            Value::Bool(_) | Value::Text(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

// ============================================================================
// Node Kinds
// ============================================================================

/// Discriminant covering every concrete node kind.
///
/// Dispatch tables and selectors key on this, so the set is closed on
/// purpose: adding a kind means extending the enum and every match over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Branch,
    Int,
    Float,
    Bool,
    Text,
}

impl NodeKind {
    /// Stable lowercase name, as used by selectors (`kind:int`).
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Branch => "branch",
            NodeKind::Int => "int",
            NodeKind::Float => "float",
            NodeKind::Bool => "bool",
            NodeKind::Text => "text",
        }
    }

    /// Parse a selector kind name. Returns `None` for unknown names.
    pub fn parse(name: &str) -> Option<NodeKind> {
        match name {
            "branch" => Some(NodeKind::Branch),
            "int" => Some(NodeKind::Int),
            "float" => Some(NodeKind::Float),
            "bool" => Some(NodeKind::Bool),
            "text" => Some(NodeKind::Text),
            _ => None,
        }
    }

    /// Every kind, in a fixed order. Handy for exhaustive registration.
    pub fn all() -> [NodeKind; 5] {
        [
            NodeKind::Branch,
            NodeKind::Int,
            NodeKind::Float,
            NodeKind::Bool,
            NodeKind::Text,
        ]
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Leaves
// ============================================================================

/// Terminal node: one value, no children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaf {
    value: Value,
}

impl Leaf {
    pub fn new(value: impl Into<Value>) -> Self {
        Leaf {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Replace the value, returning the previous one (the edit layer uses
    /// the return to capture undo state).
    pub fn set_value(&mut self, value: impl Into<Value>) -> Value {
        std::mem::replace(&mut self.value, value.into())
    }

    pub fn kind(&self) -> NodeKind {
        self.value.kind()
    }
}

// ============================================================================
// Branches
// ============================================================================

/// Interior node: a label plus an ordered child list.
///
/// Insertion order is preserved and is exactly the order every cursor and
/// visitor observes the children in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    label: String,
    children: Vec<Node>,
}

impl Branch {
    /// Create an empty branch with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Branch {
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Create a branch with an initial child list.
    pub fn with_children(label: impl Into<String>, children: Vec<Node>) -> Self {
        Branch {
            label: label.into(),
            children,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the label, returning the previous one.
    pub fn set_label(&mut self, label: impl Into<String>) -> String {
        std::mem::replace(&mut self.label, label.into())
    }

    /// Append a child. Duplicates (equal subtrees) are allowed.
    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Insert a child at `index`, shifting later children right.
    ///
    /// # Panics
    /// Panics if `index > len()`. Callers that cannot guarantee the bound
    /// check it first; edit application validates before calling in.
    pub fn insert(&mut self, index: usize, child: impl Into<Node>) {
        self.children.insert(index, child.into());
    }

    /// Remove and return the child at `index`, shifting later children left.
    ///
    /// # Panics
    /// Panics if `index >= len()`; same contract as [`Branch::insert`].
    pub fn remove(&mut self, index: usize) -> Node {
        self.children.remove(index)
    }

    /// Ordered read-only view of the immediate children.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.children.get_mut(index)
    }

    /// Number of immediate children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of descendant nodes (this branch itself not counted).
    pub fn count(&self) -> usize {
        self.children.iter().map(Node::count).sum()
    }

    /// Height of the subtree under this branch: 0 when empty, otherwise
    /// one more than the deepest child.
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(Node::depth)
            .max()
            .map_or(0, |d| d + 1)
    }
}

// ============================================================================
// Nodes
// ============================================================================

/// The leaf/branch union the rest of the crate traverses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Leaf(Leaf),
    Branch(Branch),
}

impl Node {
    /// Shorthand for a leaf node.
    pub fn leaf(value: impl Into<Value>) -> Node {
        Node::Leaf(Leaf::new(value))
    }

    /// Shorthand for an empty branch node.
    pub fn branch(label: impl Into<String>) -> Node {
        Node::Branch(Branch::new(label))
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Leaf(leaf) => leaf.kind(),
            Node::Branch(_) => NodeKind::Branch,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, Node::Branch(_))
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Branch(_) => None,
        }
    }

    pub fn as_leaf_mut(&mut self) -> Option<&mut Leaf> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Branch(_) => None,
        }
    }

    pub fn as_branch(&self) -> Option<&Branch> {
        match self {
            Node::Branch(branch) => Some(branch),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_branch_mut(&mut self) -> Option<&mut Branch> {
        match self {
            Node::Branch(branch) => Some(branch),
            Node::Leaf(_) => None,
        }
    }

    /// Leaf value shortcut; `None` for branches.
    pub fn value(&self) -> Option<&Value> {
        self.as_leaf().map(Leaf::value)
    }

    /// Branch label shortcut; `None` for leaves.
    pub fn label(&self) -> Option<&str> {
        self.as_branch().map(Branch::label)
    }

    /// Size of this subtree, the node itself included.
    pub fn count(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Branch(branch) => 1 + branch.count(),
        }
    }

    /// Height of this subtree: 0 for a leaf, `Branch::depth` otherwise.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Branch(branch) => branch.depth(),
        }
    }
}

impl From<Leaf> for Node {
    fn from(leaf: Leaf) -> Self {
        Node::Leaf(leaf)
    }
}

impl From<Branch> for Node {
    fn from(branch: Branch) -> Self {
        Node::Branch(branch)
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::Leaf(Leaf::new(value))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Branch {
        let mut root = Branch::new("root");
        root.push(Node::leaf(10i64));
        root.push(Node::leaf(2.5f64));
        let mut nested = Branch::new("nested");
        nested.push(Node::leaf("hello"));
        nested.push(Node::leaf(true));
        root.push(nested);
        root
    }

    mod construction {
        use super::*;

        #[test]
        fn push_preserves_insertion_order() {
            let root = sample_tree();
            assert_eq!(root.len(), 3);
            assert_eq!(root.child(0).and_then(Node::value), Some(&Value::Int(10)));
            assert_eq!(
                root.child(1).and_then(Node::value),
                Some(&Value::Float(2.5))
            );
            assert_eq!(root.child(2).and_then(Node::label), Some("nested"));
        }

        #[test]
        fn insert_shifts_children_right() {
            let mut root = sample_tree();
            root.insert(1, Node::leaf(99i64));
            assert_eq!(root.len(), 4);
            assert_eq!(root.child(1).and_then(Node::value), Some(&Value::Int(99)));
            assert_eq!(
                root.child(2).and_then(Node::value),
                Some(&Value::Float(2.5))
            );
        }

        #[test]
        fn remove_returns_the_detached_child() {
            let mut root = sample_tree();
            let removed = root.remove(0);
            assert_eq!(removed.value(), Some(&Value::Int(10)));
            assert_eq!(root.len(), 2);
        }

        #[test]
        fn duplicate_children_are_allowed() {
            let mut root = Branch::new("root");
            root.push(Node::leaf(7i64));
            root.push(Node::leaf(7i64));
            assert_eq!(root.len(), 2);
            assert_eq!(root.child(0), root.child(1));
        }
    }

    mod deep_clone {
        use super::*;

        #[test]
        fn clone_matches_original_shape_and_values() {
            let root = sample_tree();
            let copy = root.clone();
            assert_eq!(root, copy);
        }

        #[test]
        fn mutating_the_clone_leaves_the_original_untouched() {
            let root = sample_tree();
            let mut copy = root.clone();

            copy.push(Node::leaf(77i64));
            if let Some(Node::Leaf(leaf)) = copy.child_mut(0) {
                leaf.set_value(0i64);
            }
            if let Some(Node::Branch(nested)) = copy.child_mut(2) {
                nested.set_label("renamed");
            }

            assert_eq!(root.len(), 3);
            assert_eq!(root.child(0).and_then(Node::value), Some(&Value::Int(10)));
            assert_eq!(root.child(2).and_then(Node::label), Some("nested"));
            assert_ne!(root, copy);
        }
    }

    mod measures {
        use super::*;

        #[test]
        fn count_totals_every_descendant() {
            let root = sample_tree();
            // 10, 2.5, nested, "hello", true
            assert_eq!(root.count(), 5);
            assert_eq!(Node::Branch(root).count(), 6);
        }

        #[test]
        fn depth_is_zero_for_empty_and_grows_with_nesting() {
            assert_eq!(Branch::new("empty").depth(), 0);
            assert_eq!(sample_tree().depth(), 2);
            assert_eq!(Node::leaf(1i64).depth(), 0);
        }
    }

    mod values {
        use super::*;

        #[test]
        fn numeric_reading_covers_int_and_float_only() {
            assert_eq!(Value::Int(4).as_numeric(), Some(4.0));
            assert_eq!(Value::Float(1.5).as_numeric(), Some(1.5));
            assert_eq!(Value::Bool(true).as_numeric(), None);
            assert_eq!(Value::Text("4".into()).as_numeric(), None);
        }

        #[test]
        fn display_renders_text_quoted() {
            assert_eq!(Value::Int(10).to_string(), "10");
            assert_eq!(Value::Float(2.5).to_string(), "2.5");
            assert_eq!(Value::Bool(false).to_string(), "false");
            assert_eq!(Value::Text("hi".into()).to_string(), "\"hi\"");
        }

        #[test]
        fn kind_names_round_trip_through_parse() {
            for kind in NodeKind::all() {
                assert_eq!(NodeKind::parse(kind.name()), Some(kind));
            }
            assert_eq!(NodeKind::parse("composite"), None);
        }
    }

    mod serde_model {
        use super::*;

        #[test]
        fn tree_round_trips_through_json() {
            let root = sample_tree();
            let json = serde_json::to_string(&root).unwrap();
            let back: Branch = serde_json::from_str(&json).unwrap();
            assert_eq!(root, back);
        }

        #[test]
        fn leaf_serializes_with_kind_tag() {
            let json = serde_json::to_value(Node::leaf(10i64)).unwrap();
            assert_eq!(json["leaf"]["value"]["int"], 10);
        }
    }
}
