//! Crease: a document tree engine.
//!
//! Undoable edits, transactions, and change events layered over the
//! composite trees from `crease-tree`. The tree crate owns the data model
//! and the read side (cursors, visitors, selectors, rendering); this crate
//! owns mutation: the [`Edit`] IR, the undo/redo [`EditStack`], the
//! [`Document`] facade with its [`TreeEvent`] subscribers, [`Transaction`]
//! groups, and the [`NodeFactory`] registry.
//!
//! # Quick Start
//!
//! ```
//! use crease::{Document, Edit, Node, NodePath, Value};
//!
//! let mut doc = Document::new("notes");
//! doc.apply(Edit::Insert {
//!     parent: NodePath::root(),
//!     index: None,
//!     node: Node::leaf("first draft"),
//! })?;
//! doc.apply(Edit::SetValue {
//!     at: NodePath::parse("0")?,
//!     value: Value::from("second draft"),
//! })?;
//!
//! doc.undo()?;
//! assert_eq!(
//!     doc.node_at(&NodePath::parse("0")?)?.value(),
//!     Some(&Value::from("first draft")),
//! );
//! # Ok::<(), crease::CreaseError>(())
//! ```

// Tree model and read-side tooling - re-exported from crease-tree
pub use crease_tree::builder;
pub use crease_tree::cursor;
pub use crease_tree::node;
pub use crease_tree::path;
pub use crease_tree::select;
pub use crease_tree::visitor;

// Editing engine
pub mod document;
pub mod edit;
pub mod error;
pub mod factory;
pub mod notify;
pub mod txn;

pub use crease_tree::{
    Branch, BuildError, Leaf, Node, NodeKind, NodePath, PathError, SelectError, Selector,
    TraversalOrder, TraverseError, TreeBuilder, TreeCursor, Value, VisitResult, Visitor,
};

pub use document::Document;
pub use edit::{AppliedEdit, Edit, EditError, EditStack};
pub use error::CreaseError;
pub use factory::{FactoryError, NodeFactory};
pub use notify::{EventHub, SubscriberId, TreeEvent};
pub use txn::{Transaction, TxnError};
