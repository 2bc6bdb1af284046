//! End-to-end editing scenarios: builder to document to history to events.
//!
//! Unit behavior lives next to each module; these tests exercise the
//! public surface the way an embedding application would, with several
//! subsystems in play at once.

use std::cell::RefCell;
use std::rc::Rc;

use crease::visitor::{reduce, Sum};
use crease::{
    Branch, Document, Edit, Node, NodeFactory, NodePath, Selector, TraversalOrder, TreeBuilder,
    Value,
};

fn path(s: &str) -> NodePath {
    NodePath::parse(s).unwrap()
}

fn journal() -> Branch {
    let mut builder = TreeBuilder::new("journal");
    builder
        .branch("monday")
        .leaf("standup")
        .leaf(2i64)
        .end()
        .unwrap()
        .branch("tuesday")
        .leaf("review")
        .end()
        .unwrap();
    builder.finish().unwrap()
}

#[test]
fn edits_undo_and_redo_round_trip_through_the_document() {
    let mut doc = Document::from_root(journal());
    let original = doc.root().clone();

    doc.apply(Edit::SetValue {
        at: path("0/1"),
        value: Value::Int(3),
    })
    .unwrap();
    doc.apply(Edit::Rename {
        at: path("1"),
        label: "wednesday".to_string(),
    })
    .unwrap();
    doc.apply(Edit::Insert {
        parent: path("1"),
        index: Some(0),
        node: Node::leaf("planning"),
    })
    .unwrap();
    let edited = doc.root().clone();
    assert_ne!(edited, original);

    while doc.undo().unwrap() {}
    assert_eq!(*doc.root(), original);
    assert_eq!(doc.undo_depth(), 0);

    while doc.redo().unwrap() {}
    assert_eq!(*doc.root(), edited);
    assert_eq!(doc.redo_depth(), 0);
}

#[test]
fn subscribers_see_each_change_exactly_once_in_order() {
    let mut doc = Document::from_root(journal());
    let log = Rc::new(RefCell::new(Vec::new()));

    let first = {
        let sink = Rc::clone(&log);
        doc.subscribe(move |event| sink.borrow_mut().push(format!("a:{}", event)))
    };
    {
        let sink = Rc::clone(&log);
        doc.subscribe(move |event| sink.borrow_mut().push(format!("b:{}", event)));
    }

    doc.apply(Edit::Remove { at: path("1/0") }).unwrap();
    assert!(doc.unsubscribe(first));
    doc.undo().unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            "a:removed at '1/0'",
            "b:removed at '1/0'",
            "b:reverted at '1/0'",
        ]
    );
}

#[test]
fn dropped_transactions_leave_no_trace() {
    let mut doc = Document::from_root(journal());
    let before = doc.root().clone();
    let revision = doc.revision();

    {
        let mut txn = doc.begin();
        txn.apply(Edit::Rename {
            at: NodePath::root(),
            label: "scratch".to_string(),
        })
        .unwrap();
        txn.apply(Edit::Remove { at: path("0") }).unwrap();
        // No commit.
    }

    assert_eq!(*doc.root(), before);
    // Rollback runs through undo, so the revision still advances.
    assert!(doc.revision() > revision);
}

#[test]
fn committed_transactions_stay_individually_undoable() {
    let mut doc = Document::from_root(journal());

    let mut txn = doc.begin();
    txn.apply(Edit::Rename {
        at: NodePath::root(),
        label: "week 1".to_string(),
    })
    .unwrap();
    txn.apply(Edit::SetValue {
        at: path("0/1"),
        value: Value::Int(9),
    })
    .unwrap();
    txn.commit().unwrap();

    assert_eq!(doc.root().label(), "week 1");
    assert_eq!(doc.undo_depth(), 2);
    doc.undo().unwrap();
    assert_eq!(
        doc.node_at(&path("0/1")).unwrap().value(),
        Some(&Value::Int(2))
    );
    assert_eq!(doc.root().label(), "week 1");
}

#[test]
fn the_edit_ir_round_trips_through_json_and_replays() {
    let edits = vec![
        Edit::Insert {
            parent: NodePath::root(),
            index: None,
            node: Node::leaf(1.5),
        },
        Edit::Rename {
            at: path("0"),
            label: "renamed".to_string(),
        },
        Edit::SetValue {
            at: path("0/0"),
            value: Value::Bool(true),
        },
        Edit::Remove { at: path("1/0") },
    ];

    let json = serde_json::to_string(&edits).unwrap();
    let parsed: Vec<Edit> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, edits);

    // Same script, two documents, identical outcome.
    let mut a = Document::from_root(journal());
    let mut b = Document::from_root(journal());
    for edit in &parsed {
        a.apply(edit.clone()).unwrap();
        b.apply(edit.clone()).unwrap();
    }
    assert_eq!(a.root(), b.root());
    assert_eq!(a.revision(), b.revision());
}

#[test]
fn failed_flush_can_be_retried_after_repair() {
    let mut doc = Document::from_root(journal());
    doc.queue(Edit::Rename {
        at: NodePath::root(),
        label: "first".to_string(),
    });
    doc.queue(Edit::SetValue {
        at: path("2"),
        value: Value::Int(0),
    });
    doc.queue(Edit::Rename {
        at: NodePath::root(),
        label: "second".to_string(),
    });

    assert!(doc.flush().is_err());
    assert_eq!(doc.root().label(), "first");
    assert_eq!(doc.queued(), 2);

    // Give the stuck edit a target, then retry.
    doc.apply(Edit::Insert {
        parent: NodePath::root(),
        index: None,
        node: Node::leaf(7i64),
    })
    .unwrap();
    assert_eq!(doc.flush().unwrap(), 2);
    assert_eq!(doc.root().label(), "second");
    assert_eq!(
        doc.node_at(&path("2")).unwrap().value(),
        Some(&Value::Int(0))
    );
}

#[test]
fn factory_built_nodes_flow_through_edits_and_selectors() {
    let mut factory = NodeFactory::new();
    factory
        .register("task", || {
            let mut branch = Branch::new("task");
            branch.push(Node::leaf(false));
            branch.into()
        })
        .unwrap();

    let mut doc = Document::new("board");
    for _ in 0..3 {
        let node = factory.create("task").unwrap();
        doc.apply(Edit::Insert {
            parent: NodePath::root(),
            index: None,
            node,
        })
        .unwrap();
    }
    doc.apply(Edit::SetValue {
        at: path("1/0"),
        value: Value::Bool(true),
    })
    .unwrap();

    let flags: Selector = "kind:bool".parse().unwrap();
    let done = doc
        .select(&flags, TraversalOrder::PreOrder)
        .into_iter()
        .filter(|node| node.value() == Some(&Value::Bool(true)))
        .count();
    assert_eq!(done, 1);

    let tasks: Selector = "label:task".parse().unwrap();
    assert_eq!(doc.select(&tasks, TraversalOrder::BreadthFirst).len(), 3);
}

#[test]
fn reads_and_reduction_track_the_editing_session() {
    let mut doc = Document::from_root(journal());
    assert_eq!(
        reduce(doc.root(), TraversalOrder::PostOrder, &mut Sum::new()),
        2.0
    );

    doc.apply(Edit::Insert {
        parent: path("1"),
        index: None,
        node: Node::leaf(40i64),
    })
    .unwrap();
    assert_eq!(
        reduce(doc.root(), TraversalOrder::PostOrder, &mut Sum::new()),
        42.0
    );

    doc.undo().unwrap();
    assert_eq!(
        reduce(doc.root(), TraversalOrder::PostOrder, &mut Sum::new()),
        2.0
    );
}
