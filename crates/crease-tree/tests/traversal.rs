//! End-to-end traversal tests: builder, cursors, visitors, selectors, and
//! the serde model working against one realistic tree.

use itertools::Itertools;

use crease_tree::visitor::{reduce, walk_branch, Count, DispatchTable, MaxDepth, Reduce, Sum};
use crease_tree::{
    Branch, Node, NodeKind, NodePath, Selector, TraversalOrder, TraverseError, TreeBuilder,
};

/// inventory
/// ├─ 10
/// ├─ crates
/// │  ├─ 20
/// │  ├─ nested
/// │  │  └─ "tag"
/// │  └─ 2.5
/// ├─ true
/// └─ spares
///    └─ 30
fn inventory() -> Branch {
    let mut b = TreeBuilder::new("inventory");
    b.leaf(10i64);
    b.branch("crates");
    b.leaf(20i64);
    b.branch("nested");
    b.leaf("tag");
    b.end().unwrap();
    b.leaf(2.5f64);
    b.end().unwrap();
    b.leaf(true);
    b.branch("spares");
    b.leaf(30i64);
    b.end().unwrap();
    b.finish().unwrap()
}

fn tag(node: &Node) -> String {
    match node {
        Node::Leaf(leaf) => leaf.value().to_string(),
        Node::Branch(branch) => branch.label().to_string(),
    }
}

#[test]
fn the_three_orders_visit_the_same_set_differently() {
    let root = inventory();

    let pre = root.cursor(TraversalOrder::PreOrder).nodes().map(tag);
    itertools::assert_equal(
        pre,
        [
            "10", "crates", "20", "nested", "\"tag\"", "2.5", "true", "spares", "30",
        ]
        .map(String::from),
    );

    let post = root.cursor(TraversalOrder::PostOrder).nodes().map(tag);
    itertools::assert_equal(
        post,
        [
            "10", "20", "\"tag\"", "nested", "2.5", "crates", "true", "30", "spares",
        ]
        .map(String::from),
    );

    let bfs = root.cursor(TraversalOrder::BreadthFirst).nodes().map(tag);
    itertools::assert_equal(
        bfs,
        [
            "10", "crates", "true", "spares", "20", "nested", "2.5", "30", "\"tag\"",
        ]
        .map(String::from),
    );
}

#[test]
fn every_order_enumerates_every_descendant_exactly_once() {
    let root = inventory();
    for order in [
        TraversalOrder::PreOrder,
        TraversalOrder::PostOrder,
        TraversalOrder::BreadthFirst,
    ] {
        let tags = root.cursor(order).nodes().map(tag).sorted().collect_vec();
        assert_eq!(tags.len(), root.count(), "{}", order);
        assert_eq!(tags.iter().unique().count(), tags.len(), "{}", order);
    }
}

#[test]
fn exhausted_cursor_refuses_to_wrap_around() {
    let root = inventory();
    let mut cursor = root.cursor(TraversalOrder::PostOrder);
    for _ in 0..root.count() {
        assert!(cursor.has_next());
        cursor.next().unwrap();
    }
    assert!(!cursor.has_next());
    assert_eq!(cursor.next(), Err(TraverseError::Exhausted));
}

#[test]
fn reducers_agree_across_orders() {
    let root = inventory();
    let mut sum = Sum::new();
    let pre = reduce(&root, TraversalOrder::PreOrder, &mut sum);
    sum.reset();
    let post = reduce(&root, TraversalOrder::PostOrder, &mut sum);
    sum.reset();
    let bfs = reduce(&root, TraversalOrder::BreadthFirst, &mut sum);

    // 10 + 20 + 2.5 + 30
    assert_eq!(pre, 62.5);
    assert_eq!(post, 62.5);
    assert_eq!(bfs, 62.5);

    let n = reduce(&root, TraversalOrder::PreOrder, &mut Count::new());
    assert_eq!(n, root.count());
}

#[test]
fn walk_and_dispatch_cover_the_same_tree() {
    let root = inventory();

    let mut gauge = MaxDepth::new();
    walk_branch(&mut gauge, &root);
    // inventory > crates > nested
    assert_eq!(gauge.deepest(), 3);

    let mut table = DispatchTable::new();
    for kind in NodeKind::all() {
        table.on(kind, move |_| kind);
    }
    let kinds = table.run_over(&root, TraversalOrder::PreOrder).unwrap();
    assert_eq!(kinds.len(), root.count());
    assert_eq!(
        kinds.iter().filter(|k| **k == NodeKind::Branch).count(),
        3
    );
}

#[test]
fn selectors_compose_over_the_full_tree() {
    let root = inventory();

    let ints = Selector::parse("kind:int").unwrap();
    assert_eq!(ints.find_all(&root, TraversalOrder::PreOrder).len(), 3);

    let big = Selector::parse("kind:int and value>=20").unwrap();
    let values = big
        .find_all(&root, TraversalOrder::PreOrder)
        .into_iter()
        .map(tag)
        .collect_vec();
    assert_eq!(values, ["20", "30"]);

    let nested_or_text = Selector::parse("label:nested or kind:text").unwrap();
    assert_eq!(
        nested_or_text
            .find_all(&root, TraversalOrder::PreOrder)
            .len(),
        2
    );
}

#[test]
fn clones_are_fully_independent() {
    let root = inventory();
    let mut copy = root.clone();

    let deep = NodePath::parse("1/1/0").unwrap();
    if let Node::Leaf(leaf) = copy.node_at_mut(&deep).unwrap() {
        leaf.set_value("changed");
    }
    copy.branch_at_mut(&NodePath::parse("3").unwrap())
        .unwrap()
        .push(Node::leaf(99i64));

    assert_eq!(
        root.node_at(&deep).unwrap().value().unwrap().as_text(),
        Some("tag")
    );
    assert_eq!(
        root.branch_at(&NodePath::parse("3").unwrap()).unwrap().len(),
        1
    );
    assert_ne!(root, copy);
}

#[test]
fn json_round_trip_preserves_traversal() {
    let root = inventory();
    let json = root.to_json_pretty().unwrap();
    let back: Branch = serde_json::from_str(&json).unwrap();

    itertools::assert_equal(
        root.cursor(TraversalOrder::PreOrder).nodes().map(tag),
        back.cursor(TraversalOrder::PreOrder).nodes().map(tag),
    );
    assert_eq!(root, back);
}
