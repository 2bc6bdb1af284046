//! Reducers: accumulate a result over a cursor-driven traversal.
//!
//! A [`Reduce`] observes nodes one at a time and folds them into a result.
//! [`reduce`] drives one through a cursor, so the accumulation order is
//! exactly the traversal order. `finish()` is a read, not a drain: calling
//! it twice returns the same value, and `reset()` starts a fresh run.

use crate::cursor::TraversalOrder;
use crate::node::{Branch, Node, Value};
use crate::visitor::traits::{VisitResult, Visitor};

/// An accumulation over observed nodes.
pub trait Reduce {
    type Output;

    /// Fold one node into the accumulator.
    fn observe(&mut self, node: &Node);

    /// Current accumulated result. Idempotent.
    fn finish(&self) -> Self::Output;

    /// Clear the accumulator for a fresh run.
    fn reset(&mut self);
}

/// Drive `reducer` over every descendant of `root` in `order` and return
/// the result. The reducer is not reset first; chain trees into one
/// accumulation by calling this repeatedly.
pub fn reduce<R: Reduce>(root: &Branch, order: TraversalOrder, reducer: &mut R) -> R::Output {
    for node in root.cursor(order) {
        reducer.observe(node);
    }
    reducer.finish()
}

// ============================================================================
// Fold: caller-supplied operator
// ============================================================================

/// Folds leaf values with a caller-supplied operator; branches contribute
/// nothing. For order-independent results the operator should be
/// associative and commutative; otherwise the traversal order shows.
pub struct Fold<T, F> {
    init: T,
    acc: T,
    op: F,
}

impl<T, F> Fold<T, F>
where
    T: Clone,
    F: FnMut(T, &Value) -> T,
{
    pub fn new(init: T, op: F) -> Self {
        Fold {
            acc: init.clone(),
            init,
            op,
        }
    }
}

impl<T, F> Reduce for Fold<T, F>
where
    T: Clone,
    F: FnMut(T, &Value) -> T,
{
    type Output = T;

    fn observe(&mut self, node: &Node) {
        if let Some(value) = node.value() {
            let acc = std::mem::replace(&mut self.acc, self.init.clone());
            self.acc = (self.op)(acc, value);
        }
    }

    fn finish(&self) -> T {
        self.acc.clone()
    }

    fn reset(&mut self) {
        self.acc = self.init.clone();
    }
}

// ============================================================================
// Canned reducers
// ============================================================================

/// Sum of numeric leaves (`Int` widened, `Float` as-is); other kinds are
/// ignored.
#[derive(Debug, Default, Clone)]
pub struct Sum {
    total: f64,
}

impl Sum {
    pub fn new() -> Self {
        Sum::default()
    }
}

impl Reduce for Sum {
    type Output = f64;

    fn observe(&mut self, node: &Node) {
        if let Some(x) = node.value().and_then(Value::as_numeric) {
            self.total += x;
        }
    }

    fn finish(&self) -> f64 {
        self.total
    }

    fn reset(&mut self) {
        self.total = 0.0;
    }
}

/// Counts every observed node, leaves and branches alike.
#[derive(Debug, Default, Clone)]
pub struct Count {
    seen: usize,
}

impl Count {
    pub fn new() -> Self {
        Count::default()
    }
}

impl Reduce for Count {
    type Output = usize;

    fn observe(&mut self, _node: &Node) {
        self.seen += 1;
    }

    fn finish(&self) -> usize {
        self.seen
    }

    fn reset(&mut self) {
        self.seen = 0;
    }
}

/// Arithmetic mean of numeric leaves; 0.0 when none were seen.
#[derive(Debug, Default, Clone)]
pub struct Average {
    total: f64,
    numeric: usize,
}

impl Average {
    pub fn new() -> Self {
        Average::default()
    }
}

impl Reduce for Average {
    type Output = f64;

    fn observe(&mut self, node: &Node) {
        if let Some(x) = node.value().and_then(Value::as_numeric) {
            self.total += x;
            self.numeric += 1;
        }
    }

    fn finish(&self) -> f64 {
        if self.numeric == 0 {
            0.0
        } else {
            self.total / self.numeric as f64
        }
    }

    fn reset(&mut self) {
        self.total = 0.0;
        self.numeric = 0;
    }
}

/// Clones every leaf value in visit order.
#[derive(Debug, Default, Clone)]
pub struct CollectValues {
    values: Vec<Value>,
}

impl CollectValues {
    pub fn new() -> Self {
        CollectValues::default()
    }
}

impl Reduce for CollectValues {
    type Output = Vec<Value>;

    fn observe(&mut self, node: &Node) {
        if let Some(value) = node.value() {
            self.values.push(value.clone());
        }
    }

    fn finish(&self) -> Vec<Value> {
        self.values.clone()
    }

    fn reset(&mut self) {
        self.values.clear();
    }
}

// ============================================================================
// MaxDepth: a walk-driven gauge
// ============================================================================

/// Deepest branch nesting seen by a walk.
///
/// This one needs enter/leave pairing, so it is a [`Visitor`] rather than a
/// [`Reduce`]: drive it with
/// [`walk_branch`](crate::visitor::walk_branch). The root branch counts as
/// depth 1.
#[derive(Debug, Default, Clone)]
pub struct MaxDepth {
    current: usize,
    deepest: usize,
}

impl MaxDepth {
    pub fn new() -> Self {
        MaxDepth::default()
    }

    pub fn deepest(&self) -> usize {
        self.deepest
    }
}

impl Visitor for MaxDepth {
    fn visit_branch(&mut self, _node: &Branch) -> VisitResult {
        self.current += 1;
        self.deepest = self.deepest.max(self.current);
        VisitResult::Continue
    }

    fn leave_branch(&mut self, _node: &Branch) {
        self.current -= 1;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visitor::dispatch::walk_branch;

    fn flat_tree() -> Branch {
        let mut root = Branch::new("root");
        root.push(Node::leaf(10i64));
        root.push(Node::leaf(20i64));
        root.push(Node::leaf(30i64));
        root
    }

    fn nested_tree() -> Branch {
        let mut root = Branch::new("root");
        root.push(Node::leaf(10i64));
        let mut inner = Branch::new("inner");
        inner.push(Node::leaf(20i64));
        root.push(inner);
        root
    }

    mod sums {
        use super::*;

        #[test]
        fn flat_int_leaves_sum_exactly() {
            let mut sum = Sum::new();
            let total = reduce(&flat_tree(), TraversalOrder::PreOrder, &mut sum);
            assert_eq!(total, 60.0);
        }

        #[test]
        fn nested_sum_is_order_independent() {
            let root = nested_tree();
            let mut sum = Sum::new();
            let pre = reduce(&root, TraversalOrder::PreOrder, &mut sum);
            sum.reset();
            let bfs = reduce(&root, TraversalOrder::BreadthFirst, &mut sum);
            assert_eq!(pre, 30.0);
            assert_eq!(bfs, 30.0);
        }

        #[test]
        fn non_numeric_leaves_are_ignored() {
            let mut root = flat_tree();
            root.push(Node::leaf(true));
            root.push(Node::leaf("skip me"));
            let total = reduce(&root, TraversalOrder::PreOrder, &mut Sum::new());
            assert_eq!(total, 60.0);
        }
    }

    mod folding {
        use super::*;

        #[test]
        fn fold_applies_the_caller_operator() {
            let mut product = Fold::new(1i64, |acc, v| acc * v.as_int().unwrap_or(1));
            let result = reduce(&flat_tree(), TraversalOrder::PreOrder, &mut product);
            assert_eq!(result, 6000);
        }

        #[test]
        fn finish_is_idempotent_and_reset_starts_over() {
            let mut sum = Fold::new(0i64, |acc, v| acc + v.as_int().unwrap_or(0));
            let first = reduce(&flat_tree(), TraversalOrder::PreOrder, &mut sum);
            assert_eq!(first, 60);
            assert_eq!(sum.finish(), 60);
            assert_eq!(sum.finish(), 60);

            sum.reset();
            assert_eq!(sum.finish(), 0);
            assert_eq!(reduce(&flat_tree(), TraversalOrder::PreOrder, &mut sum), 60);
        }

        #[test]
        fn without_reset_runs_accumulate() {
            let mut sum = Fold::new(0i64, |acc, v| acc + v.as_int().unwrap_or(0));
            reduce(&flat_tree(), TraversalOrder::PreOrder, &mut sum);
            let doubled = reduce(&flat_tree(), TraversalOrder::PreOrder, &mut sum);
            assert_eq!(doubled, 120);
        }
    }

    mod gauges {
        use super::*;

        #[test]
        fn count_includes_branches_and_leaves() {
            let n = reduce(&nested_tree(), TraversalOrder::PreOrder, &mut Count::new());
            // 10, inner, 20
            assert_eq!(n, 3);
        }

        #[test]
        fn average_ignores_non_numeric_and_handles_empty() {
            let mut root = flat_tree();
            root.push(Node::leaf("text"));
            let avg = reduce(&root, TraversalOrder::PreOrder, &mut Average::new());
            assert_eq!(avg, 20.0);

            let empty = Branch::new("empty");
            let none = reduce(&empty, TraversalOrder::PreOrder, &mut Average::new());
            assert_eq!(none, 0.0);
        }

        #[test]
        fn collect_values_follows_visit_order() {
            let mut collect = CollectValues::new();
            let values = reduce(&nested_tree(), TraversalOrder::PreOrder, &mut collect);
            assert_eq!(values, [Value::Int(10), Value::Int(20)]);

            collect.reset();
            let bfs = reduce(&nested_tree(), TraversalOrder::BreadthFirst, &mut collect);
            assert_eq!(bfs, [Value::Int(10), Value::Int(20)]);
        }

        #[test]
        fn max_depth_tracks_nesting_through_the_walk() {
            let mut deep = Branch::new("a");
            let mut b = Branch::new("b");
            b.push(Node::branch("c"));
            deep.push(b);
            deep.push(Node::leaf(1i64));

            let mut gauge = MaxDepth::new();
            walk_branch(&mut gauge, &deep);
            // a > b > c
            assert_eq!(gauge.deepest(), 3);
        }
    }
}
