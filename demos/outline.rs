//! Build a small document tree, render it, and run the read-side tools
//! over it: cursors, selectors, reducers, and a dispatch table.
//!
//! Run with `cargo run --example outline`; set `RUST_LOG=debug` to watch
//! the library's own tracing output.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crease::visitor::{reduce, Average, DispatchTable, MaxDepth, Sum};
use crease::{NodeKind, Selector, TraversalOrder, TreeBuilder};

fn main() -> crease::error::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut builder = TreeBuilder::new("inventory");
    builder
        .branch("electronics")
        .leaf("laptop")
        .leaf(1299.99)
        .branch("accessories")
        .leaf("mouse")
        .leaf(25.50)
        .end()?
        .end()?
        .branch("books")
        .leaf("rust in practice")
        .leaf(39.95)
        .end()?
        .leaf(true);
    let root = builder.finish()?;

    println!("{}", root.render());
    println!();
    println!("{}", root.to_json_pretty()?);

    // Same nodes, three orders.
    for order in [
        TraversalOrder::PreOrder,
        TraversalOrder::PostOrder,
        TraversalOrder::BreadthFirst,
    ] {
        let labels: Vec<String> = root
            .cursor(order)
            .nodes()
            .map(|node| match node.label() {
                Some(label) => format!("'{}'", label),
                None => node.render(),
            })
            .collect();
        info!(%order, nodes = labels.len(), "{}", labels.join(", "));
    }

    let total = reduce(&root, TraversalOrder::PreOrder, &mut Sum::new());
    let mean = reduce(&root, TraversalOrder::PreOrder, &mut Average::new());
    let mut gauge = MaxDepth::new();
    crease::visitor::walk_branch(&mut gauge, &root);
    info!(total, mean, depth = gauge.deepest(), "reducers");

    // Prices are the float leaves under any branch.
    let pricey: Selector = "kind:float and value > 30".parse()?;
    for node in pricey.find_all(&root, TraversalOrder::PreOrder) {
        info!(selector = %pricey, "matched {}", node.render());
    }

    let mut table: DispatchTable<&'static str> = DispatchTable::new();
    table
        .on(NodeKind::Text, |node| {
            node.value().map(|v| v.kind().name()).unwrap_or("?")
        })
        .on(NodeKind::Float, |_| "price")
        .on(NodeKind::Bool, |_| "flag")
        .on(NodeKind::Int, |_| "count")
        .on(NodeKind::Branch, |_| "section");
    let tags = table.run_over(&root, TraversalOrder::BreadthFirst)?;
    info!(?tags, "dispatch over breadth-first order");

    Ok(())
}
