//! Drive a document through edits, undo/redo, a transaction, and the
//! event stream, printing the outline after each phase.
//!
//! Run with `cargo run --example undo_redo`.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crease::{Branch, Document, Edit, Node, NodeFactory, NodePath, Value};

fn main() -> crease::error::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut factory = NodeFactory::new();
    factory.register("note", || {
        let mut branch = Branch::new("note");
        branch.push(Node::leaf("untitled"));
        branch.into()
    })?;
    factory.register("done-flag", || Node::leaf(false))?;

    let mut doc = Document::new("journal");
    doc.subscribe(|event| info!(%event, "change"));

    // Two notes from the factory, then flesh out the first.
    for _ in 0..2 {
        doc.apply(Edit::Insert {
            parent: NodePath::root(),
            index: None,
            node: factory.create("note")?,
        })?;
    }
    doc.apply(Edit::Rename {
        at: NodePath::parse("0")?,
        label: "monday".to_string(),
    })?;
    doc.apply(Edit::SetValue {
        at: NodePath::parse("0/0")?,
        value: Value::from("buy coffee"),
    })?;
    println!("after edits:\n{}\n", doc.render());

    // Step back twice, then forward once.
    doc.undo()?;
    doc.undo()?;
    doc.redo()?;
    info!(
        revision = doc.revision(),
        undo = doc.undo_depth(),
        redo = doc.redo_depth(),
        "history"
    );
    println!("after undo x2, redo x1:\n{}\n", doc.render());

    // Deferred edits land together on flush.
    doc.queue(Edit::Insert {
        parent: NodePath::parse("1")?,
        index: None,
        node: factory.create("done-flag")?,
    });
    doc.queue(Edit::Rename {
        at: NodePath::parse("1")?,
        label: "tuesday".to_string(),
    });
    let flushed = doc.flush()?;
    info!(flushed, "queue flushed");

    // A transaction that goes sour rolls itself back.
    {
        let mut txn = doc.begin();
        txn.apply(Edit::SetValue {
            at: NodePath::parse("0/0")?,
            value: Value::from("rewrite everything"),
        })?;
        if let Err(err) = txn.apply(Edit::Remove {
            at: NodePath::parse("5/5")?,
        }) {
            info!(%err, "transaction edit failed, dropping without commit");
        }
    }
    println!("after rolled-back transaction:\n{}\n", doc.render());

    // And one that commits.
    let mut txn = doc.begin();
    txn.apply(Edit::Rename {
        at: NodePath::root(),
        label: "journal (week 1)".to_string(),
    })?;
    txn.commit()?;
    println!("after committed transaction:\n{}", doc.render());

    Ok(())
}
