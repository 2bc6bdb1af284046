//! Transactions: all-or-nothing edit groups.
//!
//! A [`Transaction`] borrows the document mutably, applies edits through
//! it, and unwinds them in reverse order unless committed. Unwinding uses
//! the document's own undo stack, so subscribers see `reverted` events
//! for a rolled-back transaction just as they saw the forward events.
//!
//! The exclusive borrow rules out interleaved edits at compile time in
//! safe single-owner code. The revision check is the runtime backstop:
//! a transaction that observes a revision it did not produce refuses to
//! touch the document further, because unwinding through foreign edits
//! would revert someone else's work.

use thiserror::Error;
use tracing::{debug, error, warn};

use crease_tree::path::NodePath;

use crate::document::Document;
use crate::edit::{Edit, EditError};

#[derive(Debug, Error)]
pub enum TxnError {
    /// An edit inside the transaction failed. The document is unchanged
    /// by that edit; earlier edits of the transaction still stand until
    /// rollback.
    #[error(transparent)]
    Edit(#[from] EditError),

    /// The document moved underneath the transaction.
    #[error("transaction is stale: document at revision {found}, expected {expected}")]
    Stale { expected: u64, found: u64 },

    /// Rollback could not revert everything. Each failure is kept; none
    /// of them masks the others.
    #[error("rollback incomplete: {remaining} edit(s) left applied after {} failure(s)", .failures.len())]
    RollbackIncomplete {
        failures: Vec<TxnError>,
        remaining: usize,
    },
}

/// Scoped edit group over a [`Document`].
///
/// Dropping an uncommitted transaction rolls it back. Drop never
/// panics; rollback trouble during a drop is logged (quietly when the
/// thread is already panicking). Call [`Transaction::rollback`] to get
/// rollback failures as a value instead.
#[derive(Debug)]
pub struct Transaction<'d> {
    doc: &'d mut Document,
    start_revision: u64,
    applied: u64,
    finished: bool,
}

impl<'d> Transaction<'d> {
    pub(crate) fn new(doc: &'d mut Document) -> Transaction<'d> {
        let start_revision = doc.revision();
        debug!(start_revision, "transaction open");
        Transaction {
            doc,
            start_revision,
            applied: 0,
            finished: false,
        }
    }

    fn expected_revision(&self) -> u64 {
        self.start_revision + self.applied
    }

    fn check_fresh(&self) -> Result<(), TxnError> {
        let found = self.doc.revision();
        let expected = self.expected_revision();
        if found == expected {
            Ok(())
        } else {
            Err(TxnError::Stale { expected, found })
        }
    }

    /// Apply one edit through the transaction.
    pub fn apply(&mut self, edit: Edit) -> Result<NodePath, TxnError> {
        self.check_fresh()?;
        let at = self.doc.apply(edit)?;
        self.applied += 1;
        Ok(at)
    }

    /// Number of edits applied through this transaction so far.
    pub fn applied(&self) -> u64 {
        self.applied
    }

    /// Keep every applied edit. Fails with [`TxnError::Stale`] if the
    /// document moved underneath the transaction; the document is left
    /// as-is in that case, and the transaction is finished either way.
    pub fn commit(mut self) -> Result<(), TxnError> {
        self.finished = true;
        self.check_fresh()?;
        debug!(edits = self.applied, "transaction committed");
        Ok(())
    }

    /// Revert every applied edit, most recent first.
    pub fn rollback(mut self) -> Result<(), TxnError> {
        self.finished = true;
        let (failures, remaining) = self.unwind();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(TxnError::RollbackIncomplete {
                failures,
                remaining,
            })
        }
    }

    /// Undo this transaction's edits. Returns collected failures and how
    /// many edits were left applied.
    fn unwind(&mut self) -> (Vec<TxnError>, usize) {
        let mut failures = Vec::new();
        let mut remaining = self.applied as usize;
        if remaining == 0 {
            return (failures, 0);
        }
        // Undoing pops the newest record; with foreign edits on top that
        // would revert work this transaction never did. Refuse instead.
        if let Err(stale) = self.check_fresh() {
            failures.push(stale);
            return (failures, remaining);
        }
        while remaining > 0 {
            match self.doc.undo() {
                Ok(true) => remaining -= 1,
                Ok(false) => {
                    // History ran dry early, e.g. someone cleared it.
                    failures.push(TxnError::Stale {
                        expected: self.expected_revision(),
                        found: self.doc.revision(),
                    });
                    break;
                }
                Err(err) => {
                    failures.push(TxnError::Edit(err));
                    break;
                }
            }
        }
        debug!(
            reverted = self.applied as usize - remaining,
            remaining, "transaction unwound"
        );
        (failures, remaining)
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let (failures, remaining) = self.unwind();
        if failures.is_empty() {
            return;
        }
        // Never panic out of drop. During an unwind a noisy error would
        // drown out the original panic.
        if std::thread::panicking() {
            warn!(
                remaining,
                failures = failures.len(),
                "rollback incomplete during panic unwind"
            );
        } else {
            for failure in &failures {
                error!(%failure, "rollback failure");
            }
            error!(remaining, "rollback incomplete");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
