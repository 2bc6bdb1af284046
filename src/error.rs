//! Unified error type.
//!
//! Each subsystem keeps its own error enum; `CreaseError` is the catch-all
//! for callers that mix subsystems and want one `?`-able type. The `From`
//! bridges preserve the source error, so matching on the concrete failure
//! still works after the conversion.

use thiserror::Error;

use crease_tree::builder::BuildError;
use crease_tree::cursor::TraverseError;
use crease_tree::path::PathError;
use crease_tree::select::SelectError;
use crease_tree::visitor::DispatchError;

use crate::edit::EditError;
use crate::factory::FactoryError;
use crate::txn::TxnError;

/// Any error this crate can produce.
#[derive(Debug, Error)]
pub enum CreaseError {
    #[error("path error: {0}")]
    Path(#[from] PathError),

    #[error("traversal error: {0}")]
    Traverse(#[from] TraverseError),

    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("selector error: {0}")]
    Select(#[from] SelectError),

    #[error("builder error: {0}")]
    Build(#[from] BuildError),

    #[error("edit error: {0}")]
    Edit(#[from] EditError),

    #[error("transaction error: {0}")]
    Txn(#[from] TxnError),

    #[error("factory error: {0}")]
    Factory(#[from] FactoryError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CreaseError {
    /// Stable one-word tag for logs.
    pub fn category(&self) -> &'static str {
        match self {
            CreaseError::Path(_) => "path",
            CreaseError::Traverse(_) => "traverse",
            CreaseError::Dispatch(_) => "dispatch",
            CreaseError::Select(_) => "select",
            CreaseError::Build(_) => "build",
            CreaseError::Edit(_) => "edit",
            CreaseError::Txn(_) => "txn",
            CreaseError::Factory(_) => "factory",
            CreaseError::Json(_) => "json",
        }
    }
}

pub type Result<T> = std::result::Result<T, CreaseError>;
