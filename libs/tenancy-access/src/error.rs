//! Error types for callers that prefer `Result` over raw decisions.

use thiserror::Error;

use crate::collections::{Collection, Operation};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    /// The predicate denied the operation outright.
    #[error("access denied: {operation} on {collection}")]
    Denied {
        collection: Collection,
        operation: Operation,
    },

    /// The host asked about a collection slug the core does not govern.
    #[error("unknown collection: {0}")]
    UnknownCollection(String),
}
