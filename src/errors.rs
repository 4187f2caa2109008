//! Error types for the reader pool

use std::time::Duration;
use thiserror::Error;

use crate::kind::ResourceKind;

/// Boxed error produced by a reader factory.
pub type FactoryError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("unsupported reader kind \"{0}\"")]
    UnsupportedKind(String),

    #[error("invalid {param} parameter for {kind} reader")]
    InvalidParams {
        kind: ResourceKind,
        param: &'static str,
    },

    #[error("pool capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),

    /// The factory failed while building a fresh reader. The admission slot
    /// was already handed back, so the caller may simply retry.
    #[error("failed to construct a new reader")]
    ConstructionFailed(#[source] FactoryError),

    #[error("pool is closed")]
    Closed,

    #[error("pool is empty - no readers available")]
    Empty,

    #[error("acquire timed out after {0:?}")]
    Timeout(Duration),
}

pub type PoolResult<T> = Result<T, PoolError>;
