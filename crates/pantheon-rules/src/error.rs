//! Error types for the store boundary and the run flow.
//!
//! Locked or unaffordable actions are not errors; they are reported through
//! `bool` predicates and refusal values. These types only cover data that
//! could not be loaded or saved.

use pantheon_core::{RunId, RunStatus};
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for run flow operations.
pub type FlowResult<T> = Result<T, FlowError>;

/// Errors reported by a profile or run store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The requested record does not exist.
    #[error("record not found: {0}")]
    NotFound(String),

    /// The store could not be reached or refused the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Errors that abort a run flow.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Reading the profile or runs failed.
    #[error("failed to load player data: {0}")]
    Load(StoreError),

    /// Writing the profile or a run failed.
    #[error("failed to save: {0}")]
    Persist(StoreError),

    /// No run with this id exists.
    #[error("run not found: {0}")]
    RunNotFound(RunId),

    /// The run has already finished.
    #[error("run {id} is already {status}")]
    RunNotInProgress {
        /// The run that was asked for.
        id: RunId,
        /// Its current status.
        status: RunStatus,
    },
}
