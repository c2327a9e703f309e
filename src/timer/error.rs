//! Errors reported by timer operations

use thiserror::Error;

use super::TimerId;

/// Recoverable failures of timer and controller operations.
///
/// A failing operation never leaves partial state behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// Name was empty or whitespace only
    #[error("timer name must not be empty")]
    InvalidName,
    /// No timer with this id is in the collection
    #[error("timer {0} not found")]
    NotFound(TimerId),
}
