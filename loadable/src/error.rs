//! Error type shared by the fallible accessors and the async layer.

use thiserror::Error;

/// Errors surfaced when a caller insists on a value that is not there.
///
/// None of the combinators produce these: absence is modeled by the
/// container itself. They only appear at the edges where a caller
/// asks to leave the container (`try_loaded`), waits on a producer
/// that went away, or gives up on a suspended task.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadableError {
    /// The value has not been loaded yet.
    #[error("value is not loaded yet")]
    NotLoaded,

    /// The lookup completed and found nothing.
    #[error("value was not found")]
    NotFound,

    /// A suspended task did not complete within the configured number
    /// of suspensions.
    #[error("task still suspended after {suspensions} suspensions")]
    Exhausted {
        /// How many times the task suspended before the runner gave up.
        suspensions: usize,
    },

    /// Every producer handle was dropped while the value was still
    /// not loaded.
    #[error("producer dropped before the value was loaded")]
    Abandoned,
}
