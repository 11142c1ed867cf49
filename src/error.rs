//! Error types for the lock service.

use thiserror::Error;

/// Errors raised by [`crate::lock::Multilock`] and the store adapter.
#[derive(Error, Debug)]
pub enum MultilockError {
    /// Acquisition exhausted its retry budget without obtaining the lock.
    #[error("cannot obtain lock {name:?}: retry budget exhausted")]
    CannotObtainLock {
        /// Lock name that could not be obtained.
        name: String,
    },

    /// A refresh was attempted on a grant that is no longer held.
    #[error("lock {name:?} has expired")]
    LockExpired {
        /// Lock name whose grant had expired.
        name: String,
    },

    /// Transport-level failure talking to the store.
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// The store returned a script reply outside `{OK, BLOCKED, EXPIRED}`.
    #[error("unexpected script reply: {0}")]
    UnexpectedReply(String),
}

/// Result type for lock operations.
pub type MultilockResult<T> = Result<T, MultilockError>;
