use thiserror::Error;

/// Failure of a listings fetch.
///
/// `Clone` so that every caller waiting on one shared request gets the same error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("failed to fetch listings: server returned {0}")]
    Status(u16),

    #[error("failed to fetch listings: {0}")]
    Transport(String),

    #[error("failed to fetch listings: unreadable response: {0}")]
    Decode(String),
}
