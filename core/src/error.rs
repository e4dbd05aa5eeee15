use crate::index::DocId;
use std::path::PathBuf;
use thiserror::Error;

/// Errors for index construction, persistence, and scoring.
///
/// Callers can always distinguish a contract violation from a missing index
/// and a missing document; none of these are retryable.
#[derive(Error, Debug)]
pub enum Error {
    /// Input failed a contract check, e.g. a phrase passed where a single
    /// term was expected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No complete persisted index exists at the cache location.
    #[error("index not found at {}: run build first", path.display())]
    IndexNotFound { path: PathBuf },

    /// Scoring was asked about a document the index has never seen.
    #[error("document {doc_id} not found in index")]
    DocNotFound { doc_id: DocId },

    #[error("index io: {0}")]
    Io(#[from] std::io::Error),

    #[error("index codec: {0}")]
    Codec(#[from] bincode::Error),
}
