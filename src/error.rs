use thiserror::Error;

use crate::backend::BackendKind;

pub type SublevelResult<T> = Result<T, SublevelError>;

/// Error type covering the view layer and every backend adapter.
///
/// Backend failures pass through unmodified; this layer adds no retry or
/// recovery of its own.
#[derive(Error, Debug)]
pub enum SublevelError {
    #[error("key not found: {}", String::from_utf8_lossy(.key))]
    NotFound { key: Vec<u8> },

    #[error("slice steps are not supported by the key-space model")]
    StepNotSupported,

    #[error("backend `{kind}` is not compiled into this build")]
    BackendUnavailable { kind: BackendKind },

    #[error("cannot normalize backend `{kind}`: {reason}")]
    Normalization { kind: BackendKind, reason: String },

    #[error("backend does not provide `{capability}`")]
    CapabilityMissing { capability: &'static str },

    #[error("value is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "sled")]
    #[error("Sled Error: {0}")]
    Sled(#[from] sled::Error),

    #[cfg(feature = "redb")]
    #[error("Redb Database Error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[cfg(feature = "redb")]
    #[error("Redb Transaction Error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[cfg(feature = "redb")]
    #[error("Redb Table Error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[cfg(feature = "redb")]
    #[error("Redb Storage Error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[cfg(feature = "redb")]
    #[error("Redb Commit Error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
