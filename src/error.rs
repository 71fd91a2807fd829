//! Error types for vfswalk

use crate::inode::InodeId;

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the working tree and overlay store
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Overlay database failure
    #[error("overlay store error: {0}")]
    Store(#[from] sled::Error),

    /// Overlay record could not be encoded or decoded
    #[error("overlay record codec error: {0}")]
    Codec(#[from] bincode::Error),

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// An operation expected a directory inode
    #[error("inode {0} is not a directory")]
    NotADirectory(InodeId),

    /// A named child does not exist in its parent's table
    #[error("no entry named {name:?} under inode {parent}")]
    EntryNotFound { parent: InodeId, name: String },
}
