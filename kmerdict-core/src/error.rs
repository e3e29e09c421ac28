//! Error types for the k-mer kernel

use thiserror::Error;

/// Errors surfaced by the codec and the binary record I/O
#[derive(Debug, Error)]
pub enum KmerError {
    #[error("Invalid base: {0:?} is not one of A, C, G, T")]
    InvalidBase(char),

    #[error("K-mer contains an ambiguous base (N)")]
    AmbiguousBase,

    #[error("Invalid k-mer length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Short read: expected {expected} bytes")]
    ShortRead { expected: usize },

    #[error("Short write: expected {expected} bytes")]
    ShortWrite { expected: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl KmerError {
    pub fn invalid_base(byte: u8) -> Self {
        Self::InvalidBase(byte as char)
    }
}

/// Result type for kernel operations
pub type KmerResult<T> = Result<T, KmerError>;
