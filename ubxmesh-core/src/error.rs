//! Error types for ubxmesh

use thiserror::Error;

/// Main error type for ubxmesh operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Mesh '{name}' has no faces to cluster")]
    EmptyMesh { name: String },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Algorithm error: {0}")]
    Algorithm(String),
}

/// Result type alias for ubxmesh operations
pub type Result<T> = std::result::Result<T, Error>;
