//! Error types for export operations

use thiserror::Error;

/// Errors that can occur while exporting or reading UBX documents
#[derive(Error, Debug)]
pub enum IoError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("No meshes to export")]
    NoMeshes,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] ubxmesh_core::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for export operations
pub type IoResult<T> = std::result::Result<T, IoError>;
