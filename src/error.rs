//! The unified error type for whole-pipeline operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Template error: {0}")]
    Template(String),

    #[error("Package patch error: {0}")]
    Patch(#[from] stampa_docx::PatchError),

    #[error("Resource error: {0}")]
    Resource(#[from] stampa_traits::ResourceError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
