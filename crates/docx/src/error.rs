//! Error types for package patching.
//!
//! Only structural failures are fatal: an unreadable archive, a missing body
//! part, or a relationships part that cannot take a new entry (emitting the
//! package anyway would leave it structurally invalid). Everything per-token
//! is absorbed into the substituted text and the patch report.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("Failed to open template container: {0}")]
    ContainerOpen(String),

    #[error("Template container is missing its body part '{0}'")]
    MissingBodyPart(&'static str),

    #[error("Failed to write relationship entry: {0}")]
    RelationshipWrite(String),

    #[error("Failed to serialize patched container: {0}")]
    Serialize(String),
}
